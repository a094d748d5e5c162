//! The field registry and the values bound to it.
//!
//! A [`Field`] ties together a command-line flag, the placeholder token it
//! replaces in the templates, and the pattern its value must match. The
//! registry is immutable after [`define_fields`]; supplied values live in a
//! separate [`Values`] map keyed by flag name.
//!
//! Tokens are substituted literally and in registry order, so no token may
//! appear inside another token. Adding a field is a single entry in
//! [`define_fields`]; the parser, validator and renderer pick it up from
//! the registry.

use std::collections::HashMap;

// TODO: restrict ports to 0-65535 and hostnames to RFC 1123 labels.
const PORT_PATTERN: &str = "[0-9]{1,5}";
const HOST_PATTERN: &str = "[a-z0-9.]+";

/// A named, validated value substituted into the templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Long flag name without the leading `--`.
    pub flag: &'static str,
    /// Help text shown by `--help`.
    pub description: &'static str,
    /// Literal substring replaced in the templates.
    pub token: &'static str,
    /// Regular expression the whole value must match.
    pub pattern: &'static str,
    /// Whether the value is kept out of logs.
    pub sensitive: bool,
}

impl Field {
    const fn new(
        flag: &'static str,
        description: &'static str,
        token: &'static str,
        pattern: &'static str,
    ) -> Self {
        Self {
            flag,
            description,
            token,
            pattern,
            sensitive: false,
        }
    }

    const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Ordered, immutable collection of fields.
#[derive(Debug, Clone)]
pub struct Registry {
    fields: Vec<Field>,
}

impl Registry {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Build the fixed set of fields the OpenResty templates expect.
pub fn define_fields() -> Registry {
    Registry::new(vec![
        Field::new(
            "upstream-api-port",
            "port where 3scale can connect to the proxy to verify the health of the \
             self-hosted deployment. Also the port at which nginx proxy listens for \
             requests to the cluster.",
            "UPSTREAM_API_PORT",
            PORT_PATTERN,
        ),
        Field::new(
            "upstream-bdb-host",
            "host name/ip of the bdb instance",
            "UPSTREAM_BDB_HOST",
            HOST_PATTERN,
        ),
        Field::new(
            "upstream-bdb-port",
            "port number of the bdb instance",
            "UPSTREAM_BDB_PORT",
            PORT_PATTERN,
        ),
        Field::new(
            "frontend-api-port",
            "port number exposed to the external world for accessing the backend BDB services",
            "FRONTEND_API_PORT",
            PORT_PATTERN,
        ),
        Field::new(
            "frontend-api-dns-name",
            "globally unique dns/ip used by the external world for accessing backend BDB services",
            "FRONTEND_DNS_NAME",
            HOST_PATTERN,
        ),
        Field::new(
            "provider-key",
            "3scale provider key",
            "PROVIDER_KEY",
            "[a-z0-9]{32}",
        )
        .sensitive(),
        Field::new(
            "3scale-version-header",
            "3scale/nginx version header",
            "3SCALE_VERSION_HEADER",
            "[0-9TZ:-]+",
        ),
        Field::new(
            "3scale-service-id",
            "3scale service id",
            "SERVICE_ID",
            "[0-9]{13}",
        ),
        Field::new(
            "3scale-secret-token",
            "secret response token set in 3scale to validate 3scale requests",
            "3SCALE_RESPONSE_SECRET_TOKEN",
            "[a-z0-9]+",
        )
        .sensitive(),
        Field::new(
            "health-check-port",
            "port number for LB health check",
            "HEALTH_CHECK_PORT",
            PORT_PATTERN,
        ),
    ])
}

/// Values supplied on the command line, keyed by flag name.
///
/// A flag that was never given reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values {
    values: HashMap<String, String>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, flag: impl Into<String>, value: impl Into<String>) {
        self.values.insert(flag.into(), value.into());
    }

    pub fn get(&self, flag: &str) -> &str {
        self.values.get(flag).map(String::as_str).unwrap_or("")
    }

    /// Value as it may appear in logs.
    pub fn display(&self, field: &Field) -> &str {
        if field.sensitive {
            "<redacted>"
        } else {
            self.get(field.flag)
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (k, v) in iter {
            values.set(k, v);
        }
        values
    }
}
