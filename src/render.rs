//! Template rendering for nginx-3scale.
//!
//! Rendering is literal substring replacement: every occurrence of a
//! field's token is replaced by the field's value, with no word boundaries
//! and no special characters. Templates are treated as raw bytes, so any
//! encoding passes through. Text in a template that matches no token is
//! copied unchanged, and a token absent from a template is a no-op.

use crate::error::{Result, WrapperError};
use bstr::ByteSlice;
use crate::fields::{Registry, Values};
use crate::fs::{OUTPUT_MODE, atomic_write};
use std::fs;
use std::path::Path;

/// Substitute every registry token in `template` with its value.
///
/// Tokens are applied in registry order. The result does not depend on that
/// order as long as no token occurs inside another token or inside a value.
pub fn render_template(template: &[u8], registry: &Registry, values: &Values) -> Vec<u8> {
    registry.iter().fold(template.to_vec(), |contents, field| {
        if contents.contains_str(field.token) {
            contents.replace(field.token, values.get(field.flag))
        } else {
            contents
        }
    })
}

/// Render `template_path` into `output_path`.
///
/// The template is read in full before anything is written; if it cannot be
/// read, `output_path` is not touched. Output is written atomically with
/// mode 0644.
pub fn render(
    registry: &Registry,
    values: &Values,
    template_path: &Path,
    output_path: &Path,
) -> Result<()> {
    let template =
        fs::read(template_path).map_err(|e| WrapperError::io("read template", template_path, e))?;

    let rendered = render_template(&template, registry, values);
    atomic_write(output_path, &rendered, OUTPUT_MODE)?;

    log::info!(
        "rendered {} -> {} ({} bytes)",
        template_path.display(),
        output_path.display(),
        rendered.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Field, define_fields};
    use tempfile::TempDir;

    fn values(pairs: &[(&str, &str)]) -> Values {
        pairs.iter().copied().collect()
    }

    fn render_str(template: &str, registry: &Registry, values: &Values) -> String {
        String::from_utf8(render_template(template.as_bytes(), registry, values)).unwrap()
    }

    #[test]
    fn substitutes_port_and_host() {
        let rendered = render_str(
            "port=UPSTREAM_API_PORT;host=UPSTREAM_BDB_HOST",
            &define_fields(),
            &values(&[("upstream-api-port", "8080"), ("upstream-bdb-host", "db.local")]),
        );
        assert_eq!(rendered, "port=8080;host=db.local");
    }

    #[test]
    fn replaces_every_occurrence() {
        let rendered = render_str(
            "listen HEALTH_CHECK_PORT;\n# health: HEALTH_CHECK_PORT\nHEALTH_CHECK_PORTHEALTH_CHECK_PORT",
            &define_fields(),
            &values(&[("health-check-port", "8888")]),
        );
        assert_eq!(rendered, "listen 8888;\n# health: 8888\n88888888");
        assert!(!rendered.contains("HEALTH_CHECK_PORT"));
    }

    #[test]
    fn replaces_inside_words() {
        let rendered = render_str(
            "x_SERVICE_ID_y",
            &define_fields(),
            &values(&[("3scale-service-id", "1234567890123")]),
        );
        assert_eq!(rendered, "x_1234567890123_y");
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let template = "worker_processes NUM_WORKERS;\nlisten UPSTREAM_API_PORT;";
        let rendered = render_str(
            template,
            &define_fields(),
            &values(&[("upstream-api-port", "8080")]),
        );
        assert_eq!(rendered, "worker_processes NUM_WORKERS;\nlisten 8080;");
    }

    #[test]
    fn template_without_tokens_is_unchanged() {
        let template = "events { worker_connections 1024; }\n";
        let rendered = render_str(template, &define_fields(), &values(&[]));
        assert_eq!(rendered, template);
    }

    #[test]
    fn tokens_are_not_patterns() {
        let registry = Registry::new(vec![Field {
            flag: "dotted",
            description: "token with regex metacharacters",
            token: "A.B*",
            pattern: ".*",
            sensitive: false,
        }]);
        let rendered = render_str("A.B* AxB AxBBB", &registry, &values(&[("dotted", "$1")]));
        assert_eq!(rendered, "$1 AxB AxBBB");
    }

    #[test]
    fn rendering_is_idempotent() {
        let registry = define_fields();
        let values = values(&[
            ("upstream-api-port", "8080"),
            ("provider-key", "0123456789abcdef0123456789abcdef"),
        ]);
        let template = "listen UPSTREAM_API_PORT; key PROVIDER_KEY;";

        let first = render_str(template, &registry, &values);
        let second = render_str(template, &registry, &values);
        assert_eq!(first, second);
    }

    #[test]
    fn render_writes_output_file() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("nginx.conf.template");
        let output = temp.path().join("nginx.conf");
        fs::write(&template, "listen FRONTEND_API_PORT;\nserver_name FRONTEND_DNS_NAME;\n").unwrap();

        render(
            &define_fields(),
            &values(&[
                ("frontend-api-port", "443"),
                ("frontend-api-dns-name", "api.example.com"),
            ]),
            &template,
            &output,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "listen 443;\nserver_name api.example.com;\n"
        );
        // The template itself is not modified
        assert!(fs::read_to_string(&template).unwrap().contains("FRONTEND_API_PORT"));
    }

    #[test]
    fn render_twice_gives_identical_bytes() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("nginx.lua.template");
        let output = temp.path().join("nginx.lua");
        fs::write(&template, "local token = '3SCALE_RESPONSE_SECRET_TOKEN'\n").unwrap();
        let registry = define_fields();
        let values = values(&[("3scale-secret-token", "s3cr3t")]);

        render(&registry, &values, &template, &output).unwrap();
        let first = fs::read(&output).unwrap();
        render(&registry, &values, &template, &output).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, b"local token = 's3cr3t'\n");
    }

    #[test]
    fn non_utf8_template_is_rendered_byte_for_byte() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("nginx.conf.template");
        let output = temp.path().join("nginx.conf");
        fs::write(&template, b"# caf\xe9\nlisten UPSTREAM_API_PORT;\n").unwrap();

        render(
            &define_fields(),
            &values(&[("upstream-api-port", "8080")]),
            &template,
            &output,
        )
        .unwrap();

        assert_eq!(fs::read(&output).unwrap(), b"# caf\xe9\nlisten 8080;\n");
    }

    #[test]
    fn missing_template_is_io_error_and_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("missing.template");
        let output = temp.path().join("nginx.conf");

        let err = render(&define_fields(), &Values::new(), &template, &output).unwrap_err();

        match err {
            WrapperError::Io { action, path, .. } => {
                assert_eq!(action, "read template");
                assert_eq!(path, template);
            }
            other => panic!("expected Io, got {:?}", other),
        }
        assert!(!output.exists());
    }
}
