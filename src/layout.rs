//! Filesystem locations of the OpenResty installation.
//!
//! The locations are fixed at build time. They derive from the install
//! prefix, which defaults to `/usr/local/openresty` (the layout of the
//! official OpenResty images) and can be changed by setting
//! `OPENRESTY_PREFIX` when compiling.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Install prefix baked into the binary.
pub const OPENRESTY_PREFIX: &str = match option_env!("OPENRESTY_PREFIX") {
    Some(prefix) => prefix,
    None => "/usr/local/openresty",
};

/// A template and the file rendered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
    pub template: PathBuf,
    pub output: PathBuf,
}

/// Where templates are read, where output goes, and what gets executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub nginx_conf: RenderTarget,
    pub lua_script: RenderTarget,
    pub nginx_binary: PathBuf,
}

impl Layout {
    /// Layout of an OpenResty installation rooted at `prefix`.
    pub fn from_prefix(prefix: impl AsRef<Path>) -> Self {
        let nginx = prefix.as_ref().join("nginx");
        let conf = nginx.join("conf");

        Self {
            nginx_conf: RenderTarget {
                template: conf.join("nginx.conf.template"),
                output: conf.join("nginx.conf"),
            },
            lua_script: RenderTarget {
                template: conf.join("nginx.lua.template"),
                output: conf.join("nginx.lua"),
            },
            nginx_binary: nginx.join("sbin").join("nginx"),
        }
    }

    /// Both render targets, primary configuration first.
    pub fn targets(&self) -> [&RenderTarget; 2] {
        [&self.nginx_conf, &self.lua_script]
    }

    /// Arguments passed to nginx: `-c <rendered nginx.conf>`.
    pub fn nginx_args(&self) -> Vec<OsString> {
        vec![
            OsString::from("-c"),
            self.nginx_conf.output.clone().into_os_string(),
        ]
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::from_prefix(OPENRESTY_PREFIX)
    }
}
