//! CLI argument parsing for nginx-3scale.
//!
//! The flags are not declared by hand: one `--<flag> <VALUE>` option is
//! generated per registry field, so the command line always mirrors the
//! registry. Parsed values are copied into a [`Values`] map.

use crate::error::{Result, WrapperError};
use crate::fields::{Registry, Values};
use clap::{Arg, ArgAction, Command};
use std::ffi::OsString;

/// Build the clap command for the given registry.
pub fn command(registry: &Registry) -> Command {
    Command::new("nginx-3scale")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render the OpenResty/3scale configuration and exec nginx")
        .long_about(
            "Validates every value against its field pattern, substitutes the values \
             into nginx.conf.template and nginx.lua.template, writes nginx.conf and \
             nginx.lua, then replaces this process with nginx.",
        )
        // Repeating a flag keeps the last value instead of erroring.
        .args_override_self(true)
        .args(registry.iter().map(|field| {
            Arg::new(field.flag)
                .long(field.flag)
                .help(field.description)
                .value_name("VALUE")
                // Values such as a `-0500` UTC offset are not flags.
                .allow_hyphen_values(true)
                .action(ArgAction::Set)
        }))
}

/// Parse `argv` (program name first) into values keyed by flag name.
///
/// `--help` and `--version` print and exit the process, like `Parser::parse`.
/// Unknown flags, missing values and positional arguments are parse errors.
pub fn bind_flags<I, T>(registry: &Registry, argv: I) -> Result<Values>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match command(registry).try_get_matches_from(argv) {
        Ok(matches) => matches,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            return Err(WrapperError::Parse {
                message: summarize(&err),
            });
        }
    };

    let mut values = Values::new();
    for field in registry.iter() {
        if let Some(value) = matches.get_one::<String>(field.flag) {
            values.set(field.flag, value.as_str());
        }
    }
    Ok(values)
}

/// First line of clap's rendered error, without the `error: ` prefix.
fn summarize(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}
