//! nginx-3scale: render the OpenResty/3scale configuration and exec nginx.
//!
//! This is the entry point. It binds the command line to the field
//! registry, runs the validate/render/exec pipeline, and maps any error to
//! a message on stderr and a non-zero exit code.

mod cli;
pub mod error;
pub mod exit_codes;
pub mod fields;
pub mod fs;
pub mod handoff;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod validate;

use handoff::ExecLauncher;
use layout::Layout;
use std::process::ExitCode;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Quiet by default; `RUST_LOG=info` shows rendered files and the exec line.
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();
}

fn main() -> ExitCode {
    init_logger();

    let registry = fields::define_fields();
    let result = cli::bind_flags(&registry, std::env::args_os()).and_then(|values| {
        pipeline::run(&registry, &values, &Layout::default(), &mut ExecLauncher)
    });

    match result {
        Ok(never) => match never {},
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
