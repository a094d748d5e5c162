//! Handing the process over to nginx.
//!
//! The handoff is the last step of a run. On Unix the current process image
//! is replaced with `execve`, so nginx keeps this PID and whoever started us
//! sees nginx's exit status. Elsewhere a child is spawned and its exit
//! status is forwarded; the child gets a new PID.

use crate::error::{Result, WrapperError};
use std::convert::Infallible;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::Command;

/// The command that replaces this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// The complete environment nginx starts with.
    pub env: Vec<(OsString, OsString)>,
}

impl Handoff {
    /// A handoff that inherits the current environment unchanged.
    pub fn inheriting_env(program: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            args,
            env: std::env::vars_os().collect(),
        }
    }

    /// Shell-quoted command line, for logs.
    pub fn command_line(&self) -> String {
        let words = std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|word| word.to_string_lossy());
        shell_words::join(words)
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env_clear()
            .envs(self.env.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

/// Performs a [`Handoff`].
///
/// A successful launch never returns, hence `Infallible`.
pub trait Launch {
    fn launch(&mut self, handoff: &Handoff) -> Result<Infallible>;
}

/// Launches by replacing the current process.
#[derive(Debug, Default)]
pub struct ExecLauncher;

impl Launch for ExecLauncher {
    fn launch(&mut self, handoff: &Handoff) -> Result<Infallible> {
        let source = replace_process(handoff.command());
        Err(WrapperError::Exec {
            program: handoff.program.clone(),
            source,
        })
    }
}

/// Only returns if the replacement failed.
#[cfg(unix)]
fn replace_process(mut cmd: Command) -> io::Error {
    use std::os::unix::process::CommandExt;

    cmd.exec()
}

/// Spawn, wait, and exit with the child's status.
#[cfg(not(unix))]
fn replace_process(mut cmd: Command) -> io::Error {
    match cmd.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => e,
    }
}
