//! Rule execution
//!
//! Decides whether a rule has anything to do and runs its command through
//! a configured shell interpreter, recording the exit status at most once
//! per rule.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

use super::script::CommandScript;
use crate::domain::Rule;

/// Interpreter used when neither the config file nor `--shell` names one
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Errors scoped to a single rule's execution. Whether remaining rules
/// still run after one of these is the driver's decision.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to stage command script: {0}")]
    Script(#[source] io::Error),

    #[error("failed to spawn {}: {source}", .shell.display())]
    Spawn {
        shell: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for command to finish: {0}")]
    Wait(#[source] io::Error),

    /// The child was killed by a signal, so no exit status exists. This is
    /// distinct from a non-zero exit, which is recorded as data.
    #[error("command terminated by signal {signal}")]
    Interrupted { signal: i32 },

    #[error("failed to remove command script: {0}")]
    Cleanup(#[source] io::Error),
}

/// Executes rules one at a time through a fixed shell interpreter.
///
/// The interpreter path is an explicit configuration value rather than
/// something read from the environment, so tests can substitute one.
pub struct Runner {
    shell: PathBuf,
}

impl Runner {
    /// Creates a runner that invokes commands as `<shell> <script>`
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    /// Returns the configured interpreter path
    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// Whether the rule has anything to do: true iff no filesystem entry
    /// exists at the target path, resolved against the process working
    /// directory. Source files and timestamps are never consulted.
    pub fn needs_run(&self, rule: &Rule) -> bool {
        !Path::new(rule.target()).exists()
    }

    /// Runs the rule's command and returns its exit status.
    ///
    /// A rule runs at most once: if a status was already recorded, it is
    /// returned without spawning anything. The command's stdin, stdout and
    /// stderr are inherited from this process.
    pub fn run(&self, rule: &mut Rule) -> Result<i32, ExecError> {
        if let Some(code) = rule.exit_status() {
            return Ok(code);
        }

        let script = CommandScript::stage(rule.command()).map_err(ExecError::Script)?;

        let mut child = Command::new(&self.shell)
            .arg(script.path())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                shell: self.shell.clone(),
                source,
            })?;

        let status = child.wait().map_err(ExecError::Wait)?;

        match status.code() {
            Some(code) => {
                rule.record_exit(code);
                script.close().map_err(ExecError::Cleanup)?;
                Ok(code)
            }
            // No exit code exists; the script is still removed on drop.
            None => Err(ExecError::Interrupted {
                signal: termination_signal(&status),
            }),
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or(-1)
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> i32 {
    -1
}
