//! Staged command scripts
//!
//! A rule's command runs as a shell *script* rather than an inline
//! argument, so the interpreter parses pipes, redirections and quoting
//! itself and no shell-escaping happens at the process boundary.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// A rule command staged into a uniquely named `rule*.sh` file in the
/// platform temp directory, scoped to a single execution.
///
/// Dropping the value removes the file, so cleanup happens even when a run
/// unwinds early; [`close`](Self::close) removes it eagerly and surfaces
/// any deletion error.
pub struct CommandScript {
    file: NamedTempFile,
}

impl CommandScript {
    /// Writes `command` plus a trailing newline into a fresh script file
    pub fn stage(command: &str) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("rule")
            .suffix(".sh")
            .tempfile()?;
        writeln!(file, "{}", command)?;
        file.flush()?;
        Ok(Self { file })
    }

    /// Path to hand to the shell interpreter as its sole argument
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Deletes the script file, reporting failure to do so
    pub fn close(self) -> io::Result<()> {
        self.file.close()
    }
}
