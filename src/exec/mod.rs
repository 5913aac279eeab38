//! # Rule Execution
//!
//! Staleness checking and command execution for parsed rules.
//!
//! Staleness here means only "the target file does not exist"; source
//! files, modification times and transitive dependencies are never
//! consulted. A stale rule's command is staged into a temporary shell
//! script ([`CommandScript`]) and run as `<shell> <script>` with inherited
//! standard streams, blocking until the child exits. Each rule runs at
//! most once per process; the exit status is recorded on the rule itself.

mod runner;
mod script;

pub use runner::{ExecError, Runner, DEFAULT_SHELL};
pub use script::CommandScript;
