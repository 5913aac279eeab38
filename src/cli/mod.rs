//! # Command-Line Interface
//!
//! The driver around the parser and executor: argument handling, default
//! rule-file selection, and the run loop.
//!
//! ## Usage
//!
//! ```bash
//! doit             # interpret the file named "doit"
//! doit build.rules # interpret a specific rule file
//! ```
//!
//! ## Flags
//!
//! | Flag | Purpose |
//! |------|---------|
//! | `-f, --format <text\|json>` | Output format |
//! | `-v, --verbose` | List parsed rules and skipped targets on stderr |
//! | `--shell <PATH>` | Override the command interpreter |
//! | `-n, --dry-run` | Print commands without running them |
//! | `-k, --keep-going` | Keep running remaining rules after a failure |
//!
//! Rules run strictly in file order; a rule failure stops the run unless
//! `--keep-going` is given. Parse errors abort before anything executes.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and interpret the rule file.

mod app;
mod output;

pub use app::{run, Cli};
pub use output::{Output, OutputFormat};
