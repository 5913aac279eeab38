//! doit - a minimal makefile-style task runner
//!
//! doit reads a text file of rules of the form
//!
//! ```text
//! TARGET <- SOURCE SOURCE : COMMAND
//! ```
//!
//! and, for each rule whose target file does not yet exist, runs the
//! command through a shell interpreter. Rules are processed strictly in
//! file order; staleness is target existence only, with no timestamp
//! comparison and no dependency graph.

pub mod cli;
pub mod domain;
pub mod exec;
pub mod parser;
pub mod storage;

pub use domain::Rule;
pub use exec::Runner;
pub use parser::RuleReader;
