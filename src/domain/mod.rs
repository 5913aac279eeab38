//! Domain models for doit
//!
//! Contains the rule entity without any I/O concerns.

mod rule;

pub use rule::Rule;
