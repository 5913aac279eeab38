//! # Rule File Parsing
//!
//! Turns rule-file text into [`Rule`](crate::domain::Rule) values.
//!
//! A rule file holds zero or more clauses of the form
//!
//! ```text
//! TARGET <- SOURCE SOURCE : COMMAND
//! ```
//!
//! where `TARGET` and each `SOURCE` may be single- or double-quoted, `#`
//! starts a comment anywhere before the `:`, and the command runs from the
//! first non-trivia character after the `:` to the end of that line.
//!
//! Parse errors are fatal to the whole file: no rule from a file that
//! fails to parse is ever returned, so nothing executes on malformed
//! input.

mod reader;

pub use reader::{ParseError, RuleReader};

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::domain::Rule;

/// Reads and parses a rule file, returning its rules in file order.
///
/// A missing file is reported distinctly from other I/O failures.
pub fn read_rules(path: &Path) -> Result<Vec<Rule>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("no such rule file: {}", path.display())
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("failed to read rule file: {}", path.display()))
        }
    };

    RuleReader::new(&text)
        .read_all()
        .with_context(|| format!("failed to parse rule file: {}", path.display()))
}
