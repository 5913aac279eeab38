//! Rule domain model
//!
//! A rule names a target file, the source files it is built from, and the
//! shell command that produces the target from the sources.

use std::fmt;

use serde::Serialize;

/// A single build rule.
///
/// Rules are constructed by the parser and executed at most once: the first
/// recorded exit status is fixed for the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// File this rule produces
    target: String,

    /// Files the target is built from, in the order they were written
    sources: Vec<String>,

    /// Raw shell command text, internal syntax uninterpreted
    command: String,

    /// Exit status of the command, present once the rule has run
    exit_status: Option<i32>,
}

impl Rule {
    /// Creates a rule from parsed parts. Only the parser should construct
    /// rules; it guarantees `target` and every source are non-empty.
    pub fn new(
        target: impl Into<String>,
        sources: Vec<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            sources,
            command: command.into(),
            exit_status: None,
        }
    }

    /// Returns the file this rule produces
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the declared source files in order of appearance
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Returns the raw command text. May be empty, which is a legal no-op.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns the recorded exit status, or `None` if the rule has not run
    pub fn exit_status(&self) -> Option<i32> {
        self.exit_status
    }

    /// Records the command's exit status. The first recorded value wins;
    /// later calls are ignored.
    pub fn record_exit(&mut self, code: i32) {
        if self.exit_status.is_none() {
            self.exit_status = Some(code);
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-", quote_ident(&self.target))?;
        for source in &self.sources {
            write!(f, " {}", quote_ident(source))?;
        }
        write!(f, " : {}", self.command)
    }
}

/// Re-quotes an identifier for display so the listing round-trips through
/// the rule grammar: names containing whitespace or a break character come
/// back single-quoted with the supported escapes applied.
fn quote_ident(ident: &str) -> String {
    let needs_quoting = ident
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '-' | '#' | ':' | '\'' | '"'));

    if !needs_quoting {
        return ident.to_string();
    }

    let mut out = String::with_capacity(ident.len() + 2);
    out.push('\'');
    for c in ident.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
