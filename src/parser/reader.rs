//! Recursive-descent reader for rule files
//!
//! The grammar, informally:
//!
//! ```text
//! rule       := identifier '<-' identifier* ':' line
//! identifier := quoted | bareword
//! ```
//!
//! Whitespace separates tokens and is otherwise insignificant outside
//! quotes and the trailing command line. A `#` outside quotes starts a
//! comment running to end of line; comments are legal between any two
//! tokens up to and including the position right after the `:`, but a `#`
//! inside the command line is command text.

use thiserror::Error;

use crate::domain::Rule;

/// Errors raised while parsing a rule file. Any of these abandons the
/// whole file; there is no recovery or resynchronization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected '<-' after target name")]
    ExpectedArrow { line: usize },

    #[error("line {line}: expected an identifier")]
    EmptyIdentifier { line: usize },

    #[error("line {line}: unterminated quoted literal (opened with {quote})")]
    UnterminatedQuote { line: usize, quote: char },

    #[error("line {line}: unsupported escape character '{escaped}'")]
    UnsupportedEscape { line: usize, escaped: char },

    #[error("line {line}: unexpected end of input in escape sequence")]
    UnexpectedEnd { line: usize },
}

/// Lazily produces one [`Rule`] at a time from rule-file text.
///
/// Owns a single forward cursor over an immutable buffer; calling
/// [`next_rule`](Self::next_rule) after the last rule returns `Ok(None)`
/// and is safe to repeat.
pub struct RuleReader {
    data: Vec<char>,
    pos: usize,
}

impl RuleReader {
    /// Creates a reader over the given rule-file text
    pub fn new(data: &str) -> Self {
        Self {
            data: data.chars().collect(),
            pos: 0,
        }
    }

    /// Parses the next rule, or returns `Ok(None)` on clean end of input
    pub fn next_rule(&mut self) -> Result<Option<Rule>, ParseError> {
        self.skip_trivia();
        if self.peek().is_none() {
            return Ok(None);
        }

        let target = self.read_identifier()?;
        if !self.read_token("<-") {
            return Err(ParseError::ExpectedArrow { line: self.line() });
        }

        // Lookahead-driven source list: try to consume the ':' terminator,
        // and on failure read one more identifier.
        let mut sources = Vec::new();
        while !self.read_token(":") {
            sources.push(self.read_identifier()?);
        }

        self.skip_trivia();
        let command = self.consume_rest_of_line();

        Ok(Some(Rule::new(target, sources, command)))
    }

    /// Drains the reader, returning all remaining rules in file order
    pub fn read_all(&mut self) -> Result<Vec<Rule>, ParseError> {
        let mut rules = Vec::new();
        while let Some(rule) = self.next_rule()? {
            rules.push(rule);
        }
        Ok(rules)
    }

    fn peek(&self) -> Option<char> {
        self.data.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// 1-based line number at the cursor, for error reporting
    fn line(&self) -> usize {
        1 + self.data[..self.pos].iter().filter(|&&c| c == '\n').count()
    }

    /// Consumes whitespace and `#` comments, interleaved, until the cursor
    /// rests on a character that is neither
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.pos += 1;
                }
                Some('#') => {
                    self.consume_rest_of_line();
                }
                _ => break,
            }
        }
    }

    /// Try-consume an exact token after skipping trivia. The cursor only
    /// advances past the token when it matches.
    fn read_token(&mut self, exact: &str) -> bool {
        self.skip_trivia();
        let token: Vec<char> = exact.chars().collect();
        let end = self.pos + token.len();
        if end <= self.data.len() && self.data[self.pos..end] == token[..] {
            self.pos = end;
            true
        } else {
            false
        }
    }

    /// Reads a quoted or bareword identifier. Empty identifiers are a
    /// syntax error, which also keeps the source-list loop advancing.
    fn read_identifier(&mut self) -> Result<String, ParseError> {
        self.skip_trivia();
        let ident = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.read_quoted(quote)?,
            _ => self.read_bareword(),
        };
        if ident.is_empty() {
            return Err(ParseError::EmptyIdentifier { line: self.line() });
        }
        Ok(ident)
    }

    /// Maximal run of characters that are neither whitespace nor a break
    /// character. May be empty; the caller rejects that.
    fn read_bareword(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if is_break(c) {
                break;
            }
            word.push(c);
            self.pos += 1;
        }
        word
    }

    /// Consumes a quoted literal, opening quote included. The closing quote
    /// must match the opening character; `\"`, `\'`, `\n` and `\t` are the
    /// only escapes.
    fn read_quoted(&mut self, quote: char) -> Result<String, ParseError> {
        self.bump();
        let mut literal = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedQuote { line: self.line(), quote }),
                Some('\\') => match self.bump() {
                    None => return Err(ParseError::UnexpectedEnd { line: self.line() }),
                    Some(c @ ('"' | '\'')) => literal.push(c),
                    Some('n') => literal.push('\n'),
                    Some('t') => literal.push('\t'),
                    Some(escaped) => {
                        return Err(ParseError::UnsupportedEscape {
                            line: self.line(),
                            escaped,
                        })
                    }
                },
                Some(c) if c == quote => return Ok(literal),
                Some(c) => literal.push(c),
            }
        }
    }

    /// Everything up to the next newline or end of input; the newline is
    /// consumed but not returned
    fn consume_rest_of_line(&mut self) -> String {
        let mut line = String::new();
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
            line.push(c);
        }
        line
    }
}

/// Whether `c` ends a bareword: whitespace or one of `-`, `#`, `:`
fn is_break(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '#' | ':')
}
