//! Error types for command resolution and option parsing.

use thiserror::Error;

/// Errors raised while resolving the command keyword of a script line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No vocabulary keyword is a prefix of the line.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Errors raised by the option tokenizer.
///
/// Each variant carries the byte offset of the offending character within the
/// original option string, even when the failure surfaces while re-parsing
/// the tail of an unterminated quoted value. All variants are terminal for
/// the current line; the
/// grammar is deterministic, so a malformed line can never succeed on retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An option unit did not start with a dash, or a dash carried no key
    /// characters before its key/value boundary (the `"- "` pattern).
    #[error("expected an option key after '-' at offset {at}")]
    UnbalancedDash { at: usize },

    /// A dash in a position the grammar forbids: a second dash while still
    /// reading keys (`--`, `-X-`), or a dash directly after a non-space value
    /// character (missing unit separator).
    #[error("misplaced '-' at offset {at}")]
    MisplacedDash { at: usize },

    /// A quote character while reading keys, or before any dash was seen.
    #[error("misplaced quote at offset {at}")]
    MisplacedQuote { at: usize },

    /// An escape character while reading keys, or before any dash was seen.
    #[error("misplaced escape character at offset {at}")]
    MisplacedEscape { at: usize },

    /// An unterminated quoted value whose trailing text cannot be split into
    /// a valid continuation (a dash not preceded by a space).
    #[error("unterminated quote: unexpected '-' at offset {at}")]
    UnbalancedQuote { at: usize },
}
