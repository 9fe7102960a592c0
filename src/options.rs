//! Option tokenizer for the pagescript command grammar.
//!
//! The remainder of a script line (everything after the command keyword) is a
//! sequence of units of the form `-K [V]`, where `K` is one or more
//! single-character option keys sharing one following value `V`. Values may
//! be bare, quoted with `"` or `'` (allowing embedded spaces and dashes), and
//! may contain backslash escapes that are decoded once when the value closes.
//!
//! The top-level entry point is [`parse_options`].

use crate::error::ParseError;
use std::collections::HashMap;

/// The result of one parse: decoded option values keyed by their
/// single-character option key. Later occurrences of a key overwrite earlier
/// ones.
pub type OptionMap = HashMap<char, String>;

/// Parse an option string into an [`OptionMap`].
///
/// # Errors
///
/// Returns a [`ParseError`] when the fragment violates the grammar: a dash
/// with no key characters, a double dash while reading keys, a quote or
/// escape character in key position, or a dash directly after a non-space
/// value character. The whole fragment is rejected; no partial map is
/// returned.
///
/// # Example
///
/// ```
/// use pagescript::options::parse_options;
///
/// let opts = parse_options(r#" -b id -s "submit-btn""#).unwrap();
/// assert_eq!(opts[&'b'], "id");
/// assert_eq!(opts[&'s'], "submit-btn");
/// ```
pub fn parse_options(remainder: &str) -> Result<OptionMap, ParseError> {
    let mut map = OptionMap::new();
    let mut input = remainder.to_string();
    let mut base = 0;
    // An unterminated quoted value may carry a trailing `-...` continuation;
    // the tokenizer hands it back as a fresh fragment instead of recursing.
    // `base` is the byte offset of that fragment within `remainder`, so error
    // positions always point into the original string.
    loop {
        match tokenize_into(&input, base, &mut map)? {
            Some((tail, tail_base)) => {
                input = tail;
                base = tail_base;
            }
            None => return Ok(map),
        }
    }
}

/// Position of the state machine within the current unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the dash that opens the next unit.
    AwaitingDash,
    /// Past the dash, collecting option key characters.
    ReadingKeys,
    /// Past the key/value boundary, collecting a bare value.
    ReadingValue,
    /// Inside a quoted value; the field is the quote character that opened it.
    ReadingQuotedValue(char),
}

/// Transient per-call tokenizer state. Created fresh for every fragment and
/// discarded once the fragment is consumed.
struct Tokenizer {
    state: State,
    /// Keys seen since the last value closed; they all share the next value.
    keys: Vec<char>,
    /// Raw (escapes still encoded) characters of the value being read.
    buf: String,
    /// Absolute offset of the quote that opened the current quoted value.
    quote_opened_at: usize,
}

/// Run the state machine over one fragment, merging results into `map`.
///
/// `base` is the fragment's byte offset within the original option string;
/// it is folded into every reported error position. Returns
/// `Some((tail, tail_base))` when an unterminated quoted value ends the
/// fragment and its buffer contains the start of a new unit; the tail must
/// be tokenized again by the caller.
fn tokenize_into(
    input: &str,
    base: usize,
    map: &mut OptionMap,
) -> Result<Option<(String, usize)>, ParseError> {
    let mut tok = Tokenizer {
        state: State::AwaitingDash,
        keys: Vec::new(),
        buf: String::new(),
        quote_opened_at: 0,
    };
    for (at, ch) in input.char_indices() {
        tok.step(base + at, ch, map)?;
    }
    tok.finish(map)
}

impl Tokenizer {
    fn step(&mut self, at: usize, ch: char, map: &mut OptionMap) -> Result<(), ParseError> {
        match self.state {
            State::AwaitingDash => match ch {
                ' ' => {}
                '-' => self.state = State::ReadingKeys,
                '"' | '\'' => return Err(ParseError::MisplacedQuote { at }),
                '\\' => return Err(ParseError::MisplacedEscape { at }),
                _ => return Err(ParseError::UnbalancedDash { at }),
            },
            State::ReadingKeys => match ch {
                ' ' => {
                    if self.keys.is_empty() {
                        return Err(ParseError::UnbalancedDash { at });
                    }
                    self.state = State::ReadingValue;
                }
                '-' => return Err(ParseError::MisplacedDash { at }),
                '"' | '\'' => return Err(ParseError::MisplacedQuote { at }),
                '\\' => return Err(ParseError::MisplacedEscape { at }),
                _ => self.keys.push(ch),
            },
            State::ReadingValue => match ch {
                ' ' => {
                    // Leading spaces after the boundary are dropped; interior
                    // spaces may be meaningful and are kept.
                    if !self.buf.is_empty() {
                        self.buf.push(' ');
                    }
                }
                '-' => {
                    if !self.buf.is_empty() && !self.buf.ends_with(' ') {
                        return Err(ParseError::MisplacedDash { at });
                    }
                    let value = decode_escapes(&self.buf).trim().to_string();
                    self.close_unit(value, map);
                    self.state = State::ReadingKeys;
                }
                '"' | '\'' => {
                    if self.buf.is_empty() {
                        self.state = State::ReadingQuotedValue(ch);
                        self.quote_opened_at = at;
                    } else {
                        self.buf.push(ch);
                    }
                }
                _ => self.buf.push(ch),
            },
            State::ReadingQuotedValue(quote) => {
                if ch == quote && trailing_backslashes_even(&self.buf) {
                    // Quoted values keep their whitespace: no trim here.
                    let value = decode_escapes(&self.buf);
                    self.close_unit(value, map);
                    self.state = State::AwaitingDash;
                } else {
                    self.buf.push(ch);
                }
            }
        }
        Ok(())
    }

    /// Resolve whatever is still pending when the fragment runs out.
    fn finish(mut self, map: &mut OptionMap) -> Result<Option<(String, usize)>, ParseError> {
        if self.keys.is_empty() {
            // A trailing unit-opening dash with no keys is ignored.
            return Ok(None);
        }
        match self.state {
            // Units close before entering this state, so no keys pend here.
            State::AwaitingDash => Ok(None),
            State::ReadingKeys => {
                self.close_unit(String::new(), map);
                Ok(None)
            }
            State::ReadingValue => {
                let value = decode_escapes(&self.buf).trim().to_string();
                self.close_unit(value, map);
                Ok(None)
            }
            State::ReadingQuotedValue(quote) => {
                if self.buf.is_empty() {
                    // A quote opened and abandoned with nothing inside: the
                    // quote character itself is the value. Degenerate, but
                    // deliberate; see the crate docs on recovery behavior.
                    self.close_unit(quote.to_string(), map);
                    return Ok(None);
                }
                // The buffer bytes map one-to-one onto the input bytes just
                // past the opening quote.
                let buf_base = self.quote_opened_at + quote.len_utf8();
                match split_continuation(&self.buf, buf_base)? {
                    Some(idx) => {
                        let value = decode_escapes(self.buf[..idx].trim_end());
                        let tail = self.buf[idx..].to_string();
                        self.close_unit(value, map);
                        Ok(Some((tail, buf_base + idx)))
                    }
                    None => {
                        let value = decode_escapes(&self.buf);
                        self.close_unit(value, map);
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Assign `value` to every pending key and reset for the next unit.
    fn close_unit(&mut self, value: String, map: &mut OptionMap) {
        for &key in &self.keys {
            map.insert(key, value.clone());
        }
        self.keys.clear();
        self.buf.clear();
    }
}

/// Locate the start of a new option unit inside the raw buffer of an
/// unterminated quoted value.
///
/// The split point is the first dash whose directly preceding character is a
/// space, returned as an offset into `buf`. A dash anywhere earlier (at the
/// start of the buffer, or glued to a non-space character) cannot open a unit
/// and rejects the fragment; `base` positions that error within the original
/// option string.
fn split_continuation(buf: &str, base: usize) -> Result<Option<usize>, ParseError> {
    let mut prev = None;
    for (at, ch) in buf.char_indices() {
        if ch == '-' {
            return if prev == Some(' ') {
                Ok(Some(at))
            } else {
                Err(ParseError::UnbalancedQuote { at: base + at })
            };
        }
        prev = Some(ch);
    }
    Ok(None)
}

/// Whether the quote following `buf` is unescaped: true when the run of
/// backslashes at the end of the buffer has even length.
fn trailing_backslashes_even(buf: &str) -> bool {
    buf.chars().rev().take_while(|&c| c == '\\').count() % 2 == 0
}

/// Decode backslash escapes in a completed raw value buffer.
///
/// `\t`, `\n`, `\b`, `\f`, `\r` become their control characters; `\\`, `\"`
/// and `\'` become the escaped character. Any other `\X` is not an error and
/// passes through unchanged, as does a lone trailing backslash.
pub fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('r') => out.push('\r'),
            Some(esc @ ('\\' | '"' | '\'')) => out.push(esc),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
