//! Command resolution and script parsing.
//!
//! A script is plain text, one command per line. The resolver matches the
//! longest registered keyword that prefixes the line and hands the remainder
//! to that command's parser (which runs the option tokenizer). The top-level
//! entry points are [`parse_str`] and [`parse_file`].

use crate::command::Command;
use crate::commands::{Click, GoPage, Refresh, SetField, Sleep, WaitElement, WaitPage};
use crate::error::ResolveError;
use anyhow::{Context as _, Result};
use std::path::Path;

type ParseFn = fn(&str) -> Result<Box<dyn Command>>;

/// The command vocabulary. Resolution is longest-prefix, so entry order does
/// not matter; `wait page` wins over a hypothetical `wait` for lines that
/// start with it.
static REGISTRY: &[(&str, ParseFn)] = &[
    (GoPage::NAME, GoPage::parse_boxed),
    (Refresh::NAME, Refresh::parse_boxed),
    (Click::NAME, Click::parse_boxed),
    (WaitPage::NAME, WaitPage::parse_boxed),
    (WaitElement::NAME, WaitElement::parse_boxed),
    (SetField::NAME, SetField::parse_boxed),
    (Sleep::NAME, Sleep::parse_boxed),
];

/// Find the longest vocabulary keyword that is a prefix of `line`.
///
/// Returns the winning entry and the remainder of the line with the leading
/// keyword removed. The scan is order-independent: every entry is considered
/// and the longest match wins. Equal-length ties cannot occur in a
/// prefix-distinct vocabulary; if a caller constructs one anyway, the entry
/// seen first wins.
///
/// # Errors
///
/// [`ResolveError::UnknownCommand`] when no keyword prefixes the line.
pub fn resolve<'a, T>(
    line: &'a str,
    vocabulary: &'a [(&'static str, T)],
) -> Result<(&'a (&'static str, T), &'a str), ResolveError> {
    let mut best: Option<&(&'static str, T)> = None;
    for entry in vocabulary {
        if line.starts_with(entry.0) && best.is_none_or(|b| entry.0.len() > b.0.len()) {
            best = Some(entry);
        }
    }
    match best {
        Some(entry) => Ok((entry, &line[entry.0.len()..])),
        None => Err(ResolveError::UnknownCommand(line.to_string())),
    }
}

/// Resolve and parse a single non-empty, non-comment script line.
pub fn parse_line(line: &str) -> Result<Box<dyn Command>> {
    let (&(keyword, parse), remainder) = resolve(line, REGISTRY)?;
    tracing::debug!(keyword, remainder, "resolved command keyword");
    parse(remainder)
}

/// Parse a pagescript script from a string slice and return the resulting
/// commands.
///
/// Lines are `\n` or `\r\n` separated. Lines that are empty after trimming,
/// or that start with `--`, are comments and skipped.
///
/// # Errors
///
/// Returns an error if any line has no matching command keyword or a
/// malformed option string. The error context names the line number and the
/// line text.
///
/// # Example
///
/// ```
/// use pagescript::parse_str;
///
/// let commands = parse_str("goPage -p /login\nclick -b id -s submit\n").unwrap();
/// assert_eq!(commands.len(), 2);
/// ```
pub fn parse_str(script: &str) -> Result<Vec<Box<dyn Command>>> {
    let mut commands = Vec::new();
    for (line_num, line) in script.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }
        let cmd = parse_line(line)
            .with_context(|| format!("Failed to parse line {}: {}", line_num + 1, line))?;
        commands.push(cmd);
    }
    Ok(commands)
}

/// Parse a pagescript script from a file.
///
/// Reads the entire file into memory and delegates to [`parse_str`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or if the script is malformed.
///
/// # Example
///
/// ```no_run
/// use pagescript::parse_file;
///
/// let commands = parse_file("login.pagescript").unwrap();
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Box<dyn Command>>> {
    let path = path.as_ref();
    let script = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script file: {}", path.display()))?;
    parse_str(&script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_longest_prefix() {
        let vocab: &[(&str, ())] = &[("wait", ()), ("wait page", ()), ("wait element", ())];
        let (entry, rest) = resolve("wait page -p /home -r", vocab).unwrap();
        assert_eq!(entry.0, "wait page");
        assert_eq!(rest, " -p /home -r");
    }

    #[test]
    fn test_resolve_is_order_independent() {
        let forward: &[(&str, ())] = &[("wait", ()), ("wait page", ())];
        let backward: &[(&str, ())] = &[("wait page", ()), ("wait", ())];
        assert_eq!(resolve("wait page -p /x", forward).unwrap().0.0, "wait page");
        assert_eq!(resolve("wait page -p /x", backward).unwrap().0.0, "wait page");
    }

    #[test]
    fn test_resolve_whole_line_keyword() {
        let vocab: &[(&str, ())] = &[("refresh", ())];
        let (entry, rest) = resolve("refresh", vocab).unwrap();
        assert_eq!(entry.0, "refresh");
        assert_eq!(rest, "");
    }

    #[test]
    fn test_resolve_unknown_command() {
        let vocab: &[(&str, ())] = &[("click", ())];
        assert_eq!(
            resolve("tap -b id -s x", vocab),
            Err(ResolveError::UnknownCommand("tap -b id -s x".into()))
        );
    }

    #[test]
    fn test_parse_all_commands() {
        let cmds = parse_str(
            "goPage -p /login\n\
             refresh\n\
             click -b id -s submit\n\
             wait page -p /home -r\n\
             wait element -b id -s banner -c visible\n\
             set field -b name -s user -v alice\n\
             sleep -t 250\n",
        )
        .unwrap();
        assert_eq!(cmds.len(), 7);
        assert_eq!(cmds[0].name(), "goPage");
        assert_eq!(cmds[1].name(), "refresh");
        assert_eq!(cmds[2].name(), "click");
        assert_eq!(cmds[3].name(), "wait page");
        assert_eq!(cmds[4].name(), "wait element");
        assert_eq!(cmds[5].name(), "set field");
        assert_eq!(cmds[6].name(), "sleep");
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let cmds = parse_str("-- a comment\n\n   \nrefresh\n--another\n").unwrap();
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn test_parse_crlf_lines() {
        let cmds = parse_str("refresh\r\nsleep -t 100\r\n").unwrap();
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn test_parse_unknown_command_names_line() {
        let err = parse_str("refresh\ntap -b id -s x\n").err().unwrap();
        let msg = format!("{err:#}");
        assert!(msg.contains("line 2"), "got: {msg}");
        assert!(msg.contains("unknown command"), "got: {msg}");
    }

    #[test]
    fn test_parse_malformed_options_rejected() {
        assert!(parse_str("click -b id -s-\n").is_err());
    }
}
