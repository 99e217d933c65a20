//! Line grammar for the flat locale-file format
//!
//! Each non-blank line of a locale file is one of:
//! - `# text` — a comment attached to the next entry (or the file header)
//! - `## text` — a section heading grouping the entries that follow
//! - `identifier = text` — a message definition
//! - `-identifier = text` — a term definition (substitutable, never shown)
//!
//! Message text may embed placeholders of the form `{ identifier }` or
//! `{ -identifier }`; `{{` and `}}` escape literal braces.

use crate::error::{ParseError, ParseResult, ResolveResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Grammar for identifiers: a letter, then letters, digits, `-`, `_`.
/// Terms carry a single leading `-`.
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[A-Za-z][A-Za-z0-9_-]*$").unwrap());

/// Matches an escaped brace or one placeholder. Escapes come first in
/// the alternation so `{{` never opens a placeholder.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{|\}\}|\{\s*(-?[A-Za-z][A-Za-z0-9_-]*)\s*\}").unwrap());

/// One classified line of a locale file
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    /// Empty or whitespace-only line
    Blank,
    /// Single-`#` comment text (without the marker)
    Comment(String),
    /// `##` section heading text (without the marker)
    Section(String),
    /// A message or term definition
    Entry { id: String, text: String },
}

/// A placeholder found in message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The referenced identifier, including the leading `-` for terms
    pub target: String,
}

impl Placeholder {
    /// Whether this placeholder references a term
    pub fn is_term(&self) -> bool {
        self.target.starts_with('-')
    }
}

/// Check an identifier against the grammar
pub(crate) fn is_valid_identifier(id: &str) -> bool {
    IDENTIFIER_RE.is_match(id)
}

/// Classify one raw line. `number` is the 1-based line number used in
/// parse errors.
pub(crate) fn parse_line(raw: &str, number: usize) -> ParseResult<Line> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if let Some(rest) = line.strip_prefix("##") {
        return Ok(Line::Section(rest.trim().to_string()));
    }
    if let Some(rest) = line.strip_prefix('#') {
        return Ok(Line::Comment(rest.trim().to_string()));
    }

    let (id, text) = line
        .split_once('=')
        .ok_or(ParseError::MissingEquals { line: number })?;
    let id = id.trim();
    let text = text.trim();

    if !is_valid_identifier(id) {
        return Err(ParseError::InvalidIdentifier {
            line: number,
            id: id.to_string(),
        });
    }
    if text.is_empty() {
        return Err(ParseError::EmptyText {
            line: number,
            id: id.to_string(),
        });
    }

    Ok(Line::Entry {
        id: id.to_string(),
        text: text.to_string(),
    })
}

/// Extract every placeholder from message text, validating brace syntax.
///
/// `id` and `line` are only used for error reporting.
pub(crate) fn scan_placeholders(
    id: &str,
    text: &str,
    line: usize,
) -> ParseResult<Vec<Placeholder>> {
    let mut placeholders = Vec::new();
    let mut cursor = 0;

    for caps in PLACEHOLDER_RE.captures_iter(text) {
        // Group 0 is the whole match and is always present
        let whole = caps.get(0).unwrap();
        check_gap(id, text, cursor, whole.start(), line)?;
        cursor = whole.end();

        if let Some(target) = caps.get(1) {
            placeholders.push(Placeholder {
                target: target.as_str().to_string(),
            });
        }
        // `{{` / `}}` matches have no capture group and need no action here
    }
    check_gap(id, text, cursor, text.len(), line)?;

    Ok(placeholders)
}

/// Reject stray braces in `text[start..end]`, the span between two
/// recognized placeholders/escapes
fn check_gap(id: &str, text: &str, start: usize, end: usize, line: usize) -> ParseResult<()> {
    let Some(brace) = text[start..end].find(['{', '}']) else {
        return Ok(());
    };
    let offset = start + brace;
    if text.as_bytes()[offset] == b'{' {
        // An opening brace the placeholder pattern rejected: if it is
        // closed on this line the contents are malformed, otherwise the
        // placeholder was never terminated.
        if let Some(close) = text[offset..].find('}') {
            return Err(ParseError::InvalidPlaceholder {
                line,
                id: id.to_string(),
                placeholder: text[offset..offset + close + 1].trim().to_string(),
            });
        }
    }
    Err(ParseError::UnterminatedPlaceholder {
        line,
        id: id.to_string(),
    })
}

/// Rewrite message text, replacing each placeholder via `subst` and
/// unescaping `{{`/`}}`.
///
/// Assumes the text already passed [`scan_placeholders`], so anything
/// between matches is literal.
pub(crate) fn expand<F>(text: &str, mut subst: F) -> ResolveResult<String>
where
    F: FnMut(&Placeholder) -> ResolveResult<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for caps in PLACEHOLDER_RE.captures_iter(text) {
        // Group 0 is the whole match and is always present
        let whole = caps.get(0).unwrap();
        out.push_str(&text[cursor..whole.start()]);
        cursor = whole.end();

        match caps.get(1) {
            Some(target) => {
                let placeholder = Placeholder {
                    target: target.as_str().to_string(),
                };
                out.push_str(&subst(&placeholder)?);
            }
            None => match whole.as_str() {
                "{{" => out.push('{'),
                _ => out.push('}'),
            },
        }
    }
    out.push_str(&text[cursor..]);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line("", 1), Ok(Line::Blank));
        assert_eq!(parse_line("   ", 2), Ok(Line::Blank));
        assert_eq!(
            parse_line("# a note", 3),
            Ok(Line::Comment("a note".to_string()))
        );
        assert_eq!(
            parse_line("## File menu", 4),
            Ok(Line::Section("File menu".to_string()))
        );
    }

    #[test]
    fn test_message_and_term_entries() {
        assert_eq!(
            parse_line("common-menu-file-menu = 文件", 5),
            Ok(Line::Entry {
                id: "common-menu-file-menu".to_string(),
                text: "文件".to_string(),
            })
        );
        assert_eq!(
            parse_line("-app-name = Print UI", 6),
            Ok(Line::Entry {
                id: "-app-name".to_string(),
                text: "Print UI".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_equals() {
        assert_eq!(
            parse_line("common-menu-file-menu", 9),
            Err(ParseError::MissingEquals { line: 9 })
        );
    }

    #[test]
    fn test_invalid_identifier() {
        let err = parse_line("3menu = File", 2);
        assert_eq!(
            err,
            Err(ParseError::InvalidIdentifier {
                line: 2,
                id: "3menu".to_string(),
            })
        );
        // A doubled leading dash is not a term
        assert!(parse_line("--app-name = Print UI", 3).is_err());
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(
            parse_line("common-menu-file-menu = ", 4),
            Err(ParseError::EmptyText {
                line: 4,
                id: "common-menu-file-menu".to_string(),
            })
        );
    }

    #[test]
    fn test_scan_term_placeholder() {
        let found = scan_placeholders("macos-menu-about-app", "关于 { -app-name }", 1).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target, "-app-name");
        assert!(found[0].is_term());
    }

    #[test]
    fn test_scan_message_placeholder() {
        let found = scan_placeholders("x", "see { common-menu-file-menu }", 1).unwrap();
        assert_eq!(found[0].target, "common-menu-file-menu");
        assert!(!found[0].is_term());
    }

    #[test]
    fn test_scan_tight_braces() {
        // Whitespace inside the braces is optional
        let found = scan_placeholders("x", "{-app-name}", 1).unwrap();
        assert_eq!(found[0].target, "-app-name");
    }

    #[test]
    fn test_scan_escaped_braces() {
        let found = scan_placeholders("x", "literal {{braces}} here", 1).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_scan_unterminated_placeholder() {
        let err = scan_placeholders("x", "broken { -app-name", 8);
        assert_eq!(
            err,
            Err(ParseError::UnterminatedPlaceholder {
                line: 8,
                id: "x".to_string(),
            })
        );
    }

    #[test]
    fn test_scan_stray_closing_brace() {
        assert!(scan_placeholders("x", "stray } here", 1).is_err());
    }

    #[test]
    fn test_scan_invalid_placeholder_contents() {
        let err = scan_placeholders("x", "bad { two words }", 3);
        assert_eq!(
            err,
            Err(ParseError::InvalidPlaceholder {
                line: 3,
                id: "x".to_string(),
                placeholder: "{ two words }".to_string(),
            })
        );
    }

    #[test]
    fn test_expand_substitutes_and_unescapes() {
        let text = "关于 { -app-name } {{v}}";
        let out = expand(text, |p| {
            assert_eq!(p.target, "-app-name");
            Ok("Print UI".to_string())
        })
        .unwrap();
        assert_eq!(out, "关于 Print UI {v}");
    }

    #[test]
    fn test_expand_without_placeholders() {
        let out = expand("文件", |_| unreachable!()).unwrap();
        assert_eq!(out, "文件");
    }

    #[test]
    fn test_identifier_grammar() {
        assert!(is_valid_identifier("common-menu-file-save"));
        assert!(is_valid_identifier("-app-name"));
        assert!(is_valid_identifier("win_menu"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("-"));
        assert!(!is_valid_identifier("9lives"));
        assert!(!is_valid_identifier("has space"));
    }
}
