//! Error types for the Print UI localization tables
//!
//! This module defines all custom error types used throughout the crate.
//! Error types are organized by category so callers can react to parse
//! failures, lookup failures, and locale selection failures separately.

use std::path::PathBuf;
use thiserror::Error;

/// Main localization error type encompassing all error categories
#[derive(Error, Debug)]
pub enum L10nError {
    /// Locale file parsing errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Message resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Locale selection errors
    #[error(transparent)]
    Locale(#[from] LocaleError),

    /// Locale directory checking errors
    #[error(transparent)]
    Check(#[from] CheckError),
}

/// Locale file parsing errors
///
/// Every variant carries the 1-based line number where the problem was
/// found so translators can jump straight to the offending line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Line is neither a comment, a blank line, nor an `id = text` entry
    #[error("line {line}: expected `identifier = text`")]
    MissingEquals { line: usize },

    /// Identifier does not match the allowed grammar
    #[error("line {line}: invalid identifier `{id}`")]
    InvalidIdentifier { line: usize, id: String },

    /// Entry text is empty
    #[error("line {line}: empty text for `{id}`")]
    EmptyText { line: usize, id: String },

    /// The same identifier is defined twice in one file
    #[error("line {line}: duplicate definition of `{id}` (first defined on line {first_line})")]
    DuplicateIdentifier {
        line: usize,
        id: String,
        first_line: usize,
    },

    /// A `{` was opened but never closed, or a stray `}` was found
    #[error("line {line}: unterminated placeholder in text for `{id}`")]
    UnterminatedPlaceholder { line: usize, id: String },

    /// Placeholder braces contain something that is not an identifier
    #[error("line {line}: invalid placeholder `{placeholder}` in text for `{id}`")]
    InvalidPlaceholder {
        line: usize,
        id: String,
        placeholder: String,
    },
}

/// Message resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No entry with this identifier exists in the table
    #[error("no message with identifier `{id}`")]
    MissingKey { id: String },

    /// The identifier names a term; terms are substituted, never shown
    #[error("`{id}` is a term and cannot be displayed directly")]
    TermLookup { id: String },

    /// A placeholder referenced an identifier that is not in the table
    #[error("message `{id}` references `{target}`, which is not defined")]
    DanglingReference { id: String, target: String },

    /// Substitution would recurse forever
    #[error("reference cycle while resolving `{id}`: {path}")]
    Cycle { id: String, path: String },
}

/// Locale selection errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The language tag does not correspond to a bundled locale
    #[error("unsupported locale `{tag}`")]
    Unsupported { tag: String },
}

/// Locale directory checking errors (used by the `l10n-check` binary)
#[derive(Error, Debug)]
pub enum CheckError {
    /// The locale directory could not be read
    #[error("could not read locale directory: {path}")]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A locale file could not be read
    #[error("could not read locale file: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The base locale has no file in the directory
    #[error("base locale `{locale}` not found in {path}")]
    MissingBase { locale: String, path: PathBuf },

    /// The base locale file itself failed to parse
    #[error("base locale `{locale}` failed to parse: {source}")]
    BadBase {
        locale: String,
        #[source]
        source: ParseError,
    },

    /// No locale files were found at all
    #[error("no .ftl files found in {path}")]
    NoLocales { path: PathBuf },
}

/// Result type alias for operations that can fail with any localization error
pub type L10nResult<T> = Result<T, L10nError>;

/// Result type alias for locale file parsing
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for message resolution
pub type ResolveResult<T> = Result<T, ResolveError>;

impl ParseError {
    /// The 1-based line number the error refers to
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingEquals { line }
            | ParseError::InvalidIdentifier { line, .. }
            | ParseError::EmptyText { line, .. }
            | ParseError::DuplicateIdentifier { line, .. }
            | ParseError::UnterminatedPlaceholder { line, .. }
            | ParseError::InvalidPlaceholder { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::MissingEquals { line: 7 };
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_parse_error_line() {
        let err = ParseError::DuplicateIdentifier {
            line: 12,
            id: "common-menu-copy".to_string(),
            first_line: 3,
        };
        assert_eq!(err.line(), 12);
    }

    #[test]
    fn test_resolve_error_display() {
        let err = ResolveError::MissingKey {
            id: "common-menu-file-print".to_string(),
        };
        assert!(err.to_string().contains("common-menu-file-print"));
    }

    #[test]
    fn test_l10n_error_from_resolve_error() {
        let resolve_err = ResolveError::TermLookup {
            id: "-app-name".to_string(),
        };
        let l10n_err: L10nError = resolve_err.into();
        assert!(matches!(l10n_err, L10nError::Resolve(_)));
    }
}
