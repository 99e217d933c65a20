//! Message table loading and lookup
//!
//! A [`MessageTable`] is the parsed form of one locale file: a mapping
//! from identifier to entry, with the file's section structure kept for
//! reporting. Tables are loaded once and never mutated; lookup resolves
//! placeholders recursively against the same table.

use crate::error::{ParseError, ParseResult, ResolveError, ResolveResult};
use crate::syntax::{self, Line, Placeholder};
use std::collections::HashMap;

/// One parsed entry (message or term) of a locale file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The identifier, including the leading `-` for terms
    pub id: String,
    /// Template text, placeholders unexpanded
    pub text: String,
    /// 1-based line number of the definition
    pub line: usize,
    /// Index into [`MessageTable::sections`], if the entry sits under a
    /// `##` heading
    pub section: Option<usize>,
    /// Single-`#` comment lines immediately preceding the entry
    pub comment: Option<String>,
    /// Placeholders found in the template, in order of appearance
    pub placeholders: Vec<Placeholder>,
}

impl Entry {
    /// Whether this entry is a term (never displayed directly)
    pub fn is_term(&self) -> bool {
        self.id.starts_with('-')
    }
}

/// A `##` section heading and the entries defined under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text
    pub name: String,
    /// Identifiers defined under this heading, in file order
    pub ids: Vec<String>,
}

/// An immutable table of localized messages and terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    entries: HashMap<String, Entry>,
    /// All identifiers in file order
    order: Vec<String>,
    sections: Vec<Section>,
}

impl MessageTable {
    /// Parse a locale file into a table
    ///
    /// Fails on the first syntax error, duplicate identifier, or
    /// malformed placeholder, carrying the line number.
    pub fn parse(source: &str) -> ParseResult<Self> {
        let mut table = Self::default();
        let mut pending_comment: Option<String> = None;

        for (index, raw) in source.lines().enumerate() {
            let number = index + 1;
            match syntax::parse_line(raw, number)? {
                Line::Blank => {
                    pending_comment = None;
                }
                Line::Comment(text) => {
                    pending_comment = Some(match pending_comment.take() {
                        Some(prev) => format!("{prev}\n{text}"),
                        None => text,
                    });
                }
                Line::Section(name) => {
                    table.sections.push(Section {
                        name,
                        ids: Vec::new(),
                    });
                    pending_comment = None;
                }
                Line::Entry { id, text } => {
                    if let Some(existing) = table.entries.get(&id) {
                        let first_line = existing.line;
                        return Err(ParseError::DuplicateIdentifier {
                            line: number,
                            id,
                            first_line,
                        });
                    }
                    let placeholders = syntax::scan_placeholders(&id, &text, number)?;
                    let section = match table.sections.len() {
                        0 => None,
                        count => {
                            table.sections[count - 1].ids.push(id.clone());
                            Some(count - 1)
                        }
                    };
                    table.entries.insert(
                        id.clone(),
                        Entry {
                            id: id.clone(),
                            text,
                            line: number,
                            section,
                            comment: pending_comment.take(),
                            placeholders,
                        },
                    );
                    table.order.push(id);
                }
            }
        }

        Ok(table)
    }

    /// Number of entries (messages and terms)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether an identifier (message or term) is defined
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Look up an entry without resolving it
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// All identifiers, in file order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Message identifiers (terms excluded), in file order
    pub fn message_ids(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .map(String::as_str)
            .filter(|id| !id.starts_with('-'))
    }

    /// The file's `##` sections, in order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Report every placeholder that references an undefined identifier
    ///
    /// An empty result means every reference in the table can be
    /// resolved (cycles aside, which [`Self::resolve`] reports).
    pub fn validate(&self) -> Vec<ResolveError> {
        let mut problems = Vec::new();
        for id in &self.order {
            let Some(entry) = self.entries.get(id) else {
                continue;
            };
            for placeholder in &entry.placeholders {
                if !self.entries.contains_key(&placeholder.target) {
                    problems.push(ResolveError::DanglingReference {
                        id: id.clone(),
                        target: placeholder.target.clone(),
                    });
                }
            }
        }
        problems
    }

    /// Resolve a message to display text, substituting placeholders
    ///
    /// Never returns an empty string for a defined message (the parser
    /// rejects empty text), and never silently swallows a missing key.
    pub fn resolve(&self, id: &str) -> ResolveResult<String> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| ResolveError::MissingKey { id: id.to_string() })?;
        if entry.is_term() {
            return Err(ResolveError::TermLookup { id: id.to_string() });
        }
        let mut stack = vec![id.to_string()];
        self.resolve_text(&entry.text, &mut stack)
    }

    /// Expand one template, recursing through referenced entries.
    /// `stack` holds the identifiers currently being resolved, for
    /// cycle detection and error attribution.
    fn resolve_text(&self, text: &str, stack: &mut Vec<String>) -> ResolveResult<String> {
        syntax::expand(text, |placeholder| {
            let current = stack.last().cloned().unwrap_or_default();
            let target = self.entries.get(&placeholder.target).ok_or_else(|| {
                ResolveError::DanglingReference {
                    id: current.clone(),
                    target: placeholder.target.clone(),
                }
            })?;
            if stack.iter().any(|seen| *seen == placeholder.target) {
                return Err(ResolveError::Cycle {
                    id: stack.first().cloned().unwrap_or_default(),
                    path: format!("{} -> {}", stack.join(" -> "), placeholder.target),
                });
            }
            stack.push(placeholder.target.clone());
            let resolved = self.resolve_text(&target.text, stack)?;
            stack.pop();
            Ok(resolved)
        })
    }
}
