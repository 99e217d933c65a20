//! Locale directory checking for the `l10n-check` tool
//!
//! Scans a directory of `.ftl` files and compares every locale against
//! the base locale: parse failures, dangling references, resolution
//! failures, key-set differences, and entries whose text is identical
//! to the base (probable untranslated placeholders).

use crate::error::CheckError;
use crate::table::MessageTable;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Findings for one locale file
#[derive(Debug, Clone, Serialize)]
pub struct LocaleReport {
    /// Locale name (the file stem, e.g. `zh-CN`)
    pub locale: String,
    /// The file that was checked
    pub path: PathBuf,
    /// Number of messages (terms excluded) in the file
    pub messages: usize,
    /// Set when the file failed to parse; all other findings are empty
    pub parse_error: Option<String>,
    /// Placeholders referencing undefined identifiers
    pub dangling: Vec<String>,
    /// Messages that failed to resolve (cycles and the like)
    pub resolve_errors: Vec<String>,
    /// Identifiers the base locale defines but this file does not;
    /// these fall back at runtime, so informational only
    pub missing_keys: Vec<String>,
    /// Identifiers this file defines but the base locale does not
    pub extra_keys: Vec<String>,
    /// Messages whose resolved text equals the base locale's —
    /// either untranslated placeholders or deliberate carryovers
    pub same_as_base: Vec<String>,
}

impl LocaleReport {
    /// Whether this locale should fail the check
    ///
    /// Missing keys and base-identical text are informational;
    /// everything else blocks.
    pub fn has_errors(&self) -> bool {
        self.parse_error.is_some()
            || !self.dangling.is_empty()
            || !self.resolve_errors.is_empty()
            || !self.extra_keys.is_empty()
    }
}

/// Findings across a whole locale directory
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// The base locale every file was compared against
    pub base: String,
    /// Per-locale findings, base first, then file order
    pub locales: Vec<LocaleReport>,
}

impl CheckReport {
    /// Whether any locale should fail the check
    pub fn has_errors(&self) -> bool {
        self.locales.iter().any(LocaleReport::has_errors)
    }
}

/// Check every `.ftl` file under `dir` against the base locale
pub fn check_dir(dir: &Path, base_locale: &str) -> Result<CheckReport, CheckError> {
    let files = find_locale_files(dir)?;
    if files.is_empty() {
        return Err(CheckError::NoLocales {
            path: dir.to_path_buf(),
        });
    }

    let base_path = files
        .iter()
        .find(|(locale, _)| locale == base_locale)
        .map(|(_, path)| path.clone())
        .ok_or_else(|| CheckError::MissingBase {
            locale: base_locale.to_string(),
            path: dir.to_path_buf(),
        })?;
    let base_source = read_locale_file(&base_path)?;
    let base_table =
        MessageTable::parse(&base_source).map_err(|source| CheckError::BadBase {
            locale: base_locale.to_string(),
            source,
        })?;

    // Resolved base texts, for the untranslated-entry comparison
    let mut base_text: HashMap<&str, String> = HashMap::new();
    for id in base_table.message_ids() {
        if let Ok(text) = base_table.resolve(id) {
            base_text.insert(id, text);
        }
    }

    let mut locales = Vec::with_capacity(files.len());
    for (locale, path) in &files {
        let source = read_locale_file(path)?;
        locales.push(check_source(
            locale,
            path,
            &source,
            &base_table,
            &base_text,
            locale == base_locale,
        ));
    }
    // Base first, then file order
    locales.sort_by_key(|report| report.locale != base_locale);

    Ok(CheckReport {
        base: base_locale.to_string(),
        locales,
    })
}

/// Check one already-read locale source against the base table
pub fn check_source(
    locale: &str,
    path: &Path,
    source: &str,
    base_table: &MessageTable,
    base_text: &HashMap<&str, String>,
    is_base: bool,
) -> LocaleReport {
    let mut report = LocaleReport {
        locale: locale.to_string(),
        path: path.to_path_buf(),
        messages: 0,
        parse_error: None,
        dangling: Vec::new(),
        resolve_errors: Vec::new(),
        missing_keys: Vec::new(),
        extra_keys: Vec::new(),
        same_as_base: Vec::new(),
    };

    let table = match MessageTable::parse(source) {
        Ok(table) => table,
        Err(err) => {
            report.parse_error = Some(err.to_string());
            return report;
        }
    };
    report.messages = table.message_ids().count();

    for problem in table.validate() {
        report.dangling.push(problem.to_string());
    }

    for id in table.message_ids() {
        match table.resolve(id) {
            Ok(text) => {
                if !is_base && base_text.get(id).is_some_and(|base| *base == text) {
                    report.same_as_base.push(id.to_string());
                }
            }
            Err(err) => {
                // validate() already lists dangling references
                if matches!(err, crate::error::ResolveError::Cycle { .. }) {
                    report.resolve_errors.push(err.to_string());
                }
            }
        }
    }

    if !is_base {
        for id in base_table.ids() {
            if !table.contains(id) {
                report.missing_keys.push(id.to_string());
            }
        }
        for id in table.ids() {
            if !base_table.contains(id) {
                report.extra_keys.push(id.to_string());
            }
        }
    }

    report
}

/// Collect `(locale, path)` pairs for every `.ftl` file under `dir`
fn find_locale_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, CheckError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| CheckError::DirectoryError {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("ftl") {
            continue;
        }
        let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        log::debug!("found locale file {}", path.display());
        files.push((locale.to_string(), path.to_path_buf()));
    }
    Ok(files)
}

fn read_locale_file(path: &Path) -> Result<String, CheckError> {
    fs::read_to_string(path).map_err(|source| CheckError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}
