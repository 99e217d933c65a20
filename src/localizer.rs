//! Process-wide localization state and the `fl!` macro
//!
//! A [`Localizer`] pairs the active locale's table with its fallback
//! chain (ending at the `en-US` base). The process-wide instance is
//! initialized from system settings on first use; `init_with_locale`
//! replaces it for an explicit override.

use crate::error::{L10nResult, ResolveError, ResolveResult};
use crate::locale::{Locale, DEFAULT_LOCALE};
use crate::table::MessageTable;
use once_cell::sync::Lazy;
use std::sync::RwLock;

/// The process-wide localizer, built from the system locale on first
/// access
static LOCALIZER: Lazy<RwLock<Localizer>> = Lazy::new(|| {
    RwLock::new(Localizer::from_system().unwrap_or_else(|err| {
        log::error!("could not load bundled locale tables: {err}");
        Localizer::empty()
    }))
});

/// A locale's message table together with its fallback chain
#[derive(Debug, Clone)]
pub struct Localizer {
    locale: Locale,
    primary: MessageTable,
    fallbacks: Vec<(Locale, MessageTable)>,
}

impl Localizer {
    /// Build a localizer for an explicit locale
    pub fn new(locale: Locale) -> L10nResult<Self> {
        let primary = locale.table()?;
        let mut fallbacks = Vec::new();
        for fallback in locale.fallbacks() {
            fallbacks.push((*fallback, fallback.table()?));
        }
        Ok(Self {
            locale,
            primary,
            fallbacks,
        })
    }

    /// Build a localizer from the detected system locale
    pub fn from_system() -> L10nResult<Self> {
        Self::new(Locale::detect())
    }

    /// A localizer with no tables; every lookup misses
    fn empty() -> Self {
        Self {
            locale: DEFAULT_LOCALE,
            primary: MessageTable::default(),
            fallbacks: Vec::new(),
        }
    }

    /// The active locale
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolve a message, consulting the fallback chain on a miss
    ///
    /// Only a key absent from every table is a missing-key error;
    /// other resolution errors surface from the table that defines
    /// the key.
    pub fn lookup(&self, id: &str) -> ResolveResult<String> {
        match self.primary.resolve(id) {
            Err(ResolveError::MissingKey { .. }) => {
                for (locale, table) in &self.fallbacks {
                    match table.resolve(id) {
                        Err(ResolveError::MissingKey { .. }) => continue,
                        outcome => {
                            log::debug!("`{id}` fell back from {} to {locale}", self.locale);
                            return outcome;
                        }
                    }
                }
                Err(ResolveError::MissingKey { id: id.to_string() })
            }
            outcome => outcome,
        }
    }
}

/// Force initialization of the process-wide localizer from system
/// settings and return the locale it picked
pub fn init() -> Locale {
    current_locale()
}

/// Replace the process-wide localizer with an explicit locale
pub fn init_with_locale(locale: Locale) -> L10nResult<()> {
    let replacement = Localizer::new(locale)?;
    let mut guard = LOCALIZER.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = replacement;
    Ok(())
}

/// The locale of the process-wide localizer
pub fn current_locale() -> Locale {
    LOCALIZER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .locale()
}

/// Resolve a message against the process-wide localizer
pub fn lookup(id: &str) -> ResolveResult<String> {
    LOCALIZER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .lookup(id)
}

/// Resolve a message, falling back to the raw identifier on any miss
///
/// The fallback keeps missing translations visible in the UI instead
/// of rendering empty labels; the miss is also logged.
pub fn translate(id: &str) -> String {
    match lookup(id) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("localization miss: {err}");
            id.to_string()
        }
    }
}

/// Look up a localized menu label by identifier
///
/// Expands to a `String`. On a miss the raw identifier is returned so
/// untranslated keys stay visible during development.
#[macro_export]
macro_rules! fl {
    ($message_id:expr) => {
        $crate::localizer::translate($message_id)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn test_lookup_primary_locale() {
        let localizer = Localizer::new(Locale::ZhCn).unwrap();
        assert_eq!(localizer.locale(), Locale::ZhCn);
        assert_eq!(
            localizer.lookup("macos-menu-about-app").unwrap(),
            "关于 Print UI"
        );
    }

    #[test]
    fn test_lookup_miss_is_an_error() {
        let localizer = Localizer::new(Locale::ZhCn).unwrap();
        assert_eq!(
            localizer.lookup("common-menu-file-print"),
            Err(ResolveError::MissingKey {
                id: "common-menu-file-print".to_string(),
            })
        );
    }

    #[test]
    fn test_fallback_chain_consulted() {
        let primary = MessageTable::parse("common-menu-file-menu = 文件\n").unwrap();
        let base = Locale::EnUs.table().unwrap();
        let localizer = Localizer {
            locale: Locale::ZhCn,
            primary,
            fallbacks: vec![(Locale::EnUs, base)],
        };
        // Present in the primary table
        assert_eq!(localizer.lookup("common-menu-file-menu").unwrap(), "文件");
        // Absent from the primary table, found in the base
        assert_eq!(localizer.lookup("common-menu-copy").unwrap(), "Copy");
        // Absent everywhere
        assert!(matches!(
            localizer.lookup("common-menu-file-print"),
            Err(ResolveError::MissingKey { .. })
        ));
    }

    #[test]
    fn test_translate_falls_back_to_identifier() {
        crate::localizer::init_with_locale(Locale::ZhCn).unwrap();
        assert_eq!(fl!("macos-menu-quit-app"), "退出 Print UI");
        assert_eq!(fl!("not-a-real-key"), "not-a-real-key");
    }

    #[test]
    fn test_empty_localizer_always_misses() {
        let localizer = Localizer::empty();
        assert!(matches!(
            localizer.lookup("common-menu-file-menu"),
            Err(ResolveError::MissingKey { .. })
        ));
    }
}
