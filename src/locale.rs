//! Locale selection and bundled locale data
//!
//! The crate ships its locale files compiled in; `en-US` is the base
//! table every other locale falls back to. The active locale is picked
//! from the system settings at startup and can be overridden
//! explicitly.

use crate::error::{LocaleError, ParseResult};
use crate::table::MessageTable;
use std::fmt;
use sys_locale::get_locale;

/// Default locale when the system locale is not supported
pub const DEFAULT_LOCALE: Locale = Locale::EnUs;

/// A locale bundled with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English (United States) — the base locale
    EnUs,
    /// Chinese (Simplified, China)
    ZhCn,
}

impl Locale {
    /// Every bundled locale
    pub const ALL: [Locale; 2] = [Locale::EnUs, Locale::ZhCn];

    /// The canonical language tag
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::ZhCn => "zh-CN",
        }
    }

    /// Parse a language tag into a bundled locale
    ///
    /// Accepts the forms system locales come in: `zh-CN`, `zh_CN`,
    /// `zh_CN.UTF-8`, or a bare `zh`. Region subtags we do not ship a
    /// table for fall back to the language (`en-GB` selects `en-US`).
    pub fn from_tag(tag: &str) -> Result<Self, LocaleError> {
        let unsupported = || LocaleError::Unsupported {
            tag: tag.to_string(),
        };

        let raw = tag.trim();
        if raw.is_empty() {
            return Err(unsupported());
        }
        // Drop any encoding suffix and normalize separators
        let raw = raw
            .split_once('.')
            .map(|(language, _)| language)
            .unwrap_or(raw)
            .replace('_', "-")
            .to_lowercase();

        // C/POSIX is not a real language; let the caller fall back
        if matches!(raw.as_str(), "c" | "posix") {
            return Err(unsupported());
        }

        let language = raw.split('-').next().unwrap_or(&raw);
        match language {
            "en" => Ok(Locale::EnUs),
            "zh" => Ok(Locale::ZhCn),
            _ => Err(unsupported()),
        }
    }

    /// Detect the locale from system settings, falling back to
    /// [`DEFAULT_LOCALE`] when the system locale is missing or not
    /// bundled
    pub fn detect() -> Self {
        match get_locale() {
            Some(tag) => match Self::from_tag(&tag) {
                Ok(locale) => {
                    log::debug!("system locale {tag} -> {locale}");
                    locale
                }
                Err(_) => {
                    log::debug!("system locale {tag} not bundled, using {DEFAULT_LOCALE}");
                    DEFAULT_LOCALE
                }
            },
            None => {
                log::debug!("no system locale, using {DEFAULT_LOCALE}");
                DEFAULT_LOCALE
            }
        }
    }

    /// The bundled locale file source
    pub fn source(self) -> &'static str {
        match self {
            Locale::EnUs => include_str!("../resources/i18n/en-US.ftl"),
            Locale::ZhCn => include_str!("../resources/i18n/zh-CN.ftl"),
        }
    }

    /// Parse the bundled locale file into a table
    pub fn table(self) -> ParseResult<MessageTable> {
        MessageTable::parse(self.source())
    }

    /// Locales consulted, in order, when a key is missing from this
    /// locale's table
    pub fn fallbacks(self) -> &'static [Locale] {
        match self {
            Locale::EnUs => &[],
            Locale::ZhCn => &[Locale::EnUs],
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_variants() {
        assert_eq!(Locale::from_tag("zh-CN"), Ok(Locale::ZhCn));
        assert_eq!(Locale::from_tag("zh_CN.UTF-8"), Ok(Locale::ZhCn));
        assert_eq!(Locale::from_tag("zh"), Ok(Locale::ZhCn));
        assert_eq!(Locale::from_tag("zh-Hans-CN"), Ok(Locale::ZhCn));
        assert_eq!(Locale::from_tag("en-US"), Ok(Locale::EnUs));
        assert_eq!(Locale::from_tag("en-GB"), Ok(Locale::EnUs));
    }

    #[test]
    fn test_from_tag_unsupported() {
        assert!(Locale::from_tag("ko-KR").is_err());
        assert!(Locale::from_tag("C").is_err());
        assert!(Locale::from_tag("POSIX").is_err());
        assert!(Locale::from_tag("").is_err());
    }

    #[test]
    fn test_bundled_tables_parse() {
        for locale in Locale::ALL {
            let table = locale.table().unwrap();
            assert!(!table.is_empty(), "{locale} table is empty");
            assert!(
                table.validate().is_empty(),
                "{locale} table has dangling references"
            );
        }
    }

    #[test]
    fn test_base_covers_every_key() {
        // en-US is the fallback and must define every identifier any
        // other locale defines
        let base = Locale::EnUs.table().unwrap();
        for locale in Locale::ALL {
            let table = locale.table().unwrap();
            for id in table.ids() {
                assert!(base.contains(id), "{locale} defines {id}, missing from en-US");
            }
        }
    }

    #[test]
    fn test_zh_cn_app_name_substitution() {
        let table = Locale::ZhCn.table().unwrap();
        assert_eq!(table.resolve("macos-menu-about-app").unwrap(), "关于 Print UI");
        assert_eq!(table.resolve("macos-menu-application-menu").unwrap(), "Print UI");
    }

    #[test]
    fn test_zh_cn_untranslated_entries() {
        let table = Locale::ZhCn.table().unwrap();
        assert_eq!(table.resolve("common-menu-file-save").unwrap(), "Save");
        assert_eq!(table.resolve("common-menu-view-menu").unwrap(), "View");
        assert_eq!(table.resolve("common-menu-themes-menu").unwrap(), "Themes");
    }

    #[test]
    fn test_detect_returns_bundled_locale() {
        let locale = Locale::detect();
        assert!(Locale::ALL.contains(&locale));
    }

    #[test]
    fn test_fallback_chains() {
        assert!(Locale::EnUs.fallbacks().is_empty());
        assert_eq!(Locale::ZhCn.fallbacks(), &[Locale::EnUs]);
    }
}
