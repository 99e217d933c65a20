//! Menu localization tables for the Print UI editor
//!
//! Provides the localized menu labels the menu layer looks up at render
//! time. Locale files use a flat `identifier = text` format with `#`
//! comments, `##` section headings, term definitions (`-identifier`),
//! and `{ -identifier }` substitution placeholders. Tables are loaded
//! once at startup and are immutable afterwards.
//!
//! Typical use from the menu layer:
//!
//! ```
//! use print_ui_l10n::{fl, localizer, Locale};
//!
//! localizer::init_with_locale(Locale::ZhCn).unwrap();
//! assert_eq!(fl!("common-menu-file-menu"), "文件");
//! assert_eq!(fl!("macos-menu-about-app"), "关于 Print UI");
//! ```
//!
//! A key missing from every table is an explicit error at the
//! [`table::MessageTable`] API; the [`fl!`] macro instead returns the
//! raw identifier (and logs a warning) so missing translations stay
//! visible during development.

pub mod error;
pub mod locale;
pub mod localizer;
pub mod report;
mod syntax;
pub mod table;

pub use error::{L10nError, L10nResult, LocaleError, ParseError, ResolveError};
pub use locale::{Locale, DEFAULT_LOCALE};
pub use localizer::Localizer;
pub use syntax::Placeholder;
pub use table::{Entry, MessageTable, Section};
