//! l10n-check - locale table validation for Print UI
//!
//! Entry point for the development tool. Handles CLI argument parsing,
//! logging initialization, and report output.

use anyhow::Context;
use print_ui_l10n::report::{check_dir, CheckReport, LocaleReport};
use std::path::PathBuf;
use std::process::ExitCode;

/// Application name for logging and version output
const APP_NAME: &str = "l10n-check";

/// Locale directory checked when none is given
const DEFAULT_LOCALE_DIR: &str = "resources/i18n";

/// Base locale used when `--base` is not given
const DEFAULT_BASE_LOCALE: &str = "en-US";

/// Parsed command line options
struct Args {
    /// Directory containing the `.ftl` files
    dir: PathBuf,
    /// Base locale name (file stem)
    base: String,
    /// Emit the report as JSON instead of text
    json: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_LOCALE_DIR),
            base: DEFAULT_BASE_LOCALE.to_string(),
            json: false,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    // Initialize logging
    init_logging();

    // Parse command line arguments
    let args = parse_args();

    log::info!(
        "Checking {} against base locale {}",
        args.dir.display(),
        args.base
    );

    let report = check_dir(&args.dir, &args.base)
        .with_context(|| format!("could not check {}", args.dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.has_errors() {
        log::warn!("check failed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Initialize the logging system
fn init_logging() {
    // Set default log level if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn,print_ui_l10n=info");
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();
}

/// Parse command line arguments
fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();
    let mut dir_set = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-j" | "--json" => {
                parsed.json = true;
            }
            "-b" | "--base" => {
                if i + 1 < args.len() {
                    parsed.base = args[i + 1].clone();
                    i += 1;
                } else {
                    eprintln!("Error: --base requires a locale argument");
                    std::process::exit(1);
                }
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
            _ => {
                if dir_set {
                    eprintln!("Error: more than one directory given");
                    std::process::exit(1);
                }
                parsed.dir = PathBuf::from(&args[i]);
                dir_set = true;
            }
        }
        i += 1;
    }

    parsed
}

/// Print a human-readable report
fn print_report(report: &CheckReport) {
    for locale in &report.locales {
        print_locale(locale, &report.base);
    }

    let failures = report
        .locales
        .iter()
        .filter(|locale| locale.has_errors())
        .count();
    if failures == 0 {
        println!("{} locale(s) checked, all clean", report.locales.len());
    } else {
        println!(
            "{} locale(s) checked, {} with errors",
            report.locales.len(),
            failures
        );
    }
}

/// Print one locale's findings
fn print_locale(locale: &LocaleReport, base: &str) {
    println!("{} ({})", locale.locale, locale.path.display());

    if let Some(err) = &locale.parse_error {
        println!("  parse error: {}", err);
        return;
    }

    for finding in &locale.dangling {
        println!("  dangling reference: {}", finding);
    }
    for finding in &locale.resolve_errors {
        println!("  resolve error: {}", finding);
    }
    for key in &locale.extra_keys {
        println!("  not in {}: {}", base, key);
    }
    for key in &locale.missing_keys {
        println!("  missing (falls back): {}", key);
    }
    for key in &locale.same_as_base {
        println!("  same as {}: {}", base, key);
    }

    if !locale.has_errors() {
        println!("  ok, {} message(s)", locale.messages);
    }
}

/// Print help message
fn print_help() {
    println!(
        r#"l10n-check - validate Print UI locale tables

USAGE:
    l10n-check [OPTIONS] [DIRECTORY]

ARGS:
    DIRECTORY           Locale directory to check [default: {DEFAULT_LOCALE_DIR}]

OPTIONS:
    -h, --help          Show this help message
    -v, --version       Show version information
    -j, --json          Emit the report as JSON
    -b, --base LOCALE   Base locale to compare against [default: {DEFAULT_BASE_LOCALE}]

EXIT STATUS:
    0 if every locale parses and references only defined identifiers,
    1 otherwise. Keys missing from a translation and entries left in
    the base language are reported but do not fail the check.
"#
    );
}

/// Print version information
fn print_version() {
    println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
}
