//! Command-line interface for lintmux.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::analyze::rank::{self, DEFAULT_MAX_RESULTS};
use crate::analyze::runner;
use crate::analyze::Severity;
use crate::lang;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FINDINGS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Multi-language diagnostic aggregation - run external analyzers and
/// normalize their findings.
///
/// Lintmux detects a target's language, runs the analysis tools registered
/// for it (linters, type checkers, security scanners), and merges their
/// output into one severity-ranked diagnostic stream. Tools that are not
/// installed are skipped; partial tooling is the normal case.
#[derive(Parser)]
#[command(name = "lintmux")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a file or directory and report all diagnostics
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// List diagnostics at or above a severity, highest first
    Errors(ErrorsArgs),
    /// Count source files per language in a directory
    Languages(LanguagesArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Language identifier (auto-detected if omitted)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Skip metrics collection
    #[arg(long)]
    pub no_metrics: bool,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the errors command.
#[derive(Parser)]
pub struct ErrorsArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Minimum severity to include: error, warning, info, or hint
    #[arg(short, long, default_value = "warning")]
    pub min_severity: String,

    /// Maximum number of diagnostics to return
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the languages command.
#[derive(Parser)]
pub struct LanguagesArgs {
    /// Directory to scan
    pub directory: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

fn valid_format(format: &str) -> bool {
    format == "pretty" || format == "json"
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if !valid_format(&args.format) {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    if let Err(e) = std::fs::metadata(&args.path) {
        eprintln!("Error: cannot access path {:?}: {}", args.path, e);
        return Ok(EXIT_ERROR);
    }

    let result =
        runner::analyze_codebase(&args.path, args.language.as_deref(), !args.no_metrics)?;

    match args.format.as_str() {
        "json" => report::write_analysis_json(&result)?,
        _ => report::write_analysis_pretty(&args.path.to_string_lossy(), &result),
    }

    if result.has_errors() {
        Ok(EXIT_FINDINGS)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the errors command.
pub fn run_errors(args: &ErrorsArgs) -> anyhow::Result<i32> {
    if !valid_format(&args.format) {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let min_severity: Severity = match args.min_severity.parse() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Valid severities: error, warning, info, hint");
            return Ok(EXIT_ERROR);
        }
    };

    if let Err(e) = std::fs::metadata(&args.path) {
        eprintln!("Error: cannot access path {:?}: {}", args.path, e);
        return Ok(EXIT_ERROR);
    }

    let list = rank::get_error_list(&args.path, min_severity, args.max_results)?;

    match args.format.as_str() {
        "json" => report::write_error_list_json(&list)?,
        _ => report::write_error_list_pretty(&args.path.to_string_lossy(), &list),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the languages command.
pub fn run_languages(args: &LanguagesArgs) -> anyhow::Result<i32> {
    if !valid_format(&args.format) {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    match std::fs::metadata(&args.directory) {
        Ok(m) if m.is_dir() => {}
        Ok(_) => {
            eprintln!("Error: {:?} is not a directory", args.directory);
            return Ok(EXIT_ERROR);
        }
        Err(e) => {
            eprintln!("Error: cannot access directory {:?}: {}", args.directory, e);
            return Ok(EXIT_ERROR);
        }
    }

    let breakdown = lang::detect_languages(&args.directory);

    match args.format.as_str() {
        "json" => report::write_languages_json(&breakdown)?,
        _ => report::write_languages_pretty(&args.directory.to_string_lossy(), &breakdown),
    }

    Ok(EXIT_SUCCESS)
}
