//! Output formatting for lintmux results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;

use crate::analyze::types::{AnalysisResult, Diagnostic, Severity, ToolStatus};
use crate::analyze::ErrorList;
use crate::lang::LanguageBreakdown;

/// Write a full analysis result as pretty-printed JSON.
pub fn write_analysis_json(result: &AnalysisResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{}", json);
    Ok(())
}

/// Write a full analysis result in human-readable form.
pub fn write_analysis_pretty(path: &str, result: &AnalysisResult) {
    write_header();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", path);
    print!("  {}", "Language:  ".dimmed());
    println!("{}", result.language);
    println!();

    write_summary_line(result);
    println!();

    if !result.diagnostics.is_empty() {
        write_diagnostics(&result.diagnostics);
        println!();
    }

    if !result.tool_runs.is_empty() {
        write_tool_runs(result);
        println!();
    }
}

/// Write a filtered error list as pretty-printed JSON.
pub fn write_error_list_json(list: &ErrorList) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(list)?;
    println!("{}", json);
    Ok(())
}

/// Write a filtered error list in human-readable form.
pub fn write_error_list_pretty(path: &str, list: &ErrorList) {
    write_header();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", path);
    println!();

    if list.diagnostics.is_empty() {
        println!("  No diagnostics at or above the requested severity");
        println!();
        return;
    }

    println!(
        "  {} ({} shown of {} total):",
        "Diagnostics".bold(),
        list.filtered_count,
        list.total_diagnostics
    );
    println!();

    for d in &list.diagnostics {
        write_severity_tag(d.severity);
        print!("   ");
        println!("{}", d.location.blue());
        print!("            {}", d.message);
        if let Some(code) = &d.code {
            print!("  {}", format!("[{}]", code).dimmed());
        }
        if let Some(source) = &d.source {
            print!("  {}", format!("({})", source).dimmed());
        }
        println!();
        if let Some(suggestion) = &d.suggestion {
            println!("            {}", format!("fix: {}", suggestion).dimmed());
        }
        println!();
    }
}

/// Write a language census as pretty-printed JSON.
pub fn write_languages_json(breakdown: &LanguageBreakdown) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(breakdown)?;
    println!("{}", json);
    Ok(())
}

/// Write a language census in human-readable form.
pub fn write_languages_pretty(dir: &str, breakdown: &LanguageBreakdown) {
    write_header();

    print!("  {}", "Directory: ".dimmed());
    println!("{}", dir);
    println!();

    if breakdown.languages.is_empty() {
        println!("  No recognized source files");
        println!();
        return;
    }

    println!("  {}:", "Languages".bold());
    for (language, count) in &breakdown.languages {
        let marker = if Some(language.as_str()) == breakdown.primary_language.as_deref() {
            " (primary)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("    {:<14} {:>5}{}", language, count, marker);
    }
    println!();
    println!(
        "  {}",
        format!("{} source files total", breakdown.total_files).dimmed()
    );
    println!();
}

fn write_header() {
    println!();
    print!("  ");
    print!("{}", "lintmux".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn write_summary_line(result: &AnalysisResult) {
    let s = &result.summary;
    print!("  ");
    print!("{}", format!("Errors: {}", s.error).red());
    print!("  {}", format!("Warnings: {}", s.warning).yellow());
    print!("  {}", format!("Info: {}", s.info).blue());
    print!("  {}", format!("Hints: {}", s.hint).dimmed());
    if result.files_analyzed > 0 {
        let plural = if result.files_analyzed != 1 { "s" } else { "" };
        print!(
            "  {}",
            format!("({} file{} with findings)", result.files_analyzed, plural).dimmed()
        );
    }
    println!();
}

fn write_diagnostics(diagnostics: &[Diagnostic]) {
    println!("  {} ({}):", "Diagnostics".bold(), diagnostics.len());
    println!();

    for d in diagnostics {
        write_severity_tag(d.severity);
        print!("   ");
        println!("{}", d.location.compact().blue());

        print!("            {}", d.message);
        if let Some(code) = &d.code {
            print!("  {}", format!("[{}]", code).dimmed());
        }
        if let Some(source) = &d.source {
            print!("  {}", format!("({})", source).dimmed());
        }
        println!();

        if let Some(suggestion) = &d.suggestion {
            println!("            {}", format!("fix: {}", suggestion).dimmed());
        }
        println!();
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
        Severity::Info => print!("    {} ", "INFO ".blue()),
        Severity::Hint => print!("    {} ", "HINT ".dimmed()),
    }
}

fn write_tool_runs(result: &AnalysisResult) {
    println!("  {}:", "Tools".dimmed());
    for run in &result.tool_runs {
        let status = match run.status {
            ToolStatus::Ran => "ran".green().to_string(),
            ToolStatus::NotFound => "not found".dimmed().to_string(),
            ToolStatus::TimedOut => "timed out".yellow().to_string(),
            ToolStatus::ParseFailed => "output not understood".yellow().to_string(),
        };
        println!("    {:<16} {}", run.tool, status);
    }
}
