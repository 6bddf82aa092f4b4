//! Decoders for the native output formats of supported tools.
//!
//! Three families, per tool:
//! - structured arrays/reports (ruff, bandit, eslint, golangci-lint): the
//!   whole document must decode, otherwise the run is malformed;
//! - record-per-line streams (cargo): undecodable records are skipped;
//! - pattern-matched text (mypy, tsc, go vet): unmatched lines are skipped.
//!
//! Severity policies are part of the format, reproduced exactly from each
//! tool's vocabulary. Line/column values are passed through as reported.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::{OutputFormat, ToolError};
use crate::analyze::types::{CodeLocation, Diagnostic, Severity};

/// Decode one tool's captured output into diagnostics.
///
/// Empty output is zero findings, not a decode failure.
pub fn decode(
    format: OutputFormat,
    tool: &str,
    text: &str,
) -> Result<Vec<Diagnostic>, ToolError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    match format {
        OutputFormat::RuffJson => ruff_json(tool, text),
        OutputFormat::MypyText => Ok(mypy_text(tool, text)),
        OutputFormat::BanditJson => bandit_json(tool, text),
        OutputFormat::TscText => Ok(tsc_text(tool, text)),
        OutputFormat::EslintJson => eslint_json(tool, text),
        OutputFormat::GoVetText => Ok(go_vet_text(tool, text)),
        OutputFormat::GolangciJson => golangci_json(tool, text),
        OutputFormat::CargoJson => Ok(cargo_json(tool, text)),
    }
}

fn malformed(e: impl std::fmt::Display) -> ToolError {
    ToolError::Malformed(e.to_string())
}

// ---------------------------------------------------------------------------
// ruff: JSON array of issues; an issue with an available fix is a warning,
// one without is an error.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RuffItem {
    code: Option<String>,
    message: String,
    filename: String,
    location: RuffLocation,
    #[serde(default)]
    fix: Option<RuffFix>,
}

#[derive(Deserialize)]
struct RuffLocation {
    row: usize,
    column: usize,
}

#[derive(Deserialize)]
struct RuffFix {
    #[serde(default)]
    message: Option<String>,
}

fn ruff_json(tool: &str, text: &str) -> Result<Vec<Diagnostic>, ToolError> {
    let items: Vec<RuffItem> = serde_json::from_str(text).map_err(malformed)?;

    Ok(items
        .into_iter()
        .map(|item| {
            let severity = if item.fix.is_some() {
                Severity::Warning
            } else {
                Severity::Error
            };
            Diagnostic {
                message: item.message,
                severity,
                location: CodeLocation::point(
                    item.filename,
                    item.location.row,
                    item.location.column,
                ),
                code: item.code,
                source: Some(tool.to_string()),
                suggestion: item.fix.and_then(|f| f.message),
                related: None,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// mypy: "file:line:col: tag: message" lines; the "error" tag is an error,
// every other tag is a warning.
// ---------------------------------------------------------------------------

static MYPY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?):(\d+):(\d+): (\w+): (.+)$").unwrap());

fn mypy_text(tool: &str, text: &str) -> Vec<Diagnostic> {
    text.lines()
        .filter_map(|line| {
            let caps = MYPY_LINE.captures(line)?;
            let severity = if &caps[4] == "error" {
                Severity::Error
            } else {
                Severity::Warning
            };
            Some(Diagnostic {
                message: caps[5].to_string(),
                severity,
                location: CodeLocation::point(
                    caps[1].to_string(),
                    caps[2].parse().ok()?,
                    caps[3].parse().ok()?,
                ),
                code: None,
                source: Some(tool.to_string()),
                suggestion: None,
                related: None,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// bandit: JSON report with a "results" array; HIGH severity is an error,
// everything else a warning. The column is a 0-based offset.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct BanditReport {
    #[serde(default)]
    results: Vec<BanditIssue>,
}

#[derive(Deserialize)]
struct BanditIssue {
    issue_text: String,
    issue_severity: String,
    filename: String,
    line_number: usize,
    #[serde(default)]
    col_offset: usize,
    test_id: Option<String>,
}

fn bandit_json(tool: &str, text: &str) -> Result<Vec<Diagnostic>, ToolError> {
    let report: BanditReport = serde_json::from_str(text).map_err(malformed)?;

    Ok(report
        .results
        .into_iter()
        .map(|issue| Diagnostic {
            message: issue.issue_text,
            severity: if issue.issue_severity == "HIGH" {
                Severity::Error
            } else {
                Severity::Warning
            },
            location: CodeLocation::point(issue.filename, issue.line_number, issue.col_offset),
            code: issue.test_id,
            source: Some(tool.to_string()),
            suggestion: None,
            related: None,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// tsc: "file(line,col): error|warning TSnnnn: message" lines; the token
// passes through as the severity.
// ---------------------------------------------------------------------------

static TSC_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\((\d+),(\d+)\): (error|warning) TS(\d+): (.+)$").unwrap());

fn tsc_text(tool: &str, text: &str) -> Vec<Diagnostic> {
    text.lines()
        .filter_map(|line| {
            let caps = TSC_LINE.captures(line)?;
            let severity = if &caps[4] == "error" {
                Severity::Error
            } else {
                Severity::Warning
            };
            Some(Diagnostic {
                message: caps[6].to_string(),
                severity,
                location: CodeLocation::point(
                    caps[1].to_string(),
                    caps[2].parse().ok()?,
                    caps[3].parse().ok()?,
                ),
                code: Some(format!("TS{}", &caps[5])),
                source: Some(tool.to_string()),
                suggestion: None,
                related: None,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// eslint: JSON array of per-file results; numeric level 2 is an error,
// level 1 a warning.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct EslintFile {
    #[serde(rename = "filePath")]
    file_path: String,
    #[serde(default)]
    messages: Vec<EslintMessage>,
}

#[derive(Deserialize)]
struct EslintMessage {
    message: String,
    severity: u64,
    #[serde(default)]
    line: usize,
    #[serde(default)]
    column: usize,
    #[serde(rename = "endLine")]
    end_line: Option<usize>,
    #[serde(rename = "endColumn")]
    end_column: Option<usize>,
    #[serde(rename = "ruleId")]
    rule_id: Option<String>,
    #[serde(default)]
    fix: Option<EslintFix>,
}

#[derive(Deserialize)]
struct EslintFix {
    #[serde(default)]
    text: Option<String>,
}

fn eslint_json(tool: &str, text: &str) -> Result<Vec<Diagnostic>, ToolError> {
    let files: Vec<EslintFile> = serde_json::from_str(text).map_err(malformed)?;

    let mut diagnostics = Vec::new();
    for file in files {
        for msg in file.messages {
            diagnostics.push(Diagnostic {
                message: msg.message,
                severity: if msg.severity == 2 {
                    Severity::Error
                } else {
                    Severity::Warning
                },
                location: CodeLocation {
                    file: file.file_path.clone(),
                    line: msg.line,
                    column: msg.column,
                    end_line: msg.end_line,
                    end_column: msg.end_column,
                },
                code: msg.rule_id,
                source: Some(tool.to_string()),
                suggestion: msg.fix.and_then(|f| f.text),
                related: None,
            });
        }
    }
    Ok(diagnostics)
}

// ---------------------------------------------------------------------------
// go vet: "file:line:col: message" lines on stderr; every finding is an
// error. Package header lines ("# pkg") do not match and are skipped.
// ---------------------------------------------------------------------------

static GO_VET_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?):(\d+):(\d+): (.+)$").unwrap());

fn go_vet_text(tool: &str, text: &str) -> Vec<Diagnostic> {
    text.lines()
        .filter_map(|line| {
            let caps = GO_VET_LINE.captures(line)?;
            Some(Diagnostic {
                message: caps[4].to_string(),
                severity: Severity::Error,
                location: CodeLocation::point(
                    caps[1].to_string(),
                    caps[2].parse().ok()?,
                    caps[3].parse().ok()?,
                ),
                code: None,
                source: Some(tool.to_string()),
                suggestion: None,
                related: None,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// golangci-lint: JSON report with an "Issues" array; every finding is a
// warning, the originating linter becomes the rule code.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GolangciReport {
    #[serde(rename = "Issues")]
    issues: Option<Vec<GolangciIssue>>,
}

#[derive(Deserialize)]
struct GolangciIssue {
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "Pos")]
    pos: GolangciPos,
    #[serde(rename = "FromLinter")]
    from_linter: Option<String>,
}

#[derive(Deserialize)]
struct GolangciPos {
    #[serde(rename = "Filename")]
    filename: String,
    #[serde(rename = "Line")]
    line: usize,
    #[serde(rename = "Column", default)]
    column: usize,
}

fn golangci_json(tool: &str, text: &str) -> Result<Vec<Diagnostic>, ToolError> {
    let report: GolangciReport = serde_json::from_str(text).map_err(malformed)?;

    Ok(report
        .issues
        .unwrap_or_default()
        .into_iter()
        .map(|issue| Diagnostic {
            message: issue.text,
            severity: Severity::Warning,
            location: CodeLocation::point(issue.pos.filename, issue.pos.line, issue.pos.column),
            code: issue.from_linter,
            source: Some(tool.to_string()),
            suggestion: None,
            related: None,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// cargo: one JSON record per line; only "compiler-message" records carry
// diagnostics, one per primary span. The level field passes through:
// error, warning, note, help map to error, warning, info, hint.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CargoRecord {
    reason: String,
    message: Option<CargoMessage>,
}

#[derive(Deserialize)]
struct CargoMessage {
    message: String,
    level: String,
    #[serde(default)]
    spans: Vec<CargoSpan>,
    code: Option<CargoCode>,
}

#[derive(Deserialize)]
struct CargoCode {
    code: String,
}

#[derive(Deserialize)]
struct CargoSpan {
    is_primary: bool,
    file_name: String,
    line_start: usize,
    column_start: usize,
    line_end: usize,
    column_end: usize,
}

fn cargo_level(level: &str) -> Severity {
    match level {
        "error" => Severity::Error,
        "warning" => Severity::Warning,
        "note" => Severity::Info,
        "help" => Severity::Hint,
        _ => Severity::Warning,
    }
}

fn cargo_json(tool: &str, text: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for line in text.lines() {
        let Ok(record) = serde_json::from_str::<CargoRecord>(line) else {
            continue;
        };
        if record.reason != "compiler-message" {
            continue;
        }
        let Some(message) = record.message else {
            continue;
        };

        let severity = cargo_level(&message.level);
        let code = message.code.as_ref().map(|c| c.code.clone());

        for span in message.spans.iter().filter(|s| s.is_primary) {
            diagnostics.push(Diagnostic {
                message: message.message.clone(),
                severity,
                location: CodeLocation {
                    file: span.file_name.clone(),
                    line: span.line_start,
                    column: span.column_start,
                    end_line: Some(span.line_end),
                    end_column: Some(span.column_end),
                },
                code: code.clone(),
                source: Some(tool.to_string()),
                suggestion: None,
                related: None,
            });
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_ok(format: OutputFormat, text: &str) -> Vec<Diagnostic> {
        decode(format, "tool", text).unwrap()
    }

    #[test]
    fn test_empty_output_is_zero_findings() {
        for format in [
            OutputFormat::RuffJson,
            OutputFormat::MypyText,
            OutputFormat::BanditJson,
            OutputFormat::TscText,
            OutputFormat::EslintJson,
            OutputFormat::GoVetText,
            OutputFormat::GolangciJson,
            OutputFormat::CargoJson,
        ] {
            assert!(decode_ok(format, "  \n").is_empty());
        }
    }

    #[test]
    fn test_ruff_fix_maps_to_warning() {
        let text = r#"[
            {"code":"F401","message":"`os` imported but unused","filename":"app.py",
             "location":{"row":1,"column":8},"fix":{"message":"Remove unused import"}},
            {"code":"E999","message":"SyntaxError","filename":"app.py",
             "location":{"row":10,"column":1},"fix":null}
        ]"#;
        let diags = decode_ok(OutputFormat::RuffJson, text);

        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].suggestion.as_deref(), Some("Remove unused import"));
        assert_eq!(diags[0].code.as_deref(), Some("F401"));
        assert_eq!(diags[0].location.line, 1);
        assert_eq!(diags[1].severity, Severity::Error);
        assert_eq!(diags[1].suggestion, None);
    }

    #[test]
    fn test_ruff_garbage_is_malformed() {
        let err = decode(OutputFormat::RuffJson, "ruff", "not json").unwrap_err();
        assert!(matches!(err, ToolError::Malformed(_)));
    }

    #[test]
    fn test_mypy_error_tag_maps_to_error() {
        let text = "app.py:12:5: error: Incompatible types in assignment\n\
                    app.py:20:1: note: See documentation\n\
                    garbage line without positions\n";
        let diags = decode_ok(OutputFormat::MypyText, text);

        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].location.line, 12);
        assert_eq!(diags[0].location.column, 5);
        // any non-"error" tag is a warning
        assert_eq!(diags[1].severity, Severity::Warning);
    }

    #[test]
    fn test_bandit_high_maps_to_error() {
        let text = r#"{"results":[
            {"issue_text":"Use of exec detected","issue_severity":"HIGH",
             "filename":"app.py","line_number":3,"col_offset":0,"test_id":"B102"},
            {"issue_text":"Possible hardcoded password","issue_severity":"LOW",
             "filename":"app.py","line_number":9,"col_offset":4,"test_id":"B105"}
        ]}"#;
        let diags = decode_ok(OutputFormat::BanditJson, text);

        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].code.as_deref(), Some("B102"));
        assert_eq!(diags[1].severity, Severity::Warning);
    }

    #[test]
    fn test_tsc_tokens_pass_through() {
        let text = "src/app.ts(14,9): error TS2304: Cannot find name 'foo'.\n\
                    src/app.ts(20,1): warning TS6133: 'bar' is declared but never used.\n";
        let diags = decode_ok(OutputFormat::TscText, text);

        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].code.as_deref(), Some("TS2304"));
        assert_eq!(diags[0].location.line, 14);
        assert_eq!(diags[0].location.column, 9);
        assert_eq!(diags[1].severity, Severity::Warning);
    }

    #[test]
    fn test_eslint_levels() {
        let text = r#"[{
            "filePath":"/proj/index.js",
            "messages":[
                {"message":"Unexpected var","severity":2,"line":3,"column":1,
                 "endLine":3,"endColumn":4,"ruleId":"no-var","fix":{"text":"let"}},
                {"message":"Missing semicolon","severity":1,"line":7,"column":20,
                 "ruleId":"semi"}
            ]
        }]"#;
        let diags = decode_ok(OutputFormat::EslintJson, text);

        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].location.end_line, Some(3));
        assert_eq!(diags[0].suggestion.as_deref(), Some("let"));
        assert_eq!(diags[1].severity, Severity::Warning);
        assert_eq!(diags[1].code.as_deref(), Some("semi"));
    }

    #[test]
    fn test_go_vet_everything_is_an_error() {
        let text = "# example.com/pkg\n\
                    main.go:15:2: unreachable code\n";
        let diags = decode_ok(OutputFormat::GoVetText, text);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].message, "unreachable code");
    }

    #[test]
    fn test_golangci_everything_is_a_warning() {
        let text = r#"{"Issues":[
            {"Text":"ineffectual assignment to x","FromLinter":"ineffassign",
             "Pos":{"Filename":"main.go","Line":22,"Column":3}}
        ]}"#;
        let diags = decode_ok(OutputFormat::GolangciJson, text);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].code.as_deref(), Some("ineffassign"));
    }

    #[test]
    fn test_golangci_null_issues() {
        assert!(decode_ok(OutputFormat::GolangciJson, r#"{"Issues":null}"#).is_empty());
    }

    #[test]
    fn test_cargo_level_passthrough() {
        let text = concat!(
            r#"{"reason":"compiler-artifact","target":{"name":"demo"}}"#,
            "\n",
            r#"{"reason":"compiler-message","message":{"message":"mismatched types","level":"error","code":{"code":"E0308"},"spans":[{"is_primary":true,"file_name":"src/lib.rs","line_start":4,"column_start":13,"line_end":4,"column_end":18}]}}"#,
            "\n",
            r#"{"reason":"compiler-message","message":{"message":"unused variable: `x`","level":"warning","code":null,"spans":[{"is_primary":true,"file_name":"src/lib.rs","line_start":9,"column_start":9,"line_end":9,"column_end":10}]}}"#,
            "\n",
            "this line is not json\n",
        );
        let diags = decode_ok(OutputFormat::CargoJson, text);

        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].code.as_deref(), Some("E0308"));
        assert_eq!(diags[0].location.end_column, Some(18));
        assert_eq!(diags[1].severity, Severity::Warning);
        assert_eq!(diags[1].code, None);
    }

    #[test]
    fn test_cargo_note_and_help_levels() {
        assert_eq!(cargo_level("note"), Severity::Info);
        assert_eq!(cargo_level("help"), Severity::Hint);
        assert_eq!(cargo_level("ice"), Severity::Warning);
    }

    #[test]
    fn test_cargo_non_primary_spans_skipped() {
        let text = r#"{"reason":"compiler-message","message":{"message":"trait bound","level":"error","code":null,"spans":[{"is_primary":false,"file_name":"src/lib.rs","line_start":1,"column_start":1,"line_end":1,"column_end":2}]}}"#;
        assert!(decode_ok(OutputFormat::CargoJson, text).is_empty());
    }
}
