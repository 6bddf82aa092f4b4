//! Core types for normalized diagnostics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity levels for diagnostics, ordered low to high.
///
/// Declaration order gives the ordinal used for ranking:
/// HINT=0, INFO=1, WARNING=2, ERROR=3.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Ordinal rank: ERROR=3, WARNING=2, INFO=1, HINT=0.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Hint => 0,
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Error => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Hint => write!(f, "hint"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hint" => Ok(Severity::Hint),
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// A source position as reported by the producing tool.
///
/// Line/column index origin is tool-dependent (mypy and tsc report 1-indexed
/// columns, bandit reports a 0-based offset) and is NOT renormalized here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
}

impl CodeLocation {
    /// Location without span information.
    pub fn point(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            end_line: None,
            end_column: None,
        }
    }

    /// Compact `file:line:col` form used by the error-list view.
    pub fn compact(&self) -> String {
        format!("{}:{}:{}", self.file, self.line, self.column)
    }
}

/// One normalized finding, immutable once emitted by an adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    pub location: CodeLocation,
    /// Rule identifier in the tool's vocabulary (e.g. "E501", "TS2304").
    pub code: Option<String>,
    /// Tool that produced the finding (e.g. "ruff", "go vet").
    pub source: Option<String>,
    /// Fix description, when the tool offers one.
    pub suggestion: Option<String>,
    /// Secondary locations, when the tool reports any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<CodeLocation>>,
}

/// Per-severity counts for a diagnostic list.
///
/// A struct rather than a map so that all four counters are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
    pub hint: usize,
}

impl Summary {
    /// Count diagnostics by severity in a single pass.
    pub fn tally(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Summary::default();
        for d in diagnostics {
            match d.severity {
                Severity::Error => summary.error += 1,
                Severity::Warning => summary.warning += 1,
                Severity::Info => summary.info += 1,
                Severity::Hint => summary.hint += 1,
            }
        }
        summary
    }

    /// Counter for one severity.
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Hint => self.hint,
        }
    }

    pub fn total(&self) -> usize {
        self.error + self.warning + self.info + self.hint
    }
}

/// How an adapter's tool invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    /// Tool executed and its output was decoded (possibly to zero findings).
    Ran,
    /// Tool binary was not found on this machine.
    NotFound,
    /// Tool exceeded its per-tool timeout and was killed.
    TimedOut,
    /// Tool output did not decode in the expected format.
    ParseFailed,
}

/// Execution record for one adapter within a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRun {
    pub tool: String,
    pub status: ToolStatus,
}

/// Full per-request output: language, file count, diagnostics, metrics,
/// summary, and per-tool execution statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub language: String,
    /// Count of distinct files among diagnostics. Files with zero findings
    /// are not counted.
    pub files_analyzed: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// Opaque per-tool metrics blob (empty object when unavailable).
    pub metrics: Value,
    pub summary: Summary,
    /// Empty when no analyzer ran; serialized only when non-empty, so the
    /// base schema is unchanged for consumers that ignore it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_runs: Vec<ToolRun>,
}

impl AnalysisResult {
    /// Build a result from a flat diagnostic list: tally the summary and
    /// count distinct diagnostic files.
    pub fn synthesize(
        language: impl Into<String>,
        diagnostics: Vec<Diagnostic>,
        metrics: Value,
        tool_runs: Vec<ToolRun>,
    ) -> Self {
        let summary = Summary::tally(&diagnostics);
        let files: HashSet<&str> = diagnostics
            .iter()
            .map(|d| d.location.file.as_str())
            .collect();

        Self {
            language: language.into(),
            files_analyzed: files.len(),
            diagnostics,
            metrics,
            summary,
            tool_runs,
        }
    }

    /// Zeroed result for an unresolved or unregistered language. A normal
    /// successful outcome, not an error.
    pub fn empty(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            files_analyzed: 0,
            diagnostics: Vec::new(),
            metrics: empty_metrics(),
            summary: Summary::default(),
            tool_runs: Vec::new(),
        }
    }

    /// Check if there are any error-severity diagnostics.
    pub fn has_errors(&self) -> bool {
        self.summary.error > 0
    }
}

/// The empty metrics blob: an empty JSON object.
pub fn empty_metrics() -> Value {
    Value::Object(serde_json::Map::new())
}
