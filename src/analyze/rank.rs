//! Reporting-side severity filtering and ranking.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::runner;
use super::types::{AnalysisResult, Severity};

pub const DEFAULT_MIN_SEVERITY: Severity = Severity::Warning;
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// One diagnostic in the filtered view, with its location flattened to
/// `file:line:col`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDiagnostic {
    pub message: String,
    pub severity: Severity,
    pub location: String,
    pub code: Option<String>,
    pub source: Option<String>,
    pub suggestion: Option<String>,
}

/// Filtered, ranked, truncated view of an analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorList {
    /// Diagnostic count before filtering.
    pub total_diagnostics: usize,
    /// Diagnostic count after filtering and truncation.
    pub filtered_count: usize,
    pub diagnostics: Vec<RankedDiagnostic>,
}

/// Keep diagnostics at or above `min_severity`, sort descending by severity
/// (stable, so equal severities preserve original order), truncate to
/// `max_results`.
pub fn filter_and_rank(
    result: &AnalysisResult,
    min_severity: Severity,
    max_results: usize,
) -> ErrorList {
    let mut kept: Vec<_> = result
        .diagnostics
        .iter()
        .filter(|d| d.severity.rank() >= min_severity.rank())
        .collect();
    kept.sort_by_key(|d| std::cmp::Reverse(d.severity.rank()));
    kept.truncate(max_results);

    ErrorList {
        total_diagnostics: result.diagnostics.len(),
        filtered_count: kept.len(),
        diagnostics: kept
            .into_iter()
            .map(|d| RankedDiagnostic {
                message: d.message.clone(),
                severity: d.severity,
                location: d.location.compact(),
                code: d.code.clone(),
                source: d.source.clone(),
                suggestion: d.suggestion.clone(),
            })
            .collect(),
    }
}

/// The error-list operation: analyze, then filter and rank. Metrics are not
/// part of this view, so their collection is skipped.
pub fn get_error_list(
    path: &Path,
    min_severity: Severity,
    max_results: usize,
) -> anyhow::Result<ErrorList> {
    let result = runner::analyze_codebase(path, None, false)?;
    Ok(filter_and_rank(&result, min_severity, max_results))
}
