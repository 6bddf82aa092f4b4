//! Per-language analyzers and the request dispatcher.

use std::path::Path;

use futures::future;

use crate::adapter::{tools, MetricsSpec, ToolSpec};
use crate::analyze::types::{empty_metrics, AnalysisResult, ToolRun};
use crate::lang;

/// Ordered collection of tool adapters for one language, plus an optional
/// metrics-only adapter.
pub struct Analyzer {
    pub language: &'static str,
    pub tools: &'static [ToolSpec],
    pub metrics: Option<&'static MetricsSpec>,
}

impl Analyzer {
    /// Run every adapter against `path` and synthesize one result.
    ///
    /// Sibling adapters are independent and read-only, so they run as
    /// concurrent tasks joined before synthesis, each bounded by its own
    /// timeout. The join preserves declared adapter order, so diagnostics
    /// concatenate in that order and are not re-sorted. A failing adapter
    /// contributes zero diagnostics and never aborts its siblings.
    pub async fn run(&self, path: &Path, include_metrics: bool) -> AnalysisResult {
        let outcomes = future::join_all(self.tools.iter().map(|tool| tool.invoke(path))).await;

        let mut diagnostics = Vec::new();
        let mut tool_runs = Vec::with_capacity(self.tools.len());
        for (tool, outcome) in self.tools.iter().zip(outcomes) {
            tool_runs.push(ToolRun {
                tool: tool.name.to_string(),
                status: outcome.status,
            });
            diagnostics.extend(outcome.diagnostics);
        }

        let metrics = match self.metrics {
            Some(spec) if include_metrics => spec.collect(path).await,
            _ => empty_metrics(),
        };

        AnalysisResult::synthesize(self.language, diagnostics, metrics, tool_runs)
    }
}

/// Resolve a target to a language identifier: the hint wins, else extension
/// lookup for files or the primary-language census for directories.
fn resolve_language(path: &Path, hint: Option<&str>) -> Option<String> {
    if let Some(lang) = hint {
        return Some(lang.to_string());
    }
    if path.is_file() {
        lang::file_language(path).map(str::to_string)
    } else {
        lang::primary_language(&lang::directory_languages(path))
    }
}

/// Analyze a file or directory, routing to its language's analyzer.
///
/// An unresolved language yields a zeroed result labeled "unknown"; a
/// resolved but unregistered language yields the same shape with the name
/// kept. Both are normal successful outcomes — this function cannot fail a
/// request.
pub async fn analyze_codebase_async(
    path: &Path,
    language: Option<&str>,
    include_metrics: bool,
) -> AnalysisResult {
    let Some(language) = resolve_language(path, language) else {
        return AnalysisResult::empty("unknown");
    };

    match tools::analyzer_for(&language) {
        Some(analyzer) => analyzer.run(path, include_metrics).await,
        None => AnalysisResult::empty(language),
    }
}

/// Blocking wrapper for synchronous callers; builds its own runtime.
pub fn analyze_codebase(
    path: &Path,
    language: Option<&str>,
    include_metrics: bool,
) -> anyhow::Result<AnalysisResult> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(analyze_codebase_async(path, language, include_metrics)))
}
