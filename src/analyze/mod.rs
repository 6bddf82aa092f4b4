//! Diagnostic aggregation: per-language analyzers, the dispatcher, result
//! synthesis, and reporting-side ranking.

pub mod rank;
pub mod runner;
pub mod types;

pub use rank::{filter_and_rank, get_error_list, ErrorList, RankedDiagnostic};
pub use runner::{analyze_codebase, analyze_codebase_async, Analyzer};
pub use types::{
    AnalysisResult, CodeLocation, Diagnostic, Severity, Summary, ToolRun, ToolStatus,
};
