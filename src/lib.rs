//! Lintmux - multi-language diagnostic aggregation.
//!
//! Lintmux detects a source file's language, runs the external analysis
//! tools registered for that language as bounded-time child processes, and
//! reconciles their incompatible output formats into a single,
//! severity-ranked diagnostic stream with aggregate counts.
//!
//! No analysis happens in-process: no parsing, no AST construction, no type
//! inference. The value is orchestration - choosing which tools to run,
//! tolerating their absence or failure, and normalizing disparate output
//! vocabularies into one model that consumers can rely on without knowing
//! which tool produced a given finding.
//!
//! # Architecture
//!
//! - `lang`: extension-based language detection for files and directories
//! - `adapter`: per-tool invocation and output decoding
//! - `analyze`: per-language analyzers, the dispatcher, result synthesis,
//!   and severity ranking
//! - `report`: output formatting (pretty, JSON)
//!
//! # Adding a New Tool
//!
//! Add a `ToolSpec` const in `adapter::tools` and list it in a language's
//! analyzer. Command template, output channel, format, and timeout are
//! configuration data; no new code paths are needed unless the tool speaks
//! a format no decoder covers yet.

pub mod adapter;
pub mod analyze;
pub mod cli;
pub mod lang;
pub mod report;

pub use adapter::{MetricsSpec, OutputChannel, OutputFormat, ToolOutcome, ToolSpec};
pub use analyze::{
    analyze_codebase, analyze_codebase_async, filter_and_rank, get_error_list, AnalysisResult,
    CodeLocation, Diagnostic, ErrorList, RankedDiagnostic, Severity, Summary, ToolRun, ToolStatus,
};
pub use lang::{detect_languages, LanguageBreakdown};
