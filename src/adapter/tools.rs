//! Declarative registry of external tools and per-language analyzers.
//!
//! Command templates, output channels, formats, and timeouts live here as
//! configuration data. Supporting a new tool means adding a [`ToolSpec`]
//! const and listing it in an analyzer; supporting a new language means
//! adding an [`Analyzer`] static and a match arm in [`analyzer_for`].

use super::{MetricsSpec, OutputChannel, OutputFormat, ToolSpec};
use crate::analyze::runner::Analyzer;

pub const RUFF: ToolSpec = ToolSpec {
    name: "ruff",
    program: "ruff",
    args: &["check", "{path}", "--output-format=json"],
    run_in_target_dir: false,
    channel: OutputChannel::Stdout,
    format: OutputFormat::RuffJson,
    timeout_secs: 30,
};

pub const MYPY: ToolSpec = ToolSpec {
    name: "mypy",
    program: "mypy",
    args: &["{path}", "--show-column-numbers", "--no-error-summary"],
    run_in_target_dir: false,
    channel: OutputChannel::Stdout,
    format: OutputFormat::MypyText,
    timeout_secs: 30,
};

pub const BANDIT: ToolSpec = ToolSpec {
    name: "bandit",
    program: "bandit",
    args: &["-r", "{path}", "-f", "json"],
    run_in_target_dir: false,
    channel: OutputChannel::Stdout,
    format: OutputFormat::BanditJson,
    timeout_secs: 30,
};

pub const TSC: ToolSpec = ToolSpec {
    name: "typescript",
    program: "tsc",
    args: &["--noEmit", "--pretty", "false"],
    run_in_target_dir: true,
    channel: OutputChannel::Stdout,
    format: OutputFormat::TscText,
    timeout_secs: 30,
};

pub const ESLINT: ToolSpec = ToolSpec {
    name: "eslint",
    program: "eslint",
    args: &["{path}", "--format=json"],
    run_in_target_dir: false,
    channel: OutputChannel::Stdout,
    format: OutputFormat::EslintJson,
    timeout_secs: 30,
};

pub const GO_VET: ToolSpec = ToolSpec {
    name: "go vet",
    program: "go",
    args: &["vet", "./..."],
    run_in_target_dir: true,
    // go vet reports findings on stderr
    channel: OutputChannel::Stderr,
    format: OutputFormat::GoVetText,
    timeout_secs: 30,
};

pub const GOLANGCI_LINT: ToolSpec = ToolSpec {
    name: "golangci-lint",
    program: "golangci-lint",
    args: &["run", "--out-format=json"],
    run_in_target_dir: true,
    channel: OutputChannel::Stdout,
    format: OutputFormat::GolangciJson,
    timeout_secs: 60,
};

pub const CARGO_CHECK: ToolSpec = ToolSpec {
    name: "rustc",
    program: "cargo",
    args: &["check", "--message-format=json"],
    run_in_target_dir: true,
    channel: OutputChannel::Stdout,
    format: OutputFormat::CargoJson,
    timeout_secs: 60,
};

pub const CARGO_CLIPPY: ToolSpec = ToolSpec {
    name: "clippy",
    program: "cargo",
    args: &["clippy", "--message-format=json"],
    run_in_target_dir: true,
    channel: OutputChannel::Stdout,
    format: OutputFormat::CargoJson,
    timeout_secs: 60,
};

/// Cyclomatic-complexity metrics for Python.
pub const RADON: MetricsSpec = MetricsSpec {
    name: "radon",
    program: "radon",
    args: &["cc", "{path}", "-j"],
    timeout_secs: 10,
};

static PYTHON: Analyzer = Analyzer {
    language: "python",
    tools: &[RUFF, MYPY, BANDIT],
    metrics: Some(&RADON),
};

static TYPESCRIPT: Analyzer = Analyzer {
    language: "typescript",
    tools: &[TSC, ESLINT],
    metrics: None,
};

static GO: Analyzer = Analyzer {
    language: "go",
    tools: &[GO_VET, GOLANGCI_LINT],
    metrics: None,
};

static RUST: Analyzer = Analyzer {
    language: "rust",
    tools: &[CARGO_CHECK, CARGO_CLIPPY],
    metrics: None,
};

/// Look up the analyzer registered for a language identifier.
///
/// javascript shares the typescript analyzer; results keep the analyzer's
/// own language label. Returns `None` for languages without tooling.
pub fn analyzer_for(language: &str) -> Option<&'static Analyzer> {
    match language {
        "python" => Some(&PYTHON),
        "typescript" | "javascript" => Some(&TYPESCRIPT),
        "go" => Some(&GO),
        "rust" => Some(&RUST),
        _ => None,
    }
}
