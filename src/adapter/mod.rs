//! Tool adapters: invoke one external analysis tool as a bounded-time child
//! process and normalize its native output into diagnostics.
//!
//! Each tool is described by a declarative [`ToolSpec`] (command template,
//! output channel, format tag, timeout). Adding a tool is adding an entry in
//! [`tools`], not a new code path.
//!
//! Failure policy is uniform: a missing binary, a timeout, or undecodable
//! output all collapse to zero diagnostics with the corresponding
//! [`ToolStatus`]; `invoke` never errors outward. Partial tool availability
//! is the normal operating condition.

pub mod parse;
pub mod tools;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio::process::Command;

use crate::analyze::types::{empty_metrics, Diagnostic, ToolStatus};

/// Errors internal to one tool invocation. These never escape `invoke`;
/// they are folded into a [`ToolStatus`].
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("tool binary not found or not runnable")]
    Unavailable,
    #[error("tool exceeded its timeout")]
    Timeout,
    #[error("tool output did not match the expected format: {0}")]
    Malformed(String),
}

/// Which stream a tool writes its findings to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputChannel {
    Stdout,
    Stderr,
}

/// How a tool's native output decodes into diagnostics.
///
/// Each variant carries that tool's severity-mapping policy; see [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// ruff: structured array; fix available maps to warning, else error.
    RuffJson,
    /// mypy: `file:line:col: tag: message` lines; "error" tag maps to error.
    MypyText,
    /// bandit: structured report; severity "HIGH" maps to error.
    BanditJson,
    /// tsc: `file(line,col): error|warning TSnnnn: message` lines.
    TscText,
    /// eslint: structured array; numeric level 2 maps to error, 1 to warning.
    EslintJson,
    /// go vet: `file:line:col: message` lines; every finding is an error.
    GoVetText,
    /// golangci-lint: structured report; every finding is a warning.
    GolangciJson,
    /// cargo: one JSON record per line; the level field passes through.
    CargoJson,
}

/// Declarative description of one external tool invocation.
///
/// The name doubles as the `source` attached to each diagnostic and the
/// tool label in execution records.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub program: &'static str,
    /// Fixed argument list; `"{path}"` is replaced with the target path.
    pub args: &'static [&'static str],
    /// Run from the target's directory instead of taking the path as an
    /// argument (project-scoped tools: tsc, go, golangci-lint, cargo).
    pub run_in_target_dir: bool,
    pub channel: OutputChannel,
    pub format: OutputFormat,
    pub timeout_secs: u64,
}

/// Diagnostics plus the execution status of one adapter run.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub diagnostics: Vec<Diagnostic>,
    pub status: ToolStatus,
}

impl ToolOutcome {
    fn failed(status: ToolStatus) -> Self {
        Self {
            diagnostics: Vec::new(),
            status,
        }
    }
}

impl ToolSpec {
    /// Run the tool against `path` and normalize its output.
    ///
    /// Always returns within the per-tool timeout. Missing binaries,
    /// timeouts, and undecodable output all yield zero diagnostics with the
    /// corresponding status.
    pub async fn invoke(&self, path: &Path) -> ToolOutcome {
        match self.run(path).await {
            Ok(diagnostics) => ToolOutcome {
                diagnostics,
                status: ToolStatus::Ran,
            },
            Err(ToolError::Unavailable) => ToolOutcome::failed(ToolStatus::NotFound),
            Err(ToolError::Timeout) => ToolOutcome::failed(ToolStatus::TimedOut),
            Err(ToolError::Malformed(_)) => ToolOutcome::failed(ToolStatus::ParseFailed),
        }
    }

    async fn run(&self, path: &Path) -> Result<Vec<Diagnostic>, ToolError> {
        let output = run_command(
            self.program,
            self.args,
            path,
            self.run_in_target_dir,
            self.timeout_secs,
        )
        .await?;

        let raw = match self.channel {
            OutputChannel::Stdout => output.stdout,
            OutputChannel::Stderr => output.stderr,
        };
        let text = String::from_utf8_lossy(&raw);

        parse::decode(self.format, self.name, &text)
    }
}

/// Metrics-only adapter: captures a tool's JSON output as an opaque blob.
#[derive(Debug, Clone, Copy)]
pub struct MetricsSpec {
    pub name: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub timeout_secs: u64,
}

impl MetricsSpec {
    /// Collect metrics for `path`. Any failure yields the empty blob;
    /// metrics collection is never surfaced as an error.
    pub async fn collect(&self, path: &Path) -> Value {
        match run_command(self.program, self.args, path, false, self.timeout_secs).await {
            Ok(output) => serde_json::from_slice(&output.stdout).unwrap_or_else(|_| empty_metrics()),
            Err(_) => empty_metrics(),
        }
    }
}

/// Spawn a child process with both streams captured, bounded by `timeout_secs`.
///
/// The child is exclusively owned by this call: `kill_on_drop` guarantees a
/// timed-out process is killed when its future is dropped, so no child
/// outlives its adapter.
async fn run_command(
    program: &str,
    args: &[&str],
    path: &Path,
    run_in_target_dir: bool,
    timeout_secs: u64,
) -> Result<std::process::Output, ToolError> {
    let target = path.to_string_lossy();

    let mut cmd = Command::new(program);
    for arg in args {
        if *arg == "{path}" {
            cmd.arg(target.as_ref());
        } else {
            cmd.arg(arg);
        }
    }
    if run_in_target_dir {
        cmd.current_dir(target_dir(path));
    }
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match tokio::time::timeout(Duration::from_secs(timeout_secs), cmd.output()).await {
        Err(_) => Err(ToolError::Timeout),
        // Spawn failures (binary missing, not executable) mean the tool is
        // unavailable on this machine.
        Ok(Err(_)) => Err(ToolError::Unavailable),
        Ok(Ok(output)) => Ok(output),
    }
}

/// Directory a project-scoped tool runs from: the target itself when it is a
/// directory, otherwise its parent.
fn target_dir(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn spec(program: &'static str, args: &'static [&'static str]) -> ToolSpec {
        ToolSpec {
            name: "test-tool",
            program,
            args,
            run_in_target_dir: false,
            channel: OutputChannel::Stdout,
            format: OutputFormat::RuffJson,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_missing_binary_reports_not_found() {
        let tool = spec("lintmux-no-such-binary", &["{path}"]);
        let outcome = tool.invoke(Path::new("whatever.py")).await;

        assert_eq!(outcome.status, ToolStatus::NotFound);
        assert!(outcome.diagnostics.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_output_is_zero_findings() {
        let tool = spec("true", &[]);
        let outcome = tool.invoke(Path::new("whatever.py")).await;

        assert_eq!(outcome.status, ToolStatus::Ran);
        assert!(outcome.diagnostics.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_garbage_output_reports_parse_failed() {
        let tool = spec("echo", &["not json at all"]);
        let outcome = tool.invoke(Path::new("whatever.py")).await;

        assert_eq!(outcome.status, ToolStatus::ParseFailed);
        assert!(outcome.diagnostics.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_valid_output_is_decoded() {
        let tool = spec(
            "echo",
            &[r#"[{"code":"F401","message":"unused import","filename":"a.py","location":{"row":1,"column":1},"fix":null}]"#],
        );
        let outcome = tool.invoke(Path::new("a.py")).await;

        assert_eq!(outcome.status, ToolStatus::Ran);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].source.as_deref(), Some("test-tool"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_tool_reports_timed_out() {
        let tool = ToolSpec {
            timeout_secs: 1,
            ..spec("sleep", &["10"])
        };

        let started = std::time::Instant::now();
        let outcome = tool.invoke(Path::new("whatever.py")).await;

        assert_eq!(outcome.status, ToolStatus::TimedOut);
        assert!(outcome.diagnostics.is_empty());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_metrics_failure_yields_empty_blob() {
        let metrics = MetricsSpec {
            name: "test-metrics",
            program: "lintmux-no-such-binary",
            args: &["{path}"],
            timeout_secs: 5,
        };
        let value = metrics.collect(Path::new("whatever.py")).await;
        assert_eq!(value, empty_metrics());
    }

    #[test]
    fn test_target_dir() {
        assert_eq!(target_dir(Path::new("src/main.py")), PathBuf::from("src"));
        assert_eq!(target_dir(Path::new("main.py")), PathBuf::from("."));
    }
}
