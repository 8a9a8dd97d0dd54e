//! External linter process backend.
//!
//! Each analysis request spawns the configured executable, writes the source
//! to its stdin and parses stdout as a JSON array of diagnostics, e.g. the
//! output of `actionlint -format '{{json .}}' -`.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use lintpad_primitives::Diagnostic;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::AnalysisEngine;
use crate::error::{EngineError, Result};

/// How to invoke the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
	/// Program name looked up on `PATH`, or a path.
	pub program: String,
	/// Arguments; the source is always supplied on stdin.
	pub args: Vec<String>,
	/// Exit codes that mean "analysis completed". Linters commonly exit 1
	/// when they found problems.
	pub success_exit_codes: Vec<i32>,
}

impl Default for CommandSpec {
	fn default() -> Self {
		Self {
			program: "actionlint".to_string(),
			args: vec!["-format".to_string(), "{{json .}}".to_string(), "-".to_string()],
			success_exit_codes: vec![0, 1],
		}
	}
}

/// Analysis engine that runs one linter process per request.
#[derive(Debug, Clone)]
pub struct CommandEngine {
	program: PathBuf,
	args: Vec<String>,
	success_exit_codes: Vec<i32>,
	name: String,
}

impl CommandEngine {
	/// Locates the linter executable. This is the engine load step; failing
	/// here means no analysis can ever run.
	pub fn load(spec: CommandSpec) -> Result<Self> {
		let program = which::which(&spec.program).map_err(|err| EngineError::NotFound {
			program: spec.program.clone(),
			reason: err.to_string(),
		})?;
		info!(program = %program.display(), "engine.loaded");

		Ok(Self {
			program,
			args: spec.args,
			success_exit_codes: spec.success_exit_codes,
			name: spec.program,
		})
	}
}

#[async_trait]
impl AnalysisEngine for CommandEngine {
	async fn run_analysis(&self, source: String) -> Result<Vec<Diagnostic>> {
		let mut cmd = Command::new(&self.program);
		cmd.args(&self.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true);

		let mut child = cmd.spawn().map_err(|error| EngineError::Spawn {
			program: self.program.clone(),
			error,
		})?;
		let mut stdin = child
			.stdin
			.take()
			.ok_or_else(|| io::Error::other("linter stdin was not captured"))?;

		let write = async move {
			let written = stdin.write_all(source.as_bytes()).await;
			drop(stdin);
			written
		};
		let (written, output) = tokio::join!(write, child.wait_with_output());
		let output = output?;

		// A linter that bails out early closes stdin; its exit status says why.
		if let Err(err) = written
			&& err.kind() != io::ErrorKind::BrokenPipe
		{
			return Err(err.into());
		}

		let code = output.status.code();
		if !code.is_some_and(|c| self.success_exit_codes.contains(&c)) {
			let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
			warn!(program = %self.program.display(), ?code, %stderr, "engine.exited");
			return Err(EngineError::Exited { code, stderr });
		}

		let stdout = String::from_utf8_lossy(&output.stdout);
		let stdout = stdout.trim();
		if stdout.is_empty() {
			return Ok(Vec::new());
		}

		let diagnostics: Vec<Diagnostic> = serde_json::from_str(stdout)?;
		debug!(count = diagnostics.len(), ?code, "engine.completed");
		Ok(diagnostics)
	}

	fn name(&self) -> &str {
		&self.name
	}
}

#[cfg(all(test, unix))]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn sh(script: &str, success_exit_codes: Vec<i32>) -> CommandEngine {
		CommandEngine::load(CommandSpec {
			program: "sh".to_string(),
			args: vec!["-c".to_string(), script.to_string()],
			success_exit_codes,
		})
		.unwrap()
	}

	#[test]
	fn load_fails_for_missing_program() {
		let err = CommandEngine::load(CommandSpec {
			program: "lintpad-definitely-not-installed".to_string(),
			..CommandSpec::default()
		})
		.unwrap_err();
		assert!(matches!(err, EngineError::NotFound { .. }), "{err:?}");
	}

	#[tokio::test]
	async fn source_is_piped_through_stdin() {
		let engine = sh("cat", vec![0]);
		let source = r#"[{"line": 2, "column": 4, "message": "m", "kind": "k", "filepath": "<stdin>"}]"#;
		let diags = engine.run_analysis(source.to_string()).await.unwrap();
		assert_eq!(diags, vec![Diagnostic::new(2, 4, "m", "k")]);
	}

	#[tokio::test]
	async fn problems_found_exit_code_is_success() {
		let engine = sh(
			r#"cat >/dev/null; echo '[{"line":1,"column":1,"message":"a","kind":"syntax-check"}]'; exit 1"#,
			vec![0, 1],
		);
		let diags = engine.run_analysis("on: push".to_string()).await.unwrap();
		assert_eq!(diags.len(), 1);
	}

	#[tokio::test]
	async fn empty_output_means_no_diagnostics() {
		let engine = sh("cat >/dev/null", vec![0]);
		assert!(engine.run_analysis("x".to_string()).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn unexpected_exit_code_reports_stderr() {
		let engine = sh("cat >/dev/null; echo 'boom' >&2; exit 3", vec![0, 1]);
		let err = engine.run_analysis("x".to_string()).await.unwrap_err();
		match err {
			EngineError::Exited { code, stderr } => {
				assert_eq!(code, Some(3));
				assert_eq!(stderr, "boom");
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[tokio::test]
	async fn malformed_output_is_output_error() {
		let engine = sh("cat >/dev/null; echo 'not json'", vec![0]);
		let err = engine.run_analysis("x".to_string()).await.unwrap_err();
		assert!(matches!(err, EngineError::Output(_)), "{err:?}");
	}
}
