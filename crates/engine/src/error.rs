//! Error types for engine loading and analysis runs.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the analysis engine.
#[derive(Debug, Error)]
pub enum EngineError {
	/// Analysis was requested before an engine was installed.
	#[error("Preparing the analysis engine is not completed yet. Please wait for a while and try again.")]
	NotReady,

	/// The engine executable could not be located at load time.
	#[error("linter executable {program:?} not found: {reason}")]
	NotFound {
		/// Program name or path as configured.
		program: String,
		/// Lookup failure description.
		reason: String,
	},

	/// The engine process could not be started.
	#[error("failed to start {program}: {error}")]
	Spawn {
		/// Resolved executable path.
		program: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The engine process exited with a status outside the success set.
	#[error("linter exited with {}: {stderr}", exit_label(.code))]
	Exited {
		/// Exit code, `None` when killed by a signal.
		code: Option<i32>,
		/// Captured standard error, trimmed.
		stderr: String,
	},

	/// The engine output was not a JSON list of diagnostics.
	#[error("unexpected linter output: {0}")]
	Output(#[from] serde_json::Error),

	/// Reading from or writing to the engine process failed.
	#[error("{0}")]
	Io(#[from] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
	match code {
		Some(code) => format!("status {code}"),
		None => "a signal".to_string(),
	}
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
