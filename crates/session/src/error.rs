//! Errors surfaced by session actions.

use thiserror::Error;

/// Errors from user-initiated session actions.
///
/// The controller has already shown these to the user when they are
/// returned; callers only need them to decide on follow-up (e.g. exit codes).
#[derive(Debug, Error)]
pub enum SessionError {
	#[error(transparent)]
	Source(#[from] lintpad_source::SourceError),

	#[error(transparent)]
	Engine(#[from] lintpad_engine::EngineError),
}

/// Result type for session actions.
pub type Result<T> = std::result::Result<T, SessionError>;
