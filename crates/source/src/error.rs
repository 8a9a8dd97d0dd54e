//! Error types for source resolution.

use thiserror::Error;

/// Errors that can occur when resolving a source reference.
#[derive(Debug, Error)]
pub enum SourceError {
	/// The remote server answered with a non-success status.
	#[error("Fetching {url} failed with status {status}: {status_text}")]
	Fetch {
		/// URL as supplied by the user, before raw-content rewriting.
		url: String,
		/// HTTP status code.
		status: u16,
		/// Reason phrase for the status.
		status_text: String,
	},

	/// The user supplied something that is not an absolute http(s) URL.
	#[error("invalid URL {input:?}: {reason}")]
	MalformedReference {
		/// The rejected input.
		input: String,
		/// Why it was rejected.
		reason: String,
	},

	/// A permalink fragment could not be decoded.
	#[error(transparent)]
	Decode(#[from] lintpad_codec::CodecError),

	/// The request never produced a response (DNS, TLS, connection reset).
	#[error("Fetching {url} failed: {reason}")]
	Transport {
		/// URL as supplied by the user.
		url: String,
		/// Transport failure description.
		reason: String,
	},
}

/// Result type for source resolution.
pub type Result<T> = std::result::Result<T, SourceError>;
