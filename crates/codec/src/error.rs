//! Error types for permalink decoding.

use thiserror::Error;

/// Errors that can occur when decoding a permalink token.
#[derive(Debug, Error)]
pub enum CodecError {
	/// The token is not valid base64.
	#[error("invalid permalink encoding: {0}")]
	InvalidEncoding(#[from] base64::DecodeError),

	/// The decoded bytes are not a valid zlib stream.
	#[error("invalid compressed data: {0}")]
	InvalidCompressedData(std::io::Error),

	/// The decompressed bytes are not UTF-8.
	#[error("decompressed source is not valid UTF-8: {0}")]
	InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
