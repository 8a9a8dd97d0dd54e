//! Permalink codec.
//!
//! A permalink token is the zlib-deflated UTF-8 source text, encoded with the
//! URL-safe base64 alphabet and no padding, so it can be placed verbatim in a
//! URL fragment:
//!
//! ```text
//! text ──utf8──▶ bytes ──deflate──▶ compressed ──base64url──▶ token
//! ```
//!
//! Decoding also accepts the standard alphabet with padding. Older hosts
//! wrote fragments that way and those links must keep resolving.

use std::fmt;
use std::io::{Read, Write};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use tracing::trace;

mod error;

pub use error::{CodecError, Result};

/// Opaque, URL-embeddable encoding of a whole buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermalinkToken(String);

impl PermalinkToken {
	/// Wraps a token received from elsewhere (a URL fragment, CLI argument).
	///
	/// The token is not validated until it is decoded.
	pub fn from_raw(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for PermalinkToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for PermalinkToken {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Encodes `text` into a permalink token.
pub fn encode(text: &str) -> PermalinkToken {
	let mut encoder = ZlibEncoder::new(Vec::with_capacity(text.len() / 2 + 16), Compression::default());
	encoder
		.write_all(text.as_bytes())
		.expect("deflating into a Vec cannot fail");
	let compressed = encoder.finish().expect("deflating into a Vec cannot fail");

	trace!(
		source_bytes = text.len(),
		compressed_bytes = compressed.len(),
		"codec.encode"
	);
	PermalinkToken(URL_SAFE_NO_PAD.encode(compressed))
}

/// Decodes a permalink token back into the source text.
///
/// A leading `#` (as read from a URL fragment) is ignored.
pub fn decode(token: &str) -> Result<String> {
	let normalized = normalize(token);
	let compressed = URL_SAFE_NO_PAD.decode(normalized.as_bytes())?;

	let mut bytes = Vec::with_capacity(compressed.len() * 2);
	ZlibDecoder::new(compressed.as_slice())
		.read_to_end(&mut bytes)
		.map_err(CodecError::InvalidCompressedData)?;

	trace!(
		compressed_bytes = compressed.len(),
		source_bytes = bytes.len(),
		"codec.decode"
	);
	Ok(String::from_utf8(bytes)?)
}

/// Maps the standard base64 alphabet onto the URL-safe one and drops padding.
fn normalize(token: &str) -> String {
	let token = token.strip_prefix('#').unwrap_or(token);
	token
		.trim()
		.trim_end_matches('=')
		.chars()
		.map(|c| match c {
			'+' => '-',
			'/' => '_',
			c => c,
		})
		.collect()
}
