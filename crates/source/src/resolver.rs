use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, SourceError};
use crate::fetch::Fetch;
use crate::reference::SourceReference;
use crate::rewrite::raw_content_url;

/// Turns [`SourceReference`]s into buffer text.
#[derive(Clone)]
pub struct SourceResolver {
	fetcher: Arc<dyn Fetch>,
}

impl fmt::Debug for SourceResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SourceResolver").finish_non_exhaustive()
	}
}

impl SourceResolver {
	pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
		Self { fetcher }
	}

	/// Resolves `reference` into plain text.
	///
	/// Only remote content is trimmed; literal text and decoded fragments are
	/// returned exactly as they are.
	pub async fn resolve(&self, reference: &SourceReference) -> Result<String> {
		debug!(kind = reference.kind(), "source.resolve");
		match reference {
			SourceReference::Literal(text) => Ok(text.clone()),
			SourceReference::RemoteUrl(url) => self.fetch_remote(url).await,
			SourceReference::CompressedFragment(token) => Ok(lintpad_codec::decode(token.as_str())?),
		}
	}

	/// Fetches `url`, rewriting known hosting-provider URLs to their
	/// raw-content equivalent first. The body is trimmed.
	pub async fn fetch_remote(&self, url: &Url) -> Result<String> {
		let target = raw_content_url(url);
		if target != *url {
			debug!(from = %url, to = %target, "source.rewrite");
		}

		let response = self
			.fetcher
			.fetch(&target)
			.await
			.map_err(|err| SourceError::Transport {
				url: url.to_string(),
				reason: err.to_string(),
			})?;

		if !response.is_success() {
			warn!(url = %target, status = response.status, "source.fetch_failed");
			return Err(SourceError::Fetch {
				url: url.to_string(),
				status: response.status,
				status_text: response.status_text,
			});
		}

		debug!(url = %target, bytes = response.body.len(), "source.fetched");
		Ok(trim_body(&response.body).to_string())
	}
}

/// Trims whitespace and byte order marks from both ends.
fn trim_body(body: &str) -> &str {
	body.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Parses user input as an absolute `http`/`https` URL.
pub fn parse_remote_url(input: &str) -> Result<Url> {
	let malformed = |reason: String| SourceError::MalformedReference {
		input: input.to_string(),
		reason,
	};

	if input.trim().is_empty() {
		return Err(malformed("URL is empty".to_string()));
	}

	let url = Url::parse(input).map_err(|err| malformed(err.to_string()))?;
	match url.scheme() {
		"http" | "https" => Ok(url),
		scheme => Err(malformed(format!("unsupported scheme {scheme:?}"))),
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use async_trait::async_trait;
	use lintpad_codec::PermalinkToken;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::fetch::{FetchResponse, TransportError};

	/// Serves a fixed response and records requested URLs.
	struct FakeFetch {
		response: Option<FetchResponse>,
		requested: Mutex<Vec<String>>,
	}

	impl FakeFetch {
		fn new(response: Option<FetchResponse>) -> Arc<Self> {
			Arc::new(Self {
				response,
				requested: Mutex::new(Vec::new()),
			})
		}

		fn requested(&self) -> Vec<String> {
			self.requested.lock().unwrap().clone()
		}
	}

	#[async_trait]
	impl Fetch for FakeFetch {
		async fn fetch(&self, url: &Url) -> std::result::Result<FetchResponse, TransportError> {
			self.requested.lock().unwrap().push(url.to_string());
			self.response.clone().ok_or_else(|| "connection refused".into())
		}
	}

	fn url(s: &str) -> Url {
		Url::parse(s).unwrap()
	}

	#[tokio::test]
	async fn literal_is_returned_verbatim() {
		let resolver = SourceResolver::new(FakeFetch::new(None));
		let text = "  on: push  \n\n";
		let resolved = resolver
			.resolve(&SourceReference::Literal(text.to_string()))
			.await
			.unwrap();
		assert_eq!(resolved, text);
	}

	#[tokio::test]
	async fn remote_is_rewritten_fetched_and_trimmed() {
		let fetch = FakeFetch::new(Some(FetchResponse::ok("\n  on: push\n\n")));
		let resolver = SourceResolver::new(fetch.clone());

		let resolved = resolver
			.resolve(&SourceReference::RemoteUrl(url(
				"https://github.com/o/r/blob/main/.github/workflows/ci.yml",
			)))
			.await
			.unwrap();

		assert_eq!(resolved, "on: push");
		assert_eq!(
			fetch.requested(),
			vec!["https://raw.githubusercontent.com/o/r/main/.github/workflows/ci.yml"]
		);
	}

	#[tokio::test]
	async fn remote_body_drops_byte_order_mark() {
		let fetch = FakeFetch::new(Some(FetchResponse::ok("\u{feff}on: push\r\n\u{feff}")));
		let resolver = SourceResolver::new(fetch);

		let resolved = resolver
			.fetch_remote(&url("https://example.com/ci.yml"))
			.await
			.unwrap();

		assert_eq!(resolved, "on: push");
	}

	#[tokio::test]
	async fn non_success_status_is_fetch_error() {
		let fetch = FakeFetch::new(Some(FetchResponse::status(404, "Not Found")));
		let resolver = SourceResolver::new(fetch);

		let err = resolver
			.fetch_remote(&url("https://example.com/missing.yml"))
			.await
			.unwrap_err();

		assert!(matches!(err, SourceError::Fetch { status: 404, .. }), "{err:?}");
		assert_eq!(
			err.to_string(),
			"Fetching https://example.com/missing.yml failed with status 404: Not Found"
		);
	}

	#[tokio::test]
	async fn transport_failure_is_reported() {
		let resolver = SourceResolver::new(FakeFetch::new(None));
		let err = resolver
			.fetch_remote(&url("https://example.com/x.yml"))
			.await
			.unwrap_err();
		assert!(matches!(err, SourceError::Transport { .. }), "{err:?}");
	}

	#[tokio::test]
	async fn fragment_is_decoded_untrimmed() {
		let text = "\njobs: {}\n  ";
		let token = lintpad_codec::encode(text);
		let resolver = SourceResolver::new(FakeFetch::new(None));
		let resolved = resolver
			.resolve(&SourceReference::CompressedFragment(token))
			.await
			.unwrap();
		assert_eq!(resolved, text);
	}

	#[tokio::test]
	async fn bad_fragment_is_decode_error() {
		let resolver = SourceResolver::new(FakeFetch::new(None));
		let err = resolver
			.resolve(&SourceReference::CompressedFragment(PermalinkToken::from_raw("!!!")))
			.await
			.unwrap_err();
		assert!(matches!(err, SourceError::Decode(_)), "{err:?}");
	}

	#[test]
	fn parse_rejects_empty_relative_and_non_http() {
		for input in ["", "   ", "not a url", "/relative/path", "ftp://example.com/x"] {
			let err = parse_remote_url(input).unwrap_err();
			assert!(
				matches!(err, SourceError::MalformedReference { .. }),
				"{input:?} gave {err:?}"
			);
		}
	}

	#[test]
	fn parse_accepts_http_and_https() {
		assert!(parse_remote_url("http://example.com/a.yml").is_ok());
		assert!(parse_remote_url("https://example.com/a.yml").is_ok());
	}
}
