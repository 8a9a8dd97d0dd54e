use async_trait::async_trait;
use url::Url;

/// Boxed transport failure returned by [`Fetch`] implementations.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Response of a completed HTTP retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
	pub status: u16,
	pub status_text: String,
	/// Body text. Only read for successful responses.
	pub body: String,
}

impl FetchResponse {
	/// Successful (2xx) response with a body.
	pub fn ok(body: impl Into<String>) -> Self {
		Self {
			status: 200,
			status_text: "OK".to_string(),
			body: body.into(),
		}
	}

	/// Response with an arbitrary status and no body.
	pub fn status(status: u16, status_text: impl Into<String>) -> Self {
		Self {
			status,
			status_text: status_text.into(),
			body: String::new(),
		}
	}

	pub const fn is_success(&self) -> bool {
		self.status >= 200 && self.status < 300
	}
}

/// Network retrieval capability used by [`SourceResolver`](crate::SourceResolver).
#[async_trait]
pub trait Fetch: Send + Sync {
	/// Retrieves `url`.
	///
	/// Non-success statuses are returned as responses, not errors; `Err` is
	/// reserved for requests that never produced a response.
	async fn fetch(&self, url: &Url) -> Result<FetchResponse, TransportError>;
}

/// [`Fetch`] implementation backed by a `reqwest` client.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
	client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
	pub fn new() -> Self {
		Self::default()
	}
}

#[cfg(feature = "http")]
#[async_trait]
impl Fetch for HttpFetcher {
	async fn fetch(&self, url: &Url) -> Result<FetchResponse, TransportError> {
		let response = self.client.get(url.clone()).send().await?;
		let status = response.status();
		let status_text = status.canonical_reason().unwrap_or_default().to_string();

		if !status.is_success() {
			return Ok(FetchResponse::status(status.as_u16(), status_text));
		}

		Ok(FetchResponse {
			status: status.as_u16(),
			status_text,
			body: response.text().await?,
		})
	}
}
