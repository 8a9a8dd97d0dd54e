//! The page location: startup parameters in, permalink fragment out.
//!
//! Startup reads `?s=<text>`, `?u=<url>` and the fragment once. The fragment
//! is the only shared state written afterwards, by permalink generation.

use std::fmt;

use lintpad_codec::PermalinkToken;
use url::Url;

/// Query parameter carrying literal source text.
pub const SOURCE_PARAM: &str = "s";
/// Query parameter carrying a remote URL to fetch.
pub const URL_PARAM: &str = "u";

/// URL of the playground page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
	url: Url,
}

impl PageLocation {
	pub fn new(url: Url) -> Self {
		Self { url }
	}

	pub fn parse(input: &str) -> Result<Self, url::ParseError> {
		Ok(Self::new(Url::parse(input)?))
	}

	/// First value of query parameter `name`.
	pub fn query(&self, name: &str) -> Option<String> {
		self.url
			.query_pairs()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.into_owned())
	}

	/// Non-empty fragment without the leading `#`.
	pub fn fragment(&self) -> Option<&str> {
		self.url.fragment().filter(|f| !f.is_empty())
	}

	/// Writes `token` as the fragment.
	pub fn set_fragment(&mut self, token: &PermalinkToken) {
		self.url.set_fragment(Some(token.as_str()));
	}
}

impl fmt::Display for PageLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.url, f)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn reads_query_and_fragment() {
		let location = PageLocation::parse("https://example.com/play/?s=on%3A+push&u=x#abc").unwrap();
		assert_eq!(location.query(SOURCE_PARAM).as_deref(), Some("on: push"));
		assert_eq!(location.query(URL_PARAM).as_deref(), Some("x"));
		assert_eq!(location.fragment(), Some("abc"));
	}

	#[test]
	fn empty_fragment_is_none() {
		let location = PageLocation::parse("https://example.com/play/#").unwrap();
		assert_eq!(location.fragment(), None);
	}

	#[test]
	fn set_fragment_replaces_previous() {
		let mut location = PageLocation::parse("https://example.com/play/#old").unwrap();
		location.set_fragment(&PermalinkToken::from_raw("new-token_1"));
		assert_eq!(location.to_string(), "https://example.com/play/#new-token_1");
	}
}
