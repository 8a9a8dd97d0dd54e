use lintpad_codec::PermalinkToken;
use url::Url;

/// Where buffer content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceReference {
	/// Text supplied directly.
	Literal(String),
	/// A document to fetch over HTTP.
	RemoteUrl(Url),
	/// A permalink token produced by [`lintpad_codec::encode`].
	CompressedFragment(PermalinkToken),
}

impl SourceReference {
	/// Short label for logging.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Literal(_) => "literal",
			Self::RemoteUrl(_) => "remote-url",
			Self::CompressedFragment(_) => "fragment",
		}
	}
}
