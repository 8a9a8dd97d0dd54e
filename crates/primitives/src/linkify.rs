use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"));

/// A piece of a diagnostic message.
///
/// Message text comes from the engine and may contain input the user
/// pasted, so frontends must render both variants as text, never markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSpan {
	/// Text without links.
	Plain(String),
	/// An `http`/`https` URL. The visible content is the URL itself.
	Link { url: String },
}

impl MessageSpan {
	/// Visible text of the span.
	pub fn content(&self) -> &str {
		match self {
			Self::Plain(text) => text,
			Self::Link { url } => url,
		}
	}

	pub fn is_link(&self) -> bool {
		matches!(self, Self::Link { .. })
	}
}

/// Splits `text` into plain and link spans, left to right.
///
/// A link is the longest non-whitespace run starting with `http://` or
/// `https://`. Empty input yields no spans; plain spans are never empty.
pub fn linkify(text: &str) -> Vec<MessageSpan> {
	let mut spans = Vec::new();
	let mut rest = text;

	while let Some(m) = URL_PATTERN.find(rest) {
		if m.start() > 0 {
			spans.push(MessageSpan::Plain(rest[..m.start()].to_string()));
		}
		spans.push(MessageSpan::Link {
			url: m.as_str().to_string(),
		});
		rest = &rest[m.end()..];
	}

	if !rest.is_empty() {
		spans.push(MessageSpan::Plain(rest.to_string()));
	}

	spans
}
