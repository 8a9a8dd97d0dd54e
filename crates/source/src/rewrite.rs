//! Raw-content URL rewriting for known hosting providers.
//!
//! Rules are tried in order and the first match wins:
//!
//! 1. `github.com/<owner>/<repo>/blob/<branch>/<path>` becomes
//!    `raw.githubusercontent.com/<owner>/<repo>/<branch>/<path>`.
//! 2. `gist.github.com/<owner>/<hex-id>` becomes
//!    `gist.githubusercontent.com/<owner>/<hex-id>/raw`.
//! 3. Anything else is fetched as-is.

use url::Url;

pub const GITHUB_HOST: &str = "github.com";
pub const GITHUB_RAW_HOST: &str = "raw.githubusercontent.com";
pub const GIST_HOST: &str = "gist.github.com";
pub const GIST_RAW_HOST: &str = "gist.githubusercontent.com";

/// Returns the URL that should actually be fetched for `url`.
pub fn raw_content_url(url: &Url) -> Url {
	github_blob(url)
		.or_else(|| gist(url))
		.unwrap_or_else(|| url.clone())
}

fn host_is(url: &Url, host: &str) -> bool {
	url.host_str() == Some(host) && url.port().is_none()
}

fn github_blob(url: &Url) -> Option<Url> {
	if !host_is(url, GITHUB_HOST) {
		return None;
	}

	// Ambiguous paths with several `/blob/` segments are left alone.
	let (repo, rest) = url.path().split_once("/blob/")?;
	if rest.contains("/blob/") {
		return None;
	}

	let mut raw = url.clone();
	raw.set_host(Some(GITHUB_RAW_HOST)).ok()?;
	raw.set_path(&format!("{repo}/{rest}"));
	Some(raw)
}

fn gist(url: &Url) -> Option<Url> {
	if !host_is(url, GIST_HOST) {
		return None;
	}

	let id = url.path().rsplit('/').next()?;
	if id.is_empty() || !id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
		return None;
	}

	let mut raw = url.clone();
	raw.set_host(Some(GIST_RAW_HOST)).ok()?;
	raw.set_path(&format!("{}/raw", url.path()));
	Some(raw)
}
