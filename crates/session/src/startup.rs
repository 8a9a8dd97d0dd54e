//! Startup source selection.
//!
//! Sources are checked in priority order: the `s` query parameter (literal
//! text), the `u` query parameter (remote URL), the fragment (permalink
//! token), and finally [`DEFAULT_SOURCE`].

use lintpad_codec::PermalinkToken;
use lintpad_source::{Result, SourceError, SourceReference, SourceResolver, parse_remote_url};
use tracing::{info, warn};

use crate::location::{PageLocation, SOURCE_PARAM, URL_PARAM};

/// Sample workflow shown when nothing else was requested. It contains
/// several deliberate mistakes so the first analysis has something to show.
pub const DEFAULT_SOURCE: &str = r##"# Paste your workflow YAML to this code editor

on:
  push:
    branch: main
    tags:
      - 'v\d+'
jobs:
  test:
    strategy:
      matrix:
        os: [macos-latest, linux-latest]
    runs-on: ${{ matrix.os }}
    steps:
      - run: echo "Checking commit '${{ github.event.head_commit.message }}'"
      - uses: actions/checkout@v2
      - uses: actions/setup-node@v2
        with:
          node_version: 16.x
      - uses: actions/cache@v2
        with:
          path: ~/.npm
          key: ${{ matrix.platform }}-node-${{ hashFiles('**/package-lock.json') }}
        if: ${{ github.repository.permissions.admin == true }}
      - run: npm install && npm test"##;

/// Picks the startup reference from `location`. `None` means the default
/// sample.
pub fn select_startup_reference(location: &PageLocation) -> Result<Option<SourceReference>> {
	if let Some(text) = location.query(SOURCE_PARAM) {
		return Ok(Some(SourceReference::Literal(text)));
	}
	if let Some(url) = location.query(URL_PARAM) {
		return Ok(Some(SourceReference::RemoteUrl(parse_remote_url(&url)?)));
	}
	if let Some(fragment) = location.fragment() {
		return Ok(Some(SourceReference::CompressedFragment(PermalinkToken::from_raw(fragment))));
	}
	Ok(None)
}

/// Initial buffer content.
#[derive(Debug)]
pub struct StartupSource {
	pub text: String,
	/// Kind of reference the text came from (`"default"` for the sample).
	pub origin: &'static str,
	/// Set when the requested source failed and the sample was used instead.
	pub error: Option<SourceError>,
}

/// Resolves the initial buffer content.
///
/// Failures are not fatal: the default sample is used and the error is
/// returned alongside so the host can show it.
pub async fn load_startup_source(location: &PageLocation, resolver: &SourceResolver) -> StartupSource {
	let resolved = match select_startup_reference(location) {
		Ok(Some(reference)) => resolver
			.resolve(&reference)
			.await
			.map(|text| (text, reference.kind())),
		Ok(None) => Ok((DEFAULT_SOURCE.to_string(), "default")),
		Err(err) => Err(err),
	};

	match resolved {
		Ok((text, origin)) => {
			info!(origin, bytes = text.len(), "startup.source");
			StartupSource {
				text,
				origin,
				error: None,
			}
		}
		Err(err) => {
			warn!(error = %err, "startup.source_failed");
			StartupSource {
				text: DEFAULT_SOURCE.to_string(),
				origin: "default",
				error: Some(err),
			}
		}
	}
}
