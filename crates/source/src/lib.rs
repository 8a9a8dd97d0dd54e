//! Source resolution for the playground buffer.
//!
//! A [`SourceReference`] is resolved exactly once into plain text:
//!
//! - [`SourceReference::Literal`] is returned verbatim.
//! - [`SourceReference::RemoteUrl`] is rewritten to a raw-content URL for
//!   known hosting providers (see [`rewrite`]), fetched, and trimmed.
//! - [`SourceReference::CompressedFragment`] is decoded with
//!   [`lintpad_codec::decode`] and returned untrimmed.
//!
//! Network access goes through the [`Fetch`] trait. With the default `http`
//! feature, [`HttpFetcher`] implements it on top of `reqwest`.

mod error;
mod fetch;
mod reference;
mod resolver;
pub mod rewrite;

pub use error::{Result, SourceError};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{Fetch, FetchResponse, TransportError};
pub use reference::SourceReference;
pub use resolver::{SourceResolver, parse_remote_url};
