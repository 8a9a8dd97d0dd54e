//! Analysis engine boundary.
//!
//! The engine is an opaque capability: given the buffer text it produces a
//! list of [`Diagnostic`]s. The session never probes for it; it holds an
//! `Option<EngineHandle>` that stays `None` until [`EngineHandle`] is built
//! from a loaded engine.
//!
//! [`CommandEngine`] runs an external linter executable per request.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use lintpad_primitives::Diagnostic;

mod command;
mod error;

pub use command::{CommandEngine, CommandSpec};
pub use error::{EngineError, Result};

/// Request/response contract of the analysis engine.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
	/// Analyzes `source` and returns diagnostics in the engine's order.
	async fn run_analysis(&self, source: String) -> Result<Vec<Diagnostic>>;

	/// Human-readable engine name for logs.
	fn name(&self) -> &str;
}

/// A loaded engine, cheap to clone into spawned analysis tasks.
#[derive(Clone)]
pub struct EngineHandle {
	engine: Arc<dyn AnalysisEngine>,
}

impl EngineHandle {
	pub fn new(engine: Arc<dyn AnalysisEngine>) -> Self {
		Self { engine }
	}

	pub fn from_engine(engine: impl AnalysisEngine + 'static) -> Self {
		Self::new(Arc::new(engine))
	}

	pub async fn run_analysis(&self, source: String) -> Result<Vec<Diagnostic>> {
		self.engine.run_analysis(source).await
	}

	pub fn name(&self) -> &str {
		self.engine.name()
	}
}

impl fmt::Debug for EngineHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EngineHandle")
			.field("name", &self.engine.name())
			.finish()
	}
}
