use lintpad_primitives::Diagnostic;

use crate::scheduler::AnalysisScheduler;

/// State of the single playground session.
///
/// Owned by the controller and mutated only from its event loop.
#[derive(Debug)]
pub struct Session {
	pub(crate) source_text: String,
	pub(crate) dirty: bool,
	pub(crate) scheduler: AnalysisScheduler,
	pub(crate) last_diagnostics: Vec<Diagnostic>,
}

impl Session {
	pub fn new(source_text: String, scheduler: AnalysisScheduler) -> Self {
		Self {
			source_text,
			dirty: false,
			scheduler,
			last_diagnostics: Vec::new(),
		}
	}

	/// Buffer content as of the last edit or run.
	pub fn source_text(&self) -> &str {
		&self.source_text
	}

	/// True once any change happened since load.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub fn scheduler(&self) -> &AnalysisScheduler {
		&self.scheduler
	}

	/// Diagnostics of the most recently completed run.
	pub fn last_diagnostics(&self) -> &[Diagnostic] {
		&self.last_diagnostics
	}
}
