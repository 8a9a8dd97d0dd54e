//! Debounced analysis scheduling.
//!
//! [`AnalysisScheduler`] owns the single pending deadline and counts runs in
//! flight. It never touches the editor or the engine; the controller asks it
//! what to do for each edit and tells it when runs start and finish.
//!
//! # Phases
//!
//! - [`SchedulerPhase::Idle`]: nothing pending, nothing running.
//! - [`SchedulerPhase::Pending`]: a deadline is armed. Each edit replaces it
//!   with `now + quiet_period`, so N edits inside the quiet period produce a
//!   single run after the last one.
//! - [`SchedulerPhase::Running`]: an engine call is in flight and nothing is
//!   pending.
//!
//! Paste edits clear the deadline and start a run immediately. In-flight
//! calls are never cancelled; when a later run completes after an earlier
//! one, its result simply replaces the rendered output.

use std::time::Duration;

use lintpad_primitives::EditOrigin;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Quiet period on regular clients.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Quiet period on capability-constrained (phone-class) clients.
pub const CONSTRAINED_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Identifier of one analysis run, increasing per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

/// Observable scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
	Idle,
	Pending,
	Running,
}

/// What the controller must do after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
	/// No engine installed yet. Nothing was scheduled or cancelled.
	NotReady,
	/// A run is armed for `deadline`.
	Scheduled { deadline: Instant },
	/// Start a run now (paste).
	RunNow,
}

/// Single pending-deadline / in-flight-run state machine.
#[derive(Debug)]
pub struct AnalysisScheduler {
	quiet_period: Duration,
	deadline: Option<Instant>,
	in_flight: usize,
	next_run: u64,
}

impl Default for AnalysisScheduler {
	fn default() -> Self {
		Self::new(DEFAULT_QUIET_PERIOD)
	}
}

impl AnalysisScheduler {
	pub fn new(quiet_period: Duration) -> Self {
		Self {
			quiet_period,
			deadline: None,
			in_flight: 0,
			next_run: 0,
		}
	}

	pub fn quiet_period(&self) -> Duration {
		self.quiet_period
	}

	/// Handles a buffer change.
	pub fn on_edit(&mut self, origin: EditOrigin, engine_ready: bool, now: Instant) -> EditOutcome {
		if !engine_ready {
			debug!(?origin, "analysis.not_ready");
			return EditOutcome::NotReady;
		}

		if self.deadline.take().is_some() {
			trace!("analysis.pending_cancelled");
		}

		if origin.is_paste() {
			debug!("analysis.paste_immediate");
			return EditOutcome::RunNow;
		}

		let deadline = now + self.quiet_period;
		self.deadline = Some(deadline);
		trace!(quiet_ms = self.quiet_period.as_millis() as u64, "analysis.scheduled");
		EditOutcome::Scheduled { deadline }
	}

	/// The armed deadline, if any.
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Disarms the deadline if it has been reached. Returns true when a run
	/// should start.
	pub fn take_due(&mut self, now: Instant) -> bool {
		match self.deadline {
			Some(deadline) if deadline <= now => {
				self.deadline = None;
				true
			}
			_ => false,
		}
	}

	/// Drops the armed deadline without running.
	pub fn cancel_pending(&mut self) -> bool {
		self.deadline.take().is_some()
	}

	/// Records the start of a run.
	pub fn start_run(&mut self) -> RunId {
		self.next_run += 1;
		self.in_flight += 1;
		let run = RunId(self.next_run);
		debug!(run_id = run.0, in_flight = self.in_flight, "analysis.run_started");
		run
	}

	/// Records the completion of a run.
	pub fn finish_run(&mut self, run: RunId) {
		self.in_flight = self.in_flight.saturating_sub(1);
		debug!(run_id = run.0, in_flight = self.in_flight, "analysis.run_finished");
	}

	pub fn in_flight(&self) -> usize {
		self.in_flight
	}

	pub fn phase(&self) -> SchedulerPhase {
		if self.deadline.is_some() {
			SchedulerPhase::Pending
		} else if self.in_flight > 0 {
			SchedulerPhase::Running
		} else {
			SchedulerPhase::Idle
		}
	}
}
