//! Session controller.
//!
//! [`SessionController`] wires the pieces together:
//!
//! - edits go to the [`AnalysisScheduler`](crate::scheduler::AnalysisScheduler)
//!   and set the dirty flag;
//! - due deadlines start engine runs, whose results are rendered on
//!   completion;
//! - "load from URL" goes through the [`SourceResolver`];
//! - "generate permalink" writes an encoded token into the page fragment.
//!
//! Engine runs and URL fetches execute on spawned tasks and report back over
//! an internal channel, which [`SessionController::run`] and
//! [`SessionController::settle`] drain.

use std::future;
use std::ops::ControlFlow;

use lintpad_engine::{EngineError, EngineHandle};
use lintpad_primitives::{Diagnostic, EditEvent, EditOrigin};
use lintpad_source::{SourceResolver, parse_remote_url};
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::editor::EditorSurface;
use crate::error::Result;
use crate::location::PageLocation;
use crate::render::{ResultPanel, ResultRenderer};
use crate::scheduler::{AnalysisScheduler, EditOutcome, RunId};
use crate::session::Session;

/// Input to [`SessionController::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
	/// The editor content changed (the editor is shared with the host).
	Edit(EditEvent),
	/// The user replaced the buffer with `text`.
	Replace { text: String, origin: EditOrigin },
	/// Submit of the remote URL input (Enter or click).
	LoadUrl(String),
	/// The permalink button.
	GeneratePermalink,
	/// Click on summary row `n`.
	ActivateRow(usize),
	/// Close button of the error banner.
	DismissError,
	/// Stop the event loop.
	Close,
}

/// Completions reported by spawned tasks.
enum Internal {
	RunFinished {
		run: RunId,
		result: std::result::Result<lintpad_engine::Result<Vec<Diagnostic>>, JoinError>,
	},
	Loaded {
		input: String,
		result: lintpad_source::Result<String>,
	},
}

/// Owns the session and everything it drives.
pub struct SessionController<E> {
	session: Session,
	editor: E,
	panel: ResultPanel,
	engine: Option<EngineHandle>,
	resolver: SourceResolver,
	location: PageLocation,
	loads_in_flight: usize,
	internal_tx: mpsc::UnboundedSender<Internal>,
	internal_rx: mpsc::UnboundedReceiver<Internal>,
}

impl<E: EditorSurface> SessionController<E> {
	/// Creates a controller over an editor that already holds the startup
	/// source. No engine is installed yet.
	pub fn new(editor: E, resolver: SourceResolver, location: PageLocation, scheduler: AnalysisScheduler) -> Self {
		let (internal_tx, internal_rx) = mpsc::unbounded_channel();
		Self {
			session: Session::new(editor.text(), scheduler),
			editor,
			panel: ResultPanel::new(),
			engine: None,
			resolver,
			location,
			loads_in_flight: 0,
			internal_tx,
			internal_rx,
		}
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn editor(&self) -> &E {
		&self.editor
	}

	pub fn editor_mut(&mut self) -> &mut E {
		&mut self.editor
	}

	pub fn panel(&self) -> &ResultPanel {
		&self.panel
	}

	pub fn location(&self) -> &PageLocation {
		&self.location
	}

	pub fn is_engine_ready(&self) -> bool {
		self.engine.is_some()
	}

	/// Installs the loaded engine and dismisses the loading indicator.
	pub fn install_engine(&mut self, engine: EngineHandle) {
		info!(engine = engine.name(), "session.engine_ready");
		self.engine = Some(engine);
		self.dismiss_loading();
	}

	/// Current buffer text, as handed to the engine.
	pub fn source(&self) -> String {
		self.editor.text()
	}

	/// Shows a user-visible error message.
	pub fn show_error(&mut self, message: impl Into<String>) {
		let message = message.into();
		debug!(%message, "session.show_error");
		self.panel.show_error(message);
	}

	pub fn dismiss_error(&mut self) {
		self.panel.dismiss_error();
	}

	pub fn dismiss_loading(&mut self) {
		self.panel.dismiss_loading();
	}

	/// Renders a completed run's diagnostics, replacing prior output.
	pub fn render(&mut self, diagnostics: Vec<Diagnostic>) {
		ResultRenderer::render(&mut self.panel, &mut self.editor, &diagnostics);
		self.session.last_diagnostics = diagnostics;
	}

	/// Handles a change notification from the editor.
	pub fn handle_edit(&mut self, event: EditEvent) -> EditOutcome {
		self.session.dirty = true;
		self.session.source_text = self.editor.text();

		let outcome = self
			.session
			.scheduler
			.on_edit(event.origin, self.engine.is_some(), Instant::now());
		match outcome {
			EditOutcome::NotReady => self.show_error(EngineError::NotReady.to_string()),
			EditOutcome::RunNow => {
				self.start_run();
			}
			EditOutcome::Scheduled { .. } => {}
		}
		outcome
	}

	/// Replaces the buffer and reports the change.
	pub fn replace_text(&mut self, text: &str, origin: EditOrigin) -> EditOutcome {
		self.editor.set_text(text);
		self.handle_edit(EditEvent::new(origin))
	}

	/// Starts a run immediately, dropping any pending deadline.
	pub fn analyze_now(&mut self) -> Option<RunId> {
		if self.engine.is_none() {
			self.show_error(EngineError::NotReady.to_string());
			return None;
		}
		self.session.scheduler.cancel_pending();
		self.start_run()
	}

	/// Starts a run if the pending deadline has been reached.
	pub fn fire_due(&mut self, now: Instant) -> Option<RunId> {
		if self.session.scheduler.take_due(now) {
			self.start_run()
		} else {
			None
		}
	}

	fn start_run(&mut self) -> Option<RunId> {
		let engine = self.engine.clone()?;

		self.panel.clear_banners();
		self.editor.clear_markers();

		let run = self.session.scheduler.start_run();
		let source = self.editor.text();
		self.session.source_text.clone_from(&source);

		let analysis = tokio::spawn(async move { engine.run_analysis(source).await });
		let tx = self.internal_tx.clone();
		tokio::spawn(async move {
			let result = analysis.await;
			let _ = tx.send(Internal::RunFinished { run, result });
		});

		Some(run)
	}

	fn finish_run(
		&mut self,
		run: RunId,
		result: std::result::Result<lintpad_engine::Result<Vec<Diagnostic>>, JoinError>,
	) {
		self.session.scheduler.finish_run(run);
		match result {
			Ok(Ok(diagnostics)) => {
				debug!(run_id = run.0, count = diagnostics.len(), "session.run_completed");
				self.render(diagnostics);
			}
			Ok(Err(err)) => {
				warn!(run_id = run.0, error = %err, "session.run_failed");
				self.show_error(err.to_string());
			}
			Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
			Err(err) => warn!(run_id = run.0, error = %err, "session.run_cancelled"),
		}
	}

	/// Loads the buffer from a user-supplied URL and waits for the fetch.
	///
	/// Invalid input and failed fetches are shown to the user and leave the
	/// buffer untouched.
	pub async fn load_url(&mut self, input: &str) -> Result<()> {
		let url = match parse_remote_url(input) {
			Ok(url) => url,
			Err(err) => return self.apply_loaded(input, Err(err)),
		};
		let result = self.resolver.fetch_remote(&url).await;
		self.apply_loaded(input, result)
	}

	/// Starts loading from a URL without waiting; the result is applied by
	/// the event loop.
	pub fn begin_load_url(&mut self, input: String) {
		let url = match parse_remote_url(&input) {
			Ok(url) => url,
			Err(err) => {
				let _ = self.apply_loaded(&input, Err(err));
				return;
			}
		};

		self.loads_in_flight += 1;
		let resolver = self.resolver.clone();
		let tx = self.internal_tx.clone();
		tokio::spawn(async move {
			let result = resolver.fetch_remote(&url).await;
			let _ = tx.send(Internal::Loaded { input, result });
		});
	}

	fn apply_loaded(&mut self, input: &str, result: lintpad_source::Result<String>) -> Result<()> {
		match result {
			Ok(text) => {
				info!(url = input, bytes = text.len(), "session.loaded_url");
				self.replace_text(&text, EditOrigin::SetValue);
				Ok(())
			}
			Err(err) => {
				self.show_error(format!("Incorrect input \"{input}\": {err}"));
				Err(err.into())
			}
		}
	}

	/// Encodes the buffer into the page fragment and returns the full URL.
	pub fn generate_permalink(&mut self) -> String {
		let token = lintpad_codec::encode(&self.editor.text());
		self.location.set_fragment(&token);
		let permalink = self.location.to_string();
		debug!(token_len = token.as_str().len(), "session.permalink");
		permalink
	}

	/// Whether leaving the page should ask for confirmation.
	pub fn should_confirm_leave(&self) -> bool {
		self.session.dirty
	}

	/// Moves the cursor to summary row `index` and focuses the editor.
	pub fn activate_row(&mut self, index: usize) -> bool {
		ResultRenderer::activate_row(&self.panel, &mut self.editor, index)
	}

	/// Activates span `span` of row `row`; returns a URL to open for links.
	pub fn activate_span(&mut self, row: usize, span: usize) -> Option<String> {
		ResultRenderer::activate_span(&self.panel, &mut self.editor, row, span)
	}

	/// Applies one host event.
	pub fn handle_event(&mut self, event: SessionEvent) -> ControlFlow<()> {
		match event {
			SessionEvent::Edit(edit) => {
				self.handle_edit(edit);
			}
			SessionEvent::Replace { text, origin } => {
				self.replace_text(&text, origin);
			}
			SessionEvent::LoadUrl(input) => self.begin_load_url(input),
			SessionEvent::GeneratePermalink => {
				self.generate_permalink();
			}
			SessionEvent::ActivateRow(index) => {
				self.activate_row(index);
			}
			SessionEvent::DismissError => self.dismiss_error(),
			SessionEvent::Close => return ControlFlow::Break(()),
		}
		ControlFlow::Continue(())
	}

	fn handle_internal(&mut self, message: Internal) {
		match message {
			Internal::RunFinished { run, result } => self.finish_run(run, result),
			Internal::Loaded { input, result } => {
				self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
				let _ = self.apply_loaded(&input, result);
			}
		}
	}

	/// Runs the session until [`SessionEvent::Close`] or until the event
	/// sender is dropped, then hands the controller back.
	pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<SessionEvent>) -> Self {
		info!("session.started");
		loop {
			let deadline = self.session.scheduler.deadline();
			tokio::select! {
				event = events.recv() => {
					let Some(event) = event else { break };
					if self.handle_event(event).is_break() {
						break;
					}
				}
				Some(message) = self.internal_rx.recv() => self.handle_internal(message),
				() = wait_until(deadline) => {
					self.fire_due(Instant::now());
				}
			}
		}
		info!(dirty = self.session.dirty, "session.stopped");
		self
	}

	/// Processes timers and completions until nothing is pending or in
	/// flight.
	pub async fn settle(&mut self) {
		loop {
			let deadline = self.session.scheduler.deadline();
			if deadline.is_none() && self.session.scheduler.in_flight() == 0 && self.loads_in_flight == 0 {
				break;
			}
			tokio::select! {
				Some(message) = self.internal_rx.recv() => self.handle_internal(message),
				() = wait_until(deadline) => {
					self.fire_due(Instant::now());
				}
			}
		}
	}
}

async fn wait_until(deadline: Option<Instant>) {
	match deadline {
		Some(deadline) => sleep_until(deadline).await,
		None => future::pending().await,
	}
}
