//! Rendering of analysis results.
//!
//! [`ResultRenderer::render`] replaces everything a previous render produced:
//! summary rows, gutter markers and the success/error banners. Rendering the
//! same diagnostics twice leaves the same state.

use std::collections::BTreeMap;

use lintpad_primitives::{Diagnostic, Marker, MessageSpan, Position, linkify};
use tracing::debug;

use crate::editor::EditorSurface;

/// One summary row for a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
	/// Where activating the row moves the cursor.
	pub position: Position,
	/// `line:{line}, col:{column}` tag.
	pub position_tag: String,
	/// Linkified message.
	pub message: Vec<MessageSpan>,
	/// Kind tag.
	pub kind: String,
}

impl SummaryRow {
	pub fn from_diagnostic(diag: &Diagnostic) -> Self {
		Self {
			position: diag.position(),
			position_tag: diag.position_tag(),
			message: linkify(&diag.message),
			kind: diag.kind.clone(),
		}
	}

	/// Message text with links inlined.
	pub fn message_text(&self) -> String {
		self.message.iter().map(MessageSpan::content).collect()
	}
}

/// Content of the error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBanner {
	/// The last analysis reported problems.
	Problems(usize),
	/// A user-facing error message.
	Message(String),
}

impl ErrorBanner {
	pub fn text(&self) -> String {
		match self {
			Self::Problems(1) => "1 problem found".to_string(),
			Self::Problems(n) => format!("{n} problems found"),
			Self::Message(message) => message.clone(),
		}
	}
}

/// Everything outside the editor that shows analysis state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
	success_visible: bool,
	error: Option<ErrorBanner>,
	loading_visible: bool,
	rows: Vec<SummaryRow>,
}

impl Default for ResultPanel {
	fn default() -> Self {
		Self::new()
	}
}

impl ResultPanel {
	/// A panel as shown at startup: loading indicator up, nothing else.
	pub fn new() -> Self {
		Self {
			success_visible: false,
			error: None,
			loading_visible: true,
			rows: Vec::new(),
		}
	}

	pub fn success_visible(&self) -> bool {
		self.success_visible
	}

	pub fn error_visible(&self) -> bool {
		self.error.is_some()
	}

	pub fn error(&self) -> Option<&ErrorBanner> {
		self.error.as_ref()
	}

	pub fn loading_visible(&self) -> bool {
		self.loading_visible
	}

	pub fn rows(&self) -> &[SummaryRow] {
		&self.rows
	}

	/// Shows a dismissible error message.
	pub fn show_error(&mut self, message: impl Into<String>) {
		self.error = Some(ErrorBanner::Message(message.into()));
	}

	pub fn dismiss_error(&mut self) {
		self.error = None;
	}

	pub fn dismiss_loading(&mut self) {
		self.loading_visible = false;
	}

	/// Hides both banners; done when a new run starts.
	pub fn clear_banners(&mut self) {
		self.success_visible = false;
		self.error = None;
	}
}

/// Maps zero-based lines to the marker shown there.
///
/// Diagnostics are visited in order, so the last one on a line wins.
pub fn build_marker_map(diagnostics: &[Diagnostic]) -> BTreeMap<usize, Marker> {
	let mut map = BTreeMap::new();
	for diag in diagnostics {
		map.insert(diag.line_index(), Marker::new(diag.column, diag.kind.clone()));
	}
	map
}

/// Turns diagnostics into rows, markers and banners.
pub struct ResultRenderer;

impl ResultRenderer {
	/// Replaces the previous output with `diagnostics`, in the given order.
	pub fn render(panel: &mut ResultPanel, editor: &mut impl EditorSurface, diagnostics: &[Diagnostic]) {
		panel.rows.clear();
		editor.clear_markers();

		if diagnostics.is_empty() {
			panel.success_visible = true;
			panel.error = None;
			debug!("render.success");
			return;
		}

		panel.success_visible = false;
		panel.error = Some(ErrorBanner::Problems(diagnostics.len()));
		panel.rows.extend(diagnostics.iter().map(SummaryRow::from_diagnostic));

		for (line, marker) in build_marker_map(diagnostics) {
			editor.set_marker(line, marker);
		}
		debug!(count = diagnostics.len(), "render.problems");
	}

	/// Activates summary row `index`: moves the cursor to the diagnostic and
	/// focuses the editor. Returns false for an unknown row.
	pub fn activate_row(panel: &ResultPanel, editor: &mut impl EditorSurface, index: usize) -> bool {
		let Some(row) = panel.rows.get(index) else {
			return false;
		};
		editor.set_cursor(row.position);
		editor.focus();
		true
	}

	/// Activates span `span` of row `row`. Links return their URL for the
	/// host to open and never move the cursor; plain spans activate the row.
	pub fn activate_span(
		panel: &ResultPanel,
		editor: &mut impl EditorSurface,
		row: usize,
		span: usize,
	) -> Option<String> {
		match panel.rows.get(row)?.message.get(span)? {
			MessageSpan::Link { url } => Some(url.clone()),
			MessageSpan::Plain(_) => {
				Self::activate_row(panel, editor, row);
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::editor::MemoryEditor;

	fn editor() -> MemoryEditor {
		MemoryEditor::with_text("on:\n  push:\n    branch: main\njobs:\n  test:\n")
	}

	#[test]
	fn empty_list_shows_success_and_clears_markers() {
		let mut panel = ResultPanel::new();
		let mut editor = editor();
		editor.set_marker(2, Marker::new(1, "stale"));
		panel.show_error("stale error");

		ResultRenderer::render(&mut panel, &mut editor, &[]);

		assert!(panel.success_visible());
		assert!(!panel.error_visible());
		assert!(panel.rows().is_empty());
		assert!(editor.markers().is_empty());
	}

	#[test]
	fn problems_hide_success() {
		let mut panel = ResultPanel::new();
		let mut editor = editor();
		ResultRenderer::render(&mut panel, &mut editor, &[]);

		let diags = [Diagnostic::new(3, 5, "unexpected key \"branch\"", "syntax-check")];
		ResultRenderer::render(&mut panel, &mut editor, &diags);

		assert!(!panel.success_visible());
		assert_eq!(panel.error(), Some(&ErrorBanner::Problems(1)));
		assert_eq!(panel.rows().len(), 1);
		assert_eq!(panel.rows()[0].position_tag, "line:3, col:5");
		assert_eq!(panel.rows()[0].kind, "syntax-check");
		assert_eq!(editor.marker(2), Some(&Marker::new(5, "syntax-check")));
	}

	#[test]
	fn rows_keep_input_order() {
		let mut panel = ResultPanel::new();
		let mut editor = editor();
		let diags = [
			Diagnostic::new(5, 1, "later line first", "a"),
			Diagnostic::new(1, 1, "earlier line second", "b"),
		];

		ResultRenderer::render(&mut panel, &mut editor, &diags);

		let kinds: Vec<_> = panel.rows().iter().map(|r| r.kind.as_str()).collect();
		assert_eq!(kinds, ["a", "b"]);
	}

	#[test]
	fn same_line_keeps_last_marker() {
		let mut panel = ResultPanel::new();
		let mut editor = editor();
		let diags = [
			Diagnostic::new(2, 3, "first", "first-kind"),
			Diagnostic::new(2, 7, "second", "second-kind"),
		];

		ResultRenderer::render(&mut panel, &mut editor, &diags);

		assert_eq!(editor.markers().len(), 1);
		assert_eq!(editor.marker(1), Some(&Marker::new(7, "second-kind")));
		assert_eq!(panel.rows().len(), 2);
	}

	#[test]
	fn render_is_idempotent() {
		let mut panel = ResultPanel::new();
		let mut editor = editor();
		let diags = [
			Diagnostic::new(1, 1, "see https://example.com/doc", "a"),
			Diagnostic::new(4, 2, "x", "b"),
		];

		ResultRenderer::render(&mut panel, &mut editor, &diags);
		let (first_panel, first_markers) = (panel.clone(), editor.markers().clone());
		ResultRenderer::render(&mut panel, &mut editor, &diags);

		assert_eq!(panel, first_panel);
		assert_eq!(editor.markers(), &first_markers);
	}

	#[test]
	fn activating_row_moves_cursor_and_focuses() {
		let mut panel = ResultPanel::new();
		let mut editor = editor();
		ResultRenderer::render(&mut panel, &mut editor, &[Diagnostic::new(3, 5, "m", "k")]);

		assert!(ResultRenderer::activate_row(&panel, &mut editor, 0));
		assert_eq!(editor.cursor(), Position::new(2, 4));
		assert!(editor.is_focused());
		assert!(!ResultRenderer::activate_row(&panel, &mut editor, 1));
	}

	#[test]
	fn activating_link_does_not_move_cursor() {
		let mut panel = ResultPanel::new();
		let mut editor = editor();
		ResultRenderer::render(
			&mut panel,
			&mut editor,
			&[Diagnostic::new(3, 5, "see https://example.com/rule for details", "k")],
		);

		let url = ResultRenderer::activate_span(&panel, &mut editor, 0, 1);
		assert_eq!(url.as_deref(), Some("https://example.com/rule"));
		assert_eq!(editor.cursor(), Position::new(0, 0));
		assert!(!editor.is_focused());

		assert_eq!(ResultRenderer::activate_span(&panel, &mut editor, 0, 0), None);
		assert_eq!(editor.cursor(), Position::new(2, 4));
	}

	#[test]
	fn row_message_text_round_trips_spans() {
		let row = SummaryRow::from_diagnostic(&Diagnostic::new(1, 1, "a https://x.y b", "k"));
		assert_eq!(row.message.len(), 3);
		assert_eq!(row.message_text(), "a https://x.y b");
	}
}
