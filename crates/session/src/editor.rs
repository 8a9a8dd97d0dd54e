//! Text-editing capability used by the session.
//!
//! The session only needs a narrow slice of an editor: read and replace the
//! text, move the cursor, take focus, and decorate lines with gutter markers.
//! [`MemoryEditor`] implements it over a rope for headless hosts and tests.

use std::collections::BTreeMap;

use lintpad_primitives::{EditEvent, EditOrigin, Marker, Position};
use ropey::Rope;
use tracing::trace;

/// Editor operations the session drives.
///
/// Implementations do not report their own changes back; whoever changes the
/// text hands the resulting [`EditEvent`] to the controller.
pub trait EditorSurface {
	/// Current buffer content.
	fn text(&self) -> String;

	/// Replaces the whole buffer.
	fn set_text(&mut self, text: &str);

	/// Current cursor position.
	fn cursor(&self) -> Position;

	/// Moves the cursor, clamped to the document.
	fn set_cursor(&mut self, position: Position);

	/// Gives the editor keyboard focus.
	fn focus(&mut self);

	/// Places `marker` on zero-based `line`, replacing any marker already there.
	fn set_marker(&mut self, line: usize, marker: Marker);

	/// Removes every marker.
	fn clear_markers(&mut self);
}

/// Rope-backed [`EditorSurface`] without any UI.
#[derive(Debug, Clone, Default)]
pub struct MemoryEditor {
	rope: Rope,
	cursor: Position,
	focused: bool,
	markers: BTreeMap<usize, Marker>,
}

impl MemoryEditor {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_text(text: &str) -> Self {
		Self {
			rope: Rope::from_str(text),
			..Self::default()
		}
	}

	/// Inserts `text` at `position` (clamped) and returns the change event.
	pub fn insert(&mut self, position: Position, text: &str, origin: EditOrigin) -> EditEvent {
		let position = self.clamp(position);
		let char_idx = self.rope.line_to_char(position.line) + position.column;
		self.rope.insert(char_idx, text);
		EditEvent::new(origin)
	}

	/// Appends `text` at the end of the buffer and returns the change event.
	pub fn append(&mut self, text: &str, origin: EditOrigin) -> EditEvent {
		self.rope.insert(self.rope.len_chars(), text);
		EditEvent::new(origin)
	}

	/// Replaces the buffer as a user action (e.g. select-all + paste).
	pub fn replace(&mut self, text: &str, origin: EditOrigin) -> EditEvent {
		self.set_text(text);
		EditEvent::new(origin)
	}

	pub fn markers(&self) -> &BTreeMap<usize, Marker> {
		&self.markers
	}

	pub fn marker(&self, line: usize) -> Option<&Marker> {
		self.markers.get(&line)
	}

	pub fn is_focused(&self) -> bool {
		self.focused
	}

	/// Length of `line` in chars, excluding its line break.
	fn line_len(&self, line: usize) -> usize {
		let slice = self.rope.line(line);
		let mut len = slice.len_chars();
		if len > 0 && slice.char(len - 1) == '\n' {
			len -= 1;
			if len > 0 && slice.char(len - 1) == '\r' {
				len -= 1;
			}
		}
		len
	}

	fn clamp(&self, position: Position) -> Position {
		let line = position.line.min(self.rope.len_lines().saturating_sub(1));
		Position::new(line, position.column.min(self.line_len(line)))
	}
}

impl EditorSurface for MemoryEditor {
	fn text(&self) -> String {
		self.rope.to_string()
	}

	fn set_text(&mut self, text: &str) {
		self.rope = Rope::from_str(text);
		self.cursor = self.clamp(self.cursor);
	}

	fn cursor(&self) -> Position {
		self.cursor
	}

	fn set_cursor(&mut self, position: Position) {
		self.cursor = self.clamp(position);
	}

	fn focus(&mut self) {
		self.focused = true;
	}

	fn set_marker(&mut self, line: usize, marker: Marker) {
		if line >= self.rope.len_lines() {
			trace!(line, "editor.marker_out_of_range");
			return;
		}
		self.markers.insert(line, marker);
	}

	fn clear_markers(&mut self) {
		self.markers.clear();
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn insert_at_position() {
		let mut editor = MemoryEditor::with_text("on: push\njobs:\n");
		let event = editor.insert(Position::new(1, 5), " {}", EditOrigin::Input);

		assert_eq!(event.origin, EditOrigin::Input);
		assert_eq!(editor.text(), "on: push\njobs: {}\n");
	}

	#[test]
	fn insert_clamps_past_end_of_line() {
		let mut editor = MemoryEditor::with_text("ab\ncd");
		editor.insert(Position::new(0, 99), "!", EditOrigin::Input);
		assert_eq!(editor.text(), "ab!\ncd");
	}

	#[test]
	fn cursor_is_clamped() {
		let mut editor = MemoryEditor::with_text("one\r\ntwo");
		editor.set_cursor(Position::new(0, 10));
		assert_eq!(editor.cursor(), Position::new(0, 3));
		editor.set_cursor(Position::new(7, 1));
		assert_eq!(editor.cursor(), Position::new(1, 1));
	}

	#[test]
	fn markers_replace_per_line() {
		let mut editor = MemoryEditor::with_text("a\nb\nc");
		editor.set_marker(1, Marker::new(1, "first"));
		editor.set_marker(1, Marker::new(2, "second"));
		editor.set_marker(9, Marker::new(1, "out of range"));

		assert_eq!(editor.markers().len(), 1);
		assert_eq!(editor.marker(1), Some(&Marker::new(2, "second")));

		editor.clear_markers();
		assert!(editor.markers().is_empty());
	}

	#[test]
	fn set_text_keeps_cursor_in_bounds() {
		let mut editor = MemoryEditor::with_text("line one\nline two\nline three");
		editor.set_cursor(Position::new(2, 5));
		editor.set_text("x");
		assert_eq!(editor.cursor(), Position::new(0, 1));
	}
}
