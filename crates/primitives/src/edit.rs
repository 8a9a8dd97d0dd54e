/// Where a buffer change came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EditOrigin {
	/// Keyboard input, deletions and other incremental edits.
	#[default]
	Input,
	/// A bulk paste. Analysis runs immediately instead of after the quiet period.
	Paste,
	/// Content replaced programmatically (loading from a URL or permalink).
	SetValue,
	/// Undo or redo.
	History,
}

impl EditOrigin {
	/// Returns true for bulk-paste edits, which bypass the debounce.
	pub const fn is_paste(self) -> bool {
		matches!(self, Self::Paste)
	}
}

/// Change notification emitted by the editor after its text changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEvent {
	pub origin: EditOrigin,
}

impl EditEvent {
	pub const fn new(origin: EditOrigin) -> Self {
		Self { origin }
	}
}

impl From<EditOrigin> for EditEvent {
	fn from(origin: EditOrigin) -> Self {
		Self { origin }
	}
}
