/// Glyph drawn in the marker gutter.
pub const MARKER_GLYPH: char = '●';

/// A gutter marker placed on one line of the buffer.
///
/// Lines hold at most one marker; placing another replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
	/// 1-based column of the diagnostic that placed this marker.
	pub column: u32,
	/// Kind tag of that diagnostic.
	pub kind: String,
}

impl Marker {
	pub fn new(column: u32, kind: impl Into<String>) -> Self {
		Self {
			column,
			kind: kind.into(),
		}
	}
}
