use serde::{Deserialize, Serialize};

use crate::position::Position;

/// One issue reported by the analysis engine.
///
/// Lines and columns are 1-based as reported by the engine. Any extra fields
/// in the engine output (file path, snippet, end column) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
	/// 1-based line number.
	pub line: u32,
	/// 1-based column number.
	pub column: u32,
	/// Free-form message text, may embed URLs.
	pub message: String,
	/// Short categorical tag (rule name).
	pub kind: String,
}

impl Diagnostic {
	pub fn new(line: u32, column: u32, message: impl Into<String>, kind: impl Into<String>) -> Self {
		Self {
			line,
			column,
			message: message.into(),
			kind: kind.into(),
		}
	}

	/// Zero-based line index used for gutter markers.
	pub const fn line_index(&self) -> usize {
		self.line.saturating_sub(1) as usize
	}

	/// Zero-based cursor position of the diagnostic.
	pub const fn position(&self) -> Position {
		Position::new(self.line_index(), self.column.saturating_sub(1) as usize)
	}

	/// Position tag shown in summary rows, e.g. `line:3, col:7`.
	pub fn position_tag(&self) -> String {
		format!("line:{}, col:{}", self.line, self.column)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn deserializes_engine_output_ignoring_extra_fields() {
		let json = r#"[{
			"message": "unexpected key \"branch\" for \"push\" section",
			"filepath": "<stdin>",
			"line": 5,
			"column": 5,
			"kind": "syntax-check",
			"snippet": "    branch: main",
			"end_column": 10
		}]"#;

		let diags: Vec<Diagnostic> = serde_json::from_str(json).unwrap();
		assert_eq!(
			diags,
			vec![Diagnostic::new(
				5,
				5,
				"unexpected key \"branch\" for \"push\" section",
				"syntax-check"
			)]
		);
	}

	#[test]
	fn zero_based_position() {
		let diag = Diagnostic::new(3, 7, "msg", "kind");
		assert_eq!(diag.line_index(), 2);
		assert_eq!(diag.position(), Position::new(2, 6));
		assert_eq!(diag.position_tag(), "line:3, col:7");
	}

	#[test]
	fn zero_line_saturates() {
		let diag = Diagnostic::new(0, 0, "msg", "kind");
		assert_eq!(diag.position(), Position::new(0, 0));
	}
}
