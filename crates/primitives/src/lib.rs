//! Core types for the playground: diagnostics, edit origins, cursor
//! positions, gutter markers and linkified message spans.

/// Diagnostics reported by the analysis engine.
pub mod diagnostic;
/// Edit event types.
pub mod edit;
/// Splitting of diagnostic messages into plain and link spans.
pub mod linkify;
/// Gutter marker types.
pub mod marker;
/// Zero-based cursor positions.
pub mod position;

pub use diagnostic::Diagnostic;
pub use edit::{EditEvent, EditOrigin};
pub use linkify::{MessageSpan, linkify};
pub use marker::{MARKER_GLYPH, Marker};
pub use position::Position;
