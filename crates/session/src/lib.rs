//! Playground session orchestration.
//!
//! ```text
//! edit ──▶ SessionController ──▶ AnalysisScheduler (quiet period / paste)
//!                 │                        │
//!                 │                        ▼
//!                 │                 EngineHandle::run_analysis
//!                 │                        │
//!                 ▼                        ▼
//!          SourceResolver           ResultRenderer ──▶ markers + summary rows
//!          lintpad_codec
//! ```
//!
//! Everything runs on one task. The controller owns the [`Session`] and is
//! the only thing that mutates it; engine runs and URL fetches report back
//! over a channel.

pub mod controller;
pub mod editor;
mod error;
pub mod location;
pub mod render;
pub mod scheduler;
mod session;
pub mod startup;

pub use controller::{SessionController, SessionEvent};
pub use editor::{EditorSurface, MemoryEditor};
pub use error::{Result, SessionError};
pub use location::PageLocation;
pub use render::{ErrorBanner, ResultPanel, ResultRenderer, SummaryRow};
pub use scheduler::{AnalysisScheduler, EditOutcome, RunId, SchedulerPhase};
pub use session::Session;
pub use startup::{DEFAULT_SOURCE, StartupSource, load_startup_source, select_startup_reference};
