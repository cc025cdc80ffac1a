/*
[INPUT]:  Public API exports for taskboard crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod board;
pub mod config;
pub mod controller;
pub mod fetch_state;
pub mod projector;

// Re-export main types for convenience
pub use board::{BoardModel, BoardView};
pub use config::BoardConfig;
pub use controller::{FetchController, FetchOutcome, FetchTrigger};
pub use fetch_state::{Completion, FetchState, FetchStateMachine, FetchTicket, StateError};
pub use projector::{DisplayItem, Section, header_label, item_label, project, sections, sticky_header};
