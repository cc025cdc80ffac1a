/*
[INPUT]:  FetchController, log buffer, and shutdown token from main
[OUTPUT]: Ratatui-based TUI for the grouped task board and logs
[POS]:    TUI module for the taskboard binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use app::TuiOptions;
pub use runtime::{LogBuffer, LogBufferHandle, LogWriterFactory, run_tui};
pub(crate) use runtime::LOG_BUFFER_CAPACITY;
