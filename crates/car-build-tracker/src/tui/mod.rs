/*
[INPUT]:  Progress model, auto-advance timer, captured logs
[OUTPUT]: Ratatui terminal UI for the build tracker
[POS]:    TUI module root
[UPDATE]: When adding TUI submodules or public entry points
*/

mod app;
mod events;
mod log_buffer;
mod runtime;
mod terminal;
mod ui;

pub use log_buffer::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriter, LogWriterFactory};
pub use runtime::{TuiOptions, run_tui};
