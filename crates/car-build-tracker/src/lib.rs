/*
[INPUT]:  Public API exports for car-build-tracker crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod headless;
pub mod tui;

// Re-export main types for convenience
pub use config::TrackerConfig;
pub use headless::{HeadlessOptions, HeadlessSummary, run_headless};
