/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public car-build-core crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod error;
pub mod progress;
pub mod snapshot;
pub mod stage;
pub mod timer;

pub use error::{ParseStageError, TimerError};
pub use progress::ProgressModel;
pub use snapshot::ProgressSnapshot;
pub use stage::Stage;
pub use timer::{AutoAdvanceTimer, PeriodicScheduler, TickCallback, TickInterval};
