/*
[INPUT]:  ProgressModel state
[OUTPUT]: Serializable point-in-time view of build progress
[POS]:    Data layer - snapshot for headless output and rendering
[UPDATE]: When adding fields to progress output
*/

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub stage: Stage,
    pub image_key: String,
    pub completion_fraction: f64,
    /// Progress caption, e.g. "Progress: 40.0%"
    pub status: String,
    /// Most recent milestone first
    pub milestones: Vec<String>,
}
