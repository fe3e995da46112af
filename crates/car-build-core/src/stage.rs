/*
[INPUT]:  Fixed build order and per-stage presentation data
[OUTPUT]: Stage enum with table-driven attributes (image key, fraction, milestones)
[POS]:    Data layer - ordered build stages
[UPDATE]: When a build step is added, renamed, or re-weighted
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseStageError;

/// One step of the car build, in strict build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Suspension,
    SuspensionFrame,
    SuspensionFrameDoors,
    SuspensionFrameDoorsWindshield,
    SuspensionFrameDoorsWindshieldWheels,
    Qc,
    Testing,
    PassedAllTests,
    ReadyForCollection,
}

struct StageInfo {
    name: &'static str,
    image_key: &'static str,
    completion_fraction: f64,
}

// Indexed by `Stage::position`.
const STAGE_TABLE: [StageInfo; 9] = [
    StageInfo {
        name: "suspension",
        image_key: "suspension",
        completion_fraction: 0.1,
    },
    StageInfo {
        name: "suspensionFrame",
        image_key: "carframe",
        completion_fraction: 0.4,
    },
    StageInfo {
        name: "suspensionFrameDoors",
        image_key: "wheelless windshieldless",
        completion_fraction: 0.5,
    },
    StageInfo {
        name: "suspensionFrameDoorsWindshield",
        image_key: "wheelless",
        completion_fraction: 0.7,
    },
    StageInfo {
        name: "suspensionFrameDoorsWindshieldWheels",
        image_key: "car",
        completion_fraction: 0.8,
    },
    StageInfo {
        name: "qc",
        image_key: "car",
        completion_fraction: 0.9,
    },
    StageInfo {
        name: "testing",
        image_key: "car",
        completion_fraction: 0.95,
    },
    StageInfo {
        name: "passedAllTests",
        image_key: "car",
        completion_fraction: 0.99,
    },
    StageInfo {
        name: "readyForCollection",
        image_key: "car",
        completion_fraction: 1.0,
    },
];

// Milestone `i` is the label earned on reaching stage `i`. Cumulative lists are
// prefixes of this array, so labels never move once assigned.
const MILESTONES: [&str; 9] = [
    "Retrieved suspension",
    "Fitted frame",
    "Attached doors",
    "Attached windshield",
    "Attached wheels",
    "Undergoing quality checks",
    "Car testing in progress",
    "Car passed all tests",
    "Ready for collection",
];

impl Stage {
    /// All stages in build order
    pub const ALL: [Stage; 9] = [
        Stage::Suspension,
        Stage::SuspensionFrame,
        Stage::SuspensionFrameDoors,
        Stage::SuspensionFrameDoorsWindshield,
        Stage::SuspensionFrameDoorsWindshieldWheels,
        Stage::Qc,
        Stage::Testing,
        Stage::PassedAllTests,
        Stage::ReadyForCollection,
    ];

    /// First stage of every build
    pub const INITIAL: Stage = Stage::Suspension;

    /// Stage after which the build can no longer advance
    pub const TERMINAL: Stage = Stage::ReadyForCollection;

    /// Zero-based position in build order
    pub fn position(self) -> usize {
        self as usize
    }

    /// The following stage, or `None` at the terminal stage
    pub fn next(self) -> Option<Stage> {
        Self::ALL.get(self.position() + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self == Self::TERMINAL
    }

    /// Symbolic name of the illustration for this stage
    pub fn image_key(self) -> &'static str {
        self.info().image_key
    }

    /// Share of the build completed, in `[0, 1]`
    pub fn completion_fraction(self) -> f64 {
        self.info().completion_fraction
    }

    /// The milestone label earned by reaching this stage
    pub fn milestone(self) -> &'static str {
        MILESTONES[self.position()]
    }

    /// Every milestone reached so far, oldest first
    pub fn completed_milestones(self) -> &'static [&'static str] {
        &MILESTONES[..=self.position()]
    }

    /// Caption shown next to the progress bar
    pub fn status_label(self) -> String {
        if self.is_terminal() {
            self.milestone().to_string()
        } else {
            format!("Progress: {:.1}%", self.completion_fraction() * 100.0)
        }
    }

    pub fn as_str(self) -> &'static str {
        self.info().name
    }

    fn info(self) -> &'static StageInfo {
        &STAGE_TABLE[self.position()]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| ParseStageError {
                name: s.to_string(),
            })
    }
}
