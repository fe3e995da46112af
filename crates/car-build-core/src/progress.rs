/*
[INPUT]:  Stage table, advance/reset requests from timer ticks and user actions
[OUTPUT]: Current build stage and its derived projections
[POS]:    Domain logic - linear progress state machine
[UPDATE]: When transitions or view projections change
*/

use crate::snapshot::ProgressSnapshot;
use crate::stage::Stage;

/// Owns the current build stage.
///
/// The model is a linear chain: `advance` moves one stage forward and is the
/// identity at [`Stage::TERMINAL`], `reset` returns to [`Stage::INITIAL`] from
/// anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressModel {
    current_stage: Stage,
}

impl ProgressModel {
    pub fn new() -> Self {
        Self {
            current_stage: Stage::INITIAL,
        }
    }

    pub fn current_stage(&self) -> Stage {
        self.current_stage
    }

    /// Move to the next stage.
    ///
    /// Returns `true` if the stage changed, `false` at the terminal stage.
    pub fn advance(&mut self) -> bool {
        match self.current_stage.next() {
            Some(next) => {
                tracing::debug!(from = %self.current_stage, to = %next, "build stage advanced");
                self.current_stage = next;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        tracing::info!(from = %self.current_stage, "build progress reset");
        self.current_stage = Stage::INITIAL;
    }

    /// Milestones reached so far, most recent first
    pub fn description_list(&self) -> Vec<&'static str> {
        self.current_stage
            .completed_milestones()
            .iter()
            .rev()
            .copied()
            .collect()
    }

    pub fn image_key(&self) -> &'static str {
        self.current_stage.image_key()
    }

    pub fn completion_fraction(&self) -> f64 {
        self.current_stage.completion_fraction()
    }

    pub fn status_label(&self) -> String {
        self.current_stage.status_label()
    }

    pub fn is_complete(&self) -> bool {
        self.current_stage.is_terminal()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            stage: self.current_stage,
            image_key: self.image_key().to_string(),
            completion_fraction: self.completion_fraction(),
            status: self.status_label(),
            milestones: self
                .description_list()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl Default for ProgressModel {
    fn default() -> Self {
        Self::new()
    }
}
