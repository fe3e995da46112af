/*
[INPUT]:  Progress model, auto-advance timer, UI event sender, log buffer
[OUTPUT]: AppState owning all screen state and the user-facing actions
[POS]:    TUI app state - the only place the progress model is mutated
[UPDATE]: When adding screen actions or state shown by the view
*/

use crossterm::event::Event as CrosstermEvent;
use tokio::sync::mpsc;

use car_build_core::{AutoAdvanceTimer, PeriodicScheduler, ProgressModel, TickInterval};

use crate::tui::LogBufferHandle;

pub(crate) enum UiEvent {
    Input(CrosstermEvent),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Status,
    Logs,
}

pub(crate) struct AppState {
    pub(crate) model: ProgressModel,
    pub(crate) timer: AutoAdvanceTimer,
    pub(crate) events: mpsc::UnboundedSender<UiEvent>,
    pub(crate) log_buffer: LogBufferHandle,
    pub(crate) current_tab: Tab,
    pub(crate) status_message: String,
    pub(crate) tick_count: u64,
}

impl AppState {
    pub(crate) fn new(
        timer: AutoAdvanceTimer,
        events: mpsc::UnboundedSender<UiEvent>,
        log_buffer: LogBufferHandle,
    ) -> Self {
        Self {
            model: ProgressModel::new(),
            timer,
            events,
            log_buffer,
            current_tab: Tab::Status,
            status_message: "Ready".to_string(),
            tick_count: 0,
        }
    }

    pub(crate) fn interval(&self) -> TickInterval {
        self.timer.interval()
    }

    pub(crate) fn auto_advance_enabled(&self) -> bool {
        self.timer.is_running()
    }

    pub(crate) fn start_auto_advance(&mut self) {
        let events = self.events.clone();
        self.timer.start(Box::new(move || {
            let _ = events.send(UiEvent::Tick);
        }));
        self.status_message = format!("auto-advance every {}", self.interval());
    }

    pub(crate) fn pause_auto_advance(&mut self) {
        self.timer.stop();
        self.status_message = "auto-advance paused".to_string();
    }

    pub(crate) fn toggle_auto_advance(&mut self) {
        if self.auto_advance_enabled() {
            self.pause_auto_advance();
        } else {
            self.start_auto_advance();
        }
    }

    pub(crate) fn on_tick(&mut self) {
        self.tick_count += 1;
        if self.model.advance() {
            self.status_message = format!("tick {}: {}", self.tick_count, self.model.current_stage());
        }
    }

    pub(crate) fn next_step(&mut self) {
        if self.model.advance() {
            self.status_message = format!("advanced to {}", self.model.current_stage());
        } else {
            self.status_message = "build already complete".to_string();
        }
    }

    pub(crate) fn reset_progress(&mut self) {
        self.model.reset();
        self.status_message = "progress reset".to_string();
    }

    pub(crate) fn increment_interval(&mut self) {
        self.set_interval(self.interval().increment());
    }

    pub(crate) fn decrement_interval(&mut self) {
        self.set_interval(self.interval().decrement());
    }

    fn set_interval(&mut self, interval: TickInterval) {
        if interval == self.interval() {
            self.status_message = format!("interval unchanged ({interval})");
            return;
        }
        self.timer.configure(interval.secs());
        tracing::info!(interval_secs = interval.secs(), "auto-advance interval changed");
        self.status_message = format!("interval set to {interval}");
    }

    pub(crate) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Status => Tab::Logs,
            Tab::Logs => Tab::Status,
        };
    }
}
