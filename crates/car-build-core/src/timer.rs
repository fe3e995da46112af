/*
[INPUT]:  Tick interval (whole seconds), tick callback, Tokio runtime handle
[OUTPUT]: Cancellable periodic scheduler driving auto-advance
[POS]:    Scheduling layer - runtime-agnostic trait plus Tokio implementation
[UPDATE]: When tick semantics or reconfiguration behaviour change
*/

use std::fmt;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::error::TimerError;

// Matches the far-future deadline tokio uses for unbounded sleeps. Longer
// periods are capped so deadline arithmetic cannot overflow `Instant`.
const MAX_TICK_PERIOD: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Callback invoked once per tick
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Tick period in whole seconds, never below one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickInterval(u64);

impl TickInterval {
    pub const MIN_SECS: u64 = 1;
    pub const DEFAULT_SECS: u64 = 2;

    /// Values below one second are clamped up to one second.
    pub fn new(seconds: u64) -> Self {
        Self(seconds.max(Self::MIN_SECS))
    }

    pub fn secs(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One second shorter, floored at [`Self::MIN_SECS`]
    pub fn decrement(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self(Self::DEFAULT_SECS)
    }
}

impl fmt::Display for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// A cancellable periodic scheduler, independent of the event loop that hosts it.
pub trait PeriodicScheduler {
    /// Replace the interval. A running cycle restarts from now with the new period.
    fn configure(&mut self, seconds: u64);

    /// Invoke `on_tick` every interval until stopped. Replaces any running cycle.
    fn start(&mut self, on_tick: TickCallback);

    /// Cancel future ticks. No-op when idle.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    fn interval(&self) -> TickInterval;
}

struct RunningCycle {
    shutdown: CancellationToken,
    interval_tx: watch::Sender<TickInterval>,
    task: JoinHandle<()>,
}

/// [`PeriodicScheduler`] backed by a task on a Tokio runtime.
pub struct AutoAdvanceTimer {
    handle: Handle,
    interval: TickInterval,
    running: Option<RunningCycle>,
}

impl AutoAdvanceTimer {
    pub fn new(handle: Handle, interval: TickInterval) -> Self {
        Self {
            handle,
            interval,
            running: None,
        }
    }

    /// Build a timer on the runtime of the calling thread.
    pub fn current(interval: TickInterval) -> Result<Self, TimerError> {
        let handle = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        Ok(Self::new(handle, interval))
    }
}

impl PeriodicScheduler for AutoAdvanceTimer {
    fn configure(&mut self, seconds: u64) {
        let interval = TickInterval::new(seconds);
        if interval.secs() != seconds {
            tracing::warn!(
                requested_secs = seconds,
                interval_secs = interval.secs(),
                "tick interval clamped"
            );
        }
        self.interval = interval;
        if let Some(cycle) = self.running.as_ref() {
            cycle.interval_tx.send_replace(interval);
        }
        tracing::debug!(
            interval_secs = interval.secs(),
            running = self.running.is_some(),
            "auto-advance interval configured"
        );
    }

    fn start(&mut self, on_tick: TickCallback) {
        self.stop();

        let shutdown = CancellationToken::new();
        let (interval_tx, interval_rx) = watch::channel(self.interval);
        let task = self
            .handle
            .spawn(run_cycle(interval_rx, shutdown.clone(), on_tick));
        self.running = Some(RunningCycle {
            shutdown,
            interval_tx,
            task,
        });
        tracing::debug!(interval_secs = self.interval.secs(), "auto-advance started");
    }

    fn stop(&mut self) {
        if let Some(cycle) = self.running.take() {
            cycle.shutdown.cancel();
            tracing::debug!("auto-advance stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|cycle| !cycle.shutdown.is_cancelled() && !cycle.task.is_finished())
    }

    fn interval(&self) -> TickInterval {
        self.interval
    }
}

impl Drop for AutoAdvanceTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_cycle(
    mut interval_rx: watch::Receiver<TickInterval>,
    shutdown: CancellationToken,
    mut on_tick: TickCallback,
) {
    let mut ticker = new_ticker(*interval_rx.borrow_and_update());

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            changed = interval_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                ticker = new_ticker(*interval_rx.borrow_and_update());
            }
            _ = ticker.tick() => {
                tracing::trace!("auto-advance tick");
                on_tick();
            }
        }
    }
}

// First tick lands one full period from now, not immediately.
fn new_ticker(interval: TickInterval) -> Interval {
    let period = interval.as_duration().min(MAX_TICK_PERIOD);
    let now = Instant::now();
    let start = now
        .checked_add(period)
        .or_else(|| now.checked_add(Duration::from_secs(86_400)))
        .unwrap_or(now);
    let mut ticker = time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn channel_callback() -> (TickCallback, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let callback: TickCallback = Box::new(move || {
            let _ = tx.send(());
        });
        (callback, rx)
    }

    #[test]
    fn test_interval_clamps_to_one_second() {
        assert_eq!(TickInterval::new(0).secs(), 1);
        assert_eq!(TickInterval::new(1).secs(), 1);
        assert_eq!(TickInterval::new(7).secs(), 7);
    }

    #[test]
    fn test_interval_stepper() {
        let interval = TickInterval::default();
        assert_eq!(interval.secs(), 2);
        assert_eq!(interval.increment().secs(), 3);
        assert_eq!(interval.decrement().secs(), 1);
        assert_eq!(interval.decrement().decrement().secs(), 1);
        assert_eq!(TickInterval::new(u64::MAX).increment().secs(), u64::MAX);
    }

    #[test]
    fn test_current_without_runtime_fails() {
        let result = AutoAdvanceTimer::current(TickInterval::default());
        assert!(matches!(result, Err(TimerError::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_full_interval() {
        let mut timer = AutoAdvanceTimer::current(TickInterval::new(2)).unwrap();
        let (callback, mut rx) = channel_callback();
        let started = Instant::now();
        timer.start(callback);
        assert!(timer.is_running());

        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(2));

        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_configure_zero_never_schedules_zero_interval() {
        let mut timer = AutoAdvanceTimer::current(TickInterval::default()).unwrap();
        timer.configure(0);
        assert_eq!(timer.interval().secs(), 1);

        let (callback, mut rx) = channel_callback();
        let started = Instant::now();
        timer.start(callback);
        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconfigure_restarts_cycle() {
        let mut timer = AutoAdvanceTimer::current(TickInterval::new(10)).unwrap();
        let (callback, mut rx) = channel_callback();
        let started = Instant::now();
        timer.start(callback);

        time::sleep(Duration::from_secs(2)).await;
        timer.configure(3);

        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(5));

        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_future_ticks() {
        let mut timer = AutoAdvanceTimer::current(TickInterval::new(1)).unwrap();
        let (callback, mut rx) = channel_callback();
        timer.start(callback);
        timer.stop();
        assert!(!timer.is_running());

        // The cycle drops its callback (and sender) on exit.
        let result = timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_interval_keeps_cycle_alive() {
        let mut timer = AutoAdvanceTimer::current(TickInterval::new(u64::MAX)).unwrap();
        let (callback, mut rx) = channel_callback();
        timer.start(callback);

        // Still pending: no tick yet, and the sender has not been dropped.
        assert!(timeout(Duration::from_millis(500), rx.recv()).await.is_err());
        assert!(timer.is_running());

        timer.configure(TickInterval::new(u64::MAX).increment().secs());
        assert!(timeout(Duration::from_secs(60), rx.recv()).await.is_err());
        assert!(timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dead_cycle_is_not_running() {
        let mut timer = AutoAdvanceTimer::current(TickInterval::new(1)).unwrap();
        timer.start(Box::new(|| panic!("tick callback failed")));
        assert!(timer.is_running());

        time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert!(!timer.is_running());
    }

    #[tokio::test]
    async fn test_stop_when_idle_is_noop() {
        let mut timer = AutoAdvanceTimer::current(TickInterval::default()).unwrap();
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_configure_while_stopped_applies_on_start() {
        let mut timer = AutoAdvanceTimer::current(TickInterval::new(2)).unwrap();
        timer.configure(5);
        let (callback, mut rx) = channel_callback();
        let started = Instant::now();
        timer.start(callback);
        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_previous_callback() {
        let mut timer = AutoAdvanceTimer::current(TickInterval::new(1)).unwrap();
        let (first, mut first_rx) = channel_callback();
        let (second, mut second_rx) = channel_callback();
        timer.start(first);
        timer.start(second);

        second_rx.recv().await.unwrap();
        assert!(matches!(
            timeout(Duration::from_secs(3), first_rx.recv()).await,
            Ok(None)
        ));
    }
}
