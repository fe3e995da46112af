/*
[INPUT]:  Tick interval, optional tick limit, shutdown token, output writer
[OUTPUT]: One JSON snapshot line per build step, final run summary
[POS]:    Headless runner - drives the progress model without a terminal UI
[UPDATE]: When headless output format or stop conditions change
*/

use std::io::Write;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use car_build_core::{AutoAdvanceTimer, PeriodicScheduler, ProgressModel, Stage, TickInterval};

#[derive(Debug, Clone, Copy)]
pub struct HeadlessOptions {
    pub interval: TickInterval,
    /// Stop after this many ticks. `None` stops once the build is complete.
    pub max_ticks: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub ticks: u64,
    pub final_stage: Stage,
}

pub async fn run_headless<W: Write>(
    options: HeadlessOptions,
    out: &mut W,
    shutdown: CancellationToken,
) -> Result<HeadlessSummary> {
    let mut timer = AutoAdvanceTimer::current(options.interval)?;
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    timer.start(Box::new(move || {
        let _ = tick_tx.send(());
    }));

    let mut model = ProgressModel::new();
    write_snapshot(out, &model)?;

    let mut ticks = 0u64;
    while !is_finished(ticks, &model, options.max_ticks) {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("shutdown requested; stopping headless run");
                break;
            }
            tick = tick_rx.recv() => {
                if tick.is_none() {
                    tracing::warn!("tick channel closed");
                    break;
                }
                ticks += 1;
                let advanced = model.advance();
                tracing::info!(
                    tick = ticks,
                    stage = %model.current_stage(),
                    advanced,
                    "build step"
                );
                write_snapshot(out, &model)?;
            }
        }
    }

    timer.stop();
    Ok(HeadlessSummary {
        ticks,
        final_stage: model.current_stage(),
    })
}

fn is_finished(ticks: u64, model: &ProgressModel, max_ticks: Option<u64>) -> bool {
    match max_ticks {
        Some(limit) => ticks >= limit,
        None => model.is_complete(),
    }
}

fn write_snapshot<W: Write>(out: &mut W, model: &ProgressModel) -> Result<()> {
    serde_json::to_writer(&mut *out, &model.snapshot()).context("serialize snapshot")?;
    writeln!(out).context("write snapshot")?;
    out.flush().context("flush snapshot")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use car_build_core::ProgressSnapshot;
    use std::time::Duration;
    use tokio::time::Instant;

    fn parse_lines(out: &[u8]) -> Vec<ProgressSnapshot> {
        String::from_utf8_lossy(out)
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_until_complete() {
        let mut out = Vec::new();
        let options = HeadlessOptions {
            interval: TickInterval::new(1),
            max_ticks: None,
        };
        let started = Instant::now();
        let summary = run_headless(options, &mut out, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.ticks, 8);
        assert_eq!(summary.final_stage, Stage::ReadyForCollection);
        assert_eq!(started.elapsed(), Duration::from_secs(8));

        let snapshots = parse_lines(&out);
        assert_eq!(snapshots.len(), 9);
        assert_eq!(snapshots[0].stage, Stage::Suspension);
        assert_eq!(snapshots[8].status, "Ready for collection");
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_ticks_limits_run() {
        let mut out = Vec::new();
        let options = HeadlessOptions {
            interval: TickInterval::new(3),
            max_ticks: Some(2),
        };
        let summary = run_headless(options, &mut out, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.final_stage, Stage::SuspensionFrameDoors);
        assert_eq!(parse_lines(&out).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_run() {
        let mut out = Vec::new();
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let options = HeadlessOptions {
            interval: TickInterval::new(1),
            max_ticks: None,
        };
        let summary = run_headless(options, &mut out, shutdown).await.unwrap();

        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.final_stage, Stage::Suspension);
        assert_eq!(parse_lines(&out).len(), 1);
    }
}
