/*
[INPUT]:  CLI arguments, optional YAML configuration file, OS shutdown signals
[OUTPUT]: Terminal UI session or headless JSON snapshot stream
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use car_build_core::TickInterval;
use car_build_tracker::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogWriterFactory, TuiOptions, run_tui};
use car_build_tracker::{HeadlessOptions, TrackerConfig, run_headless};

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "car-build-tracker", version, about = "Car build progress tracker")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    /// Seconds between automatic steps (minimum 1)
    #[arg(long = "interval", value_name = "SECS")]
    interval: Option<u64>,
    #[arg(long = "log-level", value_name = "LEVEL")]
    log_level: Option<String>,
    /// Print JSON snapshots instead of drawing the terminal UI
    #[arg(long = "headless")]
    headless: bool,
    /// Stop after N ticks (headless only); default is to stop when the build completes
    #[arg(long = "max-ticks", value_name = "N", requires = "headless")]
    max_ticks: Option<u64>,
    /// Start with auto-advance paused
    #[arg(long = "no-auto-advance", conflicts_with = "headless")]
    no_auto_advance: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = TrackerConfig::load(args.config_path.as_deref()).context("load config")?;

    let log_level = args
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let requested_secs = args.interval.unwrap_or(config.interval_seconds);
    let interval = TickInterval::new(requested_secs);

    if args.headless {
        init_tracing(&log_level, None)?;
        warn_if_clamped(requested_secs, interval);
        info!(
            interval_secs = interval.secs(),
            max_ticks = ?args.max_ticks,
            "starting headless run"
        );

        let shutdown = CancellationToken::new();
        setup_signal_handlers(shutdown.clone());

        let options = HeadlessOptions {
            interval,
            max_ticks: args.max_ticks,
        };
        let mut stdout = io::stdout();
        let summary = run_headless(options, &mut stdout, shutdown)
            .await
            .context("headless run")?;
        info!(
            ticks = summary.ticks,
            final_stage = %summary.final_stage,
            "headless run finished"
        );
        return Ok(());
    }

    let log_buffer = LogBuffer::handle(LOG_BUFFER_CAPACITY);
    init_tracing(&log_level, Some(LogWriterFactory::new(log_buffer.clone())))?;
    warn_if_clamped(requested_secs, interval);

    let options = TuiOptions {
        interval,
        auto_advance: config.auto_advance && !args.no_auto_advance,
    };
    run_tui(options, log_buffer).await.context("run terminal UI")
}

fn init_tracing(log_level: &str, tui_writer: Option<LogWriterFactory>) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match tui_writer {
        Some(writer) => builder.with_ansi(false).with_writer(writer).try_init(),
        None => builder.with_writer(io::stderr).try_init(),
    };
    result
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn warn_if_clamped(requested_secs: u64, interval: TickInterval) {
    if requested_secs != interval.secs() {
        warn!(
            requested_secs,
            interval_secs = interval.secs(),
            "interval below minimum; clamped"
        );
    }
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
