/*
[INPUT]:  Startup options, log buffer, crossterm input, auto-advance ticks
[OUTPUT]: Ratatui-based TUI run loop and top-level rendering
[POS]:    TUI runtime loop and shared styles
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use car_build_core::{AutoAdvanceTimer, TickInterval};

use super::app::{AppState, Tab, UiEvent};
use super::events::handle_key_event;
use super::terminal::TerminalGuard;
use super::ui::*;
use super::LogBufferHandle;

const UI_REDRAW_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy)]
pub struct TuiOptions {
    pub interval: TickInterval,
    /// Start the auto-advance timer immediately
    pub auto_advance: bool,
}

pub async fn run_tui(options: TuiOptions, log_buffer: LogBufferHandle) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();
    let input_tx = event_tx.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = input_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let timer = AutoAdvanceTimer::current(options.interval)?;
    let mut app = AppState::new(timer, event_tx, log_buffer);
    if options.auto_advance {
        app.start_auto_advance();
    }
    tracing::info!(
        interval_secs = options.interval.secs(),
        auto_advance = options.auto_advance,
        "tracker started"
    );

    // Redraws keep the log tab current between input and ticks.
    let mut redraw = tokio::time::interval(UI_REDRAW_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = redraw.tick() => {}
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c');
                        if ctrl_c || handle_key_event(&mut app, key.code) {
                            should_quit = true;
                        }
                    }
                    Some(UiEvent::Tick) => app.on_tick(),
                    Some(UiEvent::Input(_)) => {}
                    None => should_quit = true,
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &app))?;
    }

    app.pause_auto_advance();
    input_shutdown.cancel();
    tracing::info!(stage = %app.model.current_stage(), ticks = app.tick_count, "tracker stopped");
    Ok(())
}

pub(super) fn draw_ui(frame: &mut ratatui::Frame, app: &AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    match app.current_tab {
        Tab::Status => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(6), Constraint::Min(3)])
                .split(layout[0]);
            draw_progress_header(frame, content[0], &app.model);
            draw_status_list(frame, content[1], &app.model);
        }
        Tab::Logs => {
            draw_logs(frame, layout[0], &app.log_buffer);
        }
    }

    draw_tabs(frame, layout[1], app.current_tab);
    draw_footer(frame, layout[2], app);
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = Line::from(vec![
        Span::styled("[n]", key_style),
        Span::raw(" Next step  "),
        Span::styled("[r]", key_style),
        Span::raw(" Reset  "),
        Span::styled("[+/-]", key_style),
        Span::raw(" Interval  "),
        Span::styled("[p]", key_style),
        Span::raw(" Pause/Resume  "),
        Span::styled("[Tab]", key_style),
        Span::raw(" Switch  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit"),
    ]);
    let auto_label = if app.auto_advance_enabled() { "on" } else { "off" };
    let line2 = Line::from(vec![
        Span::raw(format!("Interval: {}  ", app.interval())),
        Span::raw(format!("Auto-advance: {auto_label}  ")),
        Span::raw(format!("Status: {}", app.status_message)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, line2]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}
