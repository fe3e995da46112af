/*
[INPUT]:  ProgressModel (stage, image key, completion fraction)
[OUTPUT]: Illustration label and progress gauge
[POS]:    TUI UI header panel shown above the milestone list
[UPDATE]: When the progress header layout changes
*/

use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use car_build_core::ProgressModel;

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_progress_header(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    model: &ProgressModel,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    let image = Paragraph::new(Line::from(vec![
        Span::raw("Illustration: "),
        Span::styled(
            model.image_key(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!("Stage: {}", model.current_stage())),
    );
    frame.render_widget(image, rows[0]);

    let gauge_color = if model.is_complete() {
        Color::LightGreen
    } else {
        Color::Yellow
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Progress"),
        )
        .gauge_style(Style::default().fg(gauge_color).bg(Color::DarkGray))
        .ratio(model.completion_fraction().clamp(0.0, 1.0))
        .label(Span::styled(
            model.status_label(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(gauge, rows[1]);
}
