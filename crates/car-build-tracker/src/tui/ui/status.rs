/*
[INPUT]:  ProgressModel description list
[OUTPUT]: Milestone list, most recent first
[POS]:    TUI UI status panel
[UPDATE]: When milestone presentation changes
*/

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem};

use car_build_core::ProgressModel;

use crate::tui::runtime::border_style;

pub(in crate::tui) fn draw_status_list(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    model: &ProgressModel,
) {
    let items = model
        .description_list()
        .into_iter()
        .enumerate()
        .map(|(idx, milestone)| {
            // Latest milestone is highlighted.
            let style = if idx == 0 {
                Style::default()
                    .fg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(milestone).style(style)
        })
        .collect::<Vec<_>>();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Status"),
    );
    frame.render_widget(list, area);
}
