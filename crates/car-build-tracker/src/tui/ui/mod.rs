/*
[INPUT]:  AppState and progress model projections
[OUTPUT]: Panel render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When panels are added or removed
*/

mod layout;
mod logs;
mod progress;
mod status;

pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use progress::draw_progress_header;
pub(in crate::tui) use status::draw_status_list;
