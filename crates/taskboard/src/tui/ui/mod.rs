/*
[INPUT]:  TUI app state and board view for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding panels
*/

mod banner;
mod layout;
mod logs;
mod task_list;

pub(in crate::tui) use banner::draw_error_banner;
pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use task_list::draw_task_list;
