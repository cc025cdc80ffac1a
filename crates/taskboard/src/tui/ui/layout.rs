/*
[INPUT]:  Current tab selection
[OUTPUT]: Tab bar rendered into Ratatui frame
[POS]:    TUI UI layout helpers
[UPDATE]: When adding tabs
*/

use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};

use crate::tui::app::Tab;
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_tabs(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    current_tab: Tab,
) {
    let titles = vec![Line::from("Tasks"), Line::from("Logs")];
    let selected = match current_tab {
        Tab::Tasks => 0,
        Tab::Logs => 1,
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title("Taskboard"),
        )
        .highlight_style(header_style())
        .select(selected);

    frame.render_widget(tabs, area);
}
