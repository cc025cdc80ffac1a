/*
[INPUT]:  Transient fetch error message
[OUTPUT]: Error banner rendered into Ratatui frame
[POS]:    TUI UI error banner
[UPDATE]: When changing how fetch failures are surfaced
*/

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::runtime::error_style;

pub(in crate::tui) fn draw_error_banner(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    message: &str,
) {
    let widget = Paragraph::new(Line::from(Span::styled(message.to_string(), error_style())))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(error_style())
                .title("Refresh failed"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}
