/*
[INPUT]:  AppState board view (grouped display items) and list selection
[OUTPUT]: Grouped task list rendered into Ratatui frame
[POS]:    TUI UI task list rendering
[UPDATE]: When changing row formatting or the empty/loading placeholders
*/

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use taskboard::{DisplayItem, item_label, sections, sticky_header};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, header_style};

const HIGHLIGHT_SYMBOL: &str = "> ";

pub(in crate::tui) fn draw_task_list(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    let items = &app.view.items;
    let summary = sections(items)
        .iter()
        .map(|section| format!("{} {}", section.label, section.count))
        .collect::<Vec<_>>()
        .join(" / ");
    let title = match sticky_header(items, app.list_state.offset()) {
        Some(label) if !summary.is_empty() => format!("Tasks [{label}] {summary}"),
        _ => "Tasks".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(title);

    if items.is_empty() {
        let placeholder = if app.view.is_busy {
            "Loading tasks..."
        } else if app.view.is_empty {
            "No tasks yet"
        } else {
            "Press [r] to load tasks"
        };
        let widget = Paragraph::new(Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let width = area
        .width
        .saturating_sub(2)
        .saturating_sub(HIGHLIGHT_SYMBOL.len() as u16) as usize;
    let rows = items
        .iter()
        .map(|item| match item {
            DisplayItem::Header(label) => ListItem::new(Line::from(Span::styled(
                truncate_to_width(label, width),
                header_style(),
            ))),
            DisplayItem::Item(record) => {
                ListItem::new(truncate_to_width(&item_label(record), width))
            }
        })
        .collect::<Vec<_>>();

    let list = List::new(rows)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Cut `text` to at most `max_width` terminal columns, marking the cut with `~`
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('~');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("[1] buy milk", 40), "[1] buy milk");
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcd~");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn wide_characters_count_double() {
        let cut = truncate_to_width("任务列表很长", 5);
        assert_eq!(cut, "任务~");
        assert!(cut.width() <= 5);
    }
}
