/*
[INPUT]:  FetchController, log buffer, shutdown token, crossterm input
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or the event loop
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{Event as CrosstermEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use taskboard::FetchController;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

use super::app::{AppState, Tab, TuiOptions};
use super::events::{handle_focus_gained, handle_key_event};
use super::terminal::TerminalGuard;
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub(crate) const LOG_BUFFER_CAPACITY: usize = 2000;
const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    fn push(&self, line: String) {
        // A poisoned buffer only loses log lines; never take the UI down for it.
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push_line(line);
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let chunk = String::from_utf8_lossy(buf);
        self.partial.push_str(&chunk);
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial = self.partial[pos + 1..].to_string();
            self.push(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.push(line);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

pub async fn run_tui(
    controller: FetchController,
    options: TuiOptions,
    log_buffer: LogBufferHandle,
    shutdown: CancellationToken,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if ratatui::crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = ratatui::crossterm::event::read() {
                    if event_tx.send(UiEvent::Input(event)).is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut app = AppState::new(controller, log_buffer, options);
    app.initial_load();

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = shutdown.cancelled() => {
                should_quit = true;
            }
            _ = tick.tick() => {
                app.on_tick();
            }
            Some(outcome) = app.controller.next_outcome() => {
                app.apply_outcome(outcome);
            }
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        if handle_key_event(&mut app, key.code) {
                            should_quit = true;
                        }
                    }
                    Some(UiEvent::Input(CrosstermEvent::FocusGained)) => {
                        handle_focus_gained(&mut app);
                    }
                    Some(_) => {}
                    None => should_quit = true,
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();
    let banner_height = if app.error_banner.is_some() { 3 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[0], app.current_tab);
    if let Some(banner) = app.error_banner.as_ref() {
        draw_error_banner(frame, layout[1], &banner.message);
    }

    match app.current_tab {
        Tab::Tasks => draw_task_list(frame, layout[2], app),
        Tab::Logs => draw_logs(frame, layout[2], &app.log_buffer),
    }

    draw_footer(frame, layout[3], app);
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = Line::from(vec![
        Span::styled("[Up/Down]", key_style),
        Span::raw(" Select  "),
        Span::styled("[Tab/1/2]", key_style),
        Span::raw(" Tabs  "),
        Span::styled("[r]", key_style),
        Span::raw(" Refresh  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit"),
    ]);

    let activity = if app.view.is_busy {
        let frame_index = app.spinner_frame % SPINNER_FRAMES.len();
        Span::styled(
            format!("{} Refreshing", SPINNER_FRAMES[frame_index]),
            Style::default().fg(Color::Cyan),
        )
    } else {
        Span::raw(format!("Status: {}", app.status_message))
    };
    let line2 = Line::from(vec![
        Span::raw(format!("Subject: {}  ", subject_label(app.controller.subject_id()))),
        activity,
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, line2]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn subject_label(subject_id: &str) -> &str {
    if subject_id.is_empty() { "(all)" } else { subject_id }
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

pub(crate) fn error_style() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
