/*
[INPUT]:  FetchController, log buffer, UI timing options
[OUTPUT]: AppState helpers for TUI rendering, selection and refresh triggers
[POS]:    TUI app state
[UPDATE]: When adding tabs, selection rules, or new refresh triggers
*/

use std::time::{Duration, Instant};

use ratatui::widgets::ListState;
use taskboard::{BoardView, DisplayItem, FetchController, FetchOutcome};
use tracing::warn;

use crate::tui::LogBufferHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Tasks,
    Logs,
}

#[derive(Debug, Clone, Copy)]
pub struct TuiOptions {
    pub error_display: Duration,
    pub refresh_interval: Option<Duration>,
}

/// Fetch failure shown until `expires_at`
pub(super) struct ErrorBanner {
    pub(super) message: String,
    pub(super) expires_at: Instant,
}

pub(super) struct AppState {
    pub(super) controller: FetchController,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) view: BoardView,
    pub(super) list_state: ListState,
    pub(super) current_tab: Tab,
    pub(super) status_message: String,
    pub(super) error_banner: Option<ErrorBanner>,
    pub(super) spinner_frame: usize,
    options: TuiOptions,
    last_auto_refresh: Instant,
}

impl AppState {
    pub(super) fn new(
        controller: FetchController,
        log_buffer: LogBufferHandle,
        options: TuiOptions,
    ) -> Self {
        let view = controller.view();
        Self {
            controller,
            log_buffer,
            view,
            list_state: ListState::default(),
            current_tab: Tab::Tasks,
            status_message: "Ready".to_string(),
            error_banner: None,
            spinner_frame: 0,
            options,
            last_auto_refresh: Instant::now(),
        }
    }

    pub(super) fn initial_load(&mut self) {
        self.controller.on_initial_load();
        self.last_auto_refresh = Instant::now();
        self.sync_view();
    }

    pub(super) fn manual_refresh(&mut self) {
        self.controller.on_manual_refresh();
        self.last_auto_refresh = Instant::now();
        self.status_message = "Refreshing".to_string();
        self.sync_view();
    }

    pub(super) fn resume(&mut self) {
        self.controller.on_resume();
        self.last_auto_refresh = Instant::now();
        self.sync_view();
    }

    pub(super) fn on_tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);

        if self
            .error_banner
            .as_ref()
            .is_some_and(|banner| banner.expires_at <= Instant::now())
        {
            self.error_banner = None;
        }

        if let Some(interval) = self.options.refresh_interval {
            if self.last_auto_refresh.elapsed() >= interval {
                self.controller.on_interval();
                self.last_auto_refresh = Instant::now();
                self.sync_view();
            }
        }
    }

    pub(super) fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if let Err(err) = self.controller.apply(outcome) {
            warn!(error = %err, "ignoring invalid fetch completion");
        }

        if let Some(message) = self.controller.take_transient_error() {
            self.status_message = "Refresh failed".to_string();
            self.error_banner = Some(ErrorBanner {
                message,
                expires_at: Instant::now() + self.options.error_display,
            });
        } else if !self.controller.state().is_loading() {
            self.status_message = format!("{} tasks", self.task_count());
        }
        self.sync_view();
    }

    fn task_count(&self) -> usize {
        self.controller
            .board()
            .items()
            .iter()
            .filter(|item| item.record().is_some())
            .count()
    }

    /// Pull the latest view and keep the selection on a task row
    fn sync_view(&mut self) {
        self.view = self.controller.view();
        let selectable = self.selectable_rows();
        let selected = self.list_state.selected();
        match (selected, selectable.first()) {
            (_, None) => self.list_state.select(None),
            (Some(index), Some(_)) if selectable.contains(&index) => {}
            (Some(index), Some(&first)) => {
                let fallback = selectable
                    .iter()
                    .copied()
                    .filter(|row| *row <= index)
                    .last()
                    .unwrap_or(first);
                self.list_state.select(Some(fallback));
            }
            (None, Some(&first)) => self.list_state.select(Some(first)),
        }
    }

    fn selectable_rows(&self) -> Vec<usize> {
        self.view
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches!(item, DisplayItem::Item(_)))
            .map(|(index, _)| index)
            .collect()
    }

    /// Move between task rows, skipping headers
    pub(super) fn move_selection(&mut self, delta: i32) {
        let selectable = self.selectable_rows();
        if selectable.is_empty() {
            self.list_state.select(None);
            return;
        }
        let current = self
            .list_state
            .selected()
            .and_then(|selected| selectable.iter().position(|row| *row == selected))
            .unwrap_or(0) as i32;
        let max = selectable.len() as i32 - 1;
        let next = (current + delta).clamp(0, max) as usize;
        self.list_state.select(Some(selectable[next]));
    }

    pub(super) fn select_first(&mut self) {
        let first = self.selectable_rows().first().copied();
        self.list_state.select(first);
    }

    pub(super) fn select_last(&mut self) {
        let last = self.selectable_rows().last().copied();
        self.list_state.select(last);
    }

    pub(super) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Tasks => Tab::Logs,
            Tab::Logs => Tab::Tasks,
        };
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }
}
