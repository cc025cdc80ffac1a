/*
[INPUT]:  FetchStateMachine transitions and their ticketed completions
[OUTPUT]: BoardView output surface (busy/empty flags, display items, transient error)
[POS]:    Board core - joins fetch state with the last rendered projection
[UPDATE]: When output surface fields or their update rules change
*/

use taskboard_adapter::TaskRecord;
use tracing::{debug, warn};

use crate::fetch_state::{Completion, FetchState, FetchStateMachine, FetchTicket, StateError};
use crate::projector::{DisplayItem, project};

/// What the renderer draws from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardView {
    pub is_busy: bool,
    pub is_empty: bool,
    pub items: Vec<DisplayItem>,
    pub transient_error: Option<String>,
}

/// Fetch state plus everything derived from it for display.
///
/// `displayed` is the projection of the last applied success. Loading and
/// error transitions leave it alone; only the next success replaces it.
#[derive(Debug, Default)]
pub struct BoardModel {
    machine: FetchStateMachine,
    displayed: Vec<DisplayItem>,
    last_success_empty: Option<bool>,
    transient_error: Option<String>,
}

impl BoardModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.transient_error = None;
        self.machine.begin_fetch()
    }

    pub fn complete_success(
        &mut self,
        ticket: FetchTicket,
        items: Vec<TaskRecord>,
    ) -> Result<Completion, StateError> {
        let completion = self.machine.complete_success(ticket, items)?;
        if let (Completion::Applied, FetchState::Success(records)) =
            (completion, self.machine.state())
        {
            let displayed = project(records);
            debug!(%ticket, rows = displayed.len(), "board projected");
            self.last_success_empty = Some(displayed.is_empty());
            self.displayed = displayed;
        }
        Ok(completion)
    }

    pub fn complete_error(
        &mut self,
        ticket: FetchTicket,
        reason: impl Into<String>,
    ) -> Result<Completion, StateError> {
        let reason = reason.into();
        let completion = self.machine.complete_error(ticket, reason.clone())?;
        if completion == Completion::Applied {
            warn!(%ticket, error = %reason, "task fetch failed");
            self.transient_error = Some(reason);
        }
        Ok(completion)
    }

    pub fn state(&self) -> &FetchState {
        self.machine.state()
    }

    pub fn latest_ticket(&self) -> Option<FetchTicket> {
        self.machine.latest_ticket()
    }

    /// Consume the one-shot failure notification
    pub fn take_transient_error(&mut self) -> Option<String> {
        self.transient_error.take()
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.displayed
    }

    pub fn view(&self) -> BoardView {
        let is_busy = self.machine.state().is_loading();
        BoardView {
            is_busy,
            // Suppressed while loading; otherwise reflects the last applied success.
            is_empty: !is_busy && self.last_success_empty.unwrap_or(false),
            items: self.displayed.clone(),
            transient_error: self.transient_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: Option<&str>) -> TaskRecord {
        TaskRecord::new(id, format!("task {id}"), status)
    }

    #[test]
    fn idle_view_is_blank() {
        let board = BoardModel::new();
        assert_eq!(board.view(), BoardView::default());
    }

    #[test]
    fn loading_sets_busy_and_suppresses_empty() {
        let mut board = BoardModel::new();
        let ticket = board.begin_fetch();
        board.complete_success(ticket, Vec::new()).expect("complete");
        assert!(board.view().is_empty);

        board.begin_fetch();
        let view = board.view();
        assert!(view.is_busy);
        assert!(!view.is_empty);
    }

    #[test]
    fn empty_success_shows_empty_state() {
        let mut board = BoardModel::new();
        let ticket = board.begin_fetch();
        assert_eq!(board.complete_success(ticket, Vec::new()), Ok(Completion::Applied));

        let view = board.view();
        assert!(!view.is_busy);
        assert!(view.is_empty);
        assert!(view.items.is_empty());
    }

    #[test]
    fn error_preserves_prior_items() {
        let mut board = BoardModel::new();
        let first = board.begin_fetch();
        board
            .complete_success(first, vec![record("x", Some("done")), record("y", None)])
            .expect("complete");
        let before = board.view().items;

        let second = board.begin_fetch();
        board.complete_error(second, "network down").expect("complete");

        let view = board.view();
        assert_eq!(view.items, before);
        assert!(!view.is_busy);
        assert!(!view.is_empty);
        assert_eq!(view.transient_error.as_deref(), Some("network down"));
    }

    #[test]
    fn transient_error_is_one_shot_and_cleared_by_next_fetch() {
        let mut board = BoardModel::new();
        let ticket = board.begin_fetch();
        board.complete_error(ticket, "offline").expect("complete");

        assert_eq!(board.take_transient_error().as_deref(), Some("offline"));
        assert_eq!(board.take_transient_error(), None);

        let ticket = board.begin_fetch();
        board.complete_error(ticket, "still offline").expect("complete");
        board.begin_fetch();
        assert_eq!(board.view().transient_error, None);
    }

    #[test]
    fn stale_success_does_not_replace_items() {
        let mut board = BoardModel::new();
        let old = board.begin_fetch();
        let new = board.begin_fetch();

        board
            .complete_success(new, vec![record("b", Some("done"))])
            .expect("complete");
        assert_eq!(
            board.complete_success(old, vec![record("a", Some("created"))]),
            Ok(Completion::Stale)
        );

        let ids: Vec<_> = board
            .items()
            .iter()
            .filter_map(DisplayItem::record)
            .map(|record| record.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["b"]);
    }
}
