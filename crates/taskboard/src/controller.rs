/*
[INPUT]:  Fetch triggers (initial load, manual refresh, resume, interval) and a TaskSource
[OUTPUT]: Ticketed FetchOutcomes applied to the BoardModel on the owner's task
[POS]:    Board core - fetch orchestration and refresh coordination
[UPDATE]: When adding triggers or changing how completions are routed back
*/

use std::fmt;
use std::sync::Arc;

use taskboard_adapter::{TaskApiError, TaskRecord, TaskSource};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::board::{BoardModel, BoardView};
use crate::config::TOKEN_ENV_VAR;
use crate::fetch_state::{Completion, FetchState, FetchTicket, StateError};

/// Why a fetch was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    InitialLoad,
    ManualRefresh,
    /// The view became active again
    Resume,
    /// Auto refresh timer
    Interval,
}

impl fmt::Display for FetchTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchTrigger::InitialLoad => "initial_load",
            FetchTrigger::ManualRefresh => "manual_refresh",
            FetchTrigger::Resume => "resume",
            FetchTrigger::Interval => "interval",
        };
        f.write_str(label)
    }
}

/// Result of one remote call, tagged with the ticket it was issued under
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Vec<TaskRecord>, String>,
}

/// Issues fetches and routes their completions back to a single owner.
///
/// Remote calls run on spawned tasks and only send `FetchOutcome`s; state is
/// mutated exclusively through `apply`, called by whoever owns the controller.
pub struct FetchController {
    source: Arc<dyn TaskSource>,
    subject_id: String,
    board: BoardModel,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    in_flight: usize,
}

impl FetchController {
    pub fn new(source: Arc<dyn TaskSource>, subject_id: impl Into<String>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            source,
            subject_id: subject_id.into(),
            board: BoardModel::new(),
            outcome_tx,
            outcome_rx,
            in_flight: 0,
        }
    }

    pub fn on_initial_load(&mut self) -> FetchTicket {
        self.trigger(FetchTrigger::InitialLoad)
    }

    pub fn on_manual_refresh(&mut self) -> FetchTicket {
        self.trigger(FetchTrigger::ManualRefresh)
    }

    pub fn on_resume(&mut self) -> FetchTicket {
        self.trigger(FetchTrigger::Resume)
    }

    pub fn on_interval(&mut self) -> FetchTicket {
        self.trigger(FetchTrigger::Interval)
    }

    /// Enter `Loading` and spawn one remote call. Never coalesces or debounces.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&mut self, trigger: FetchTrigger) -> FetchTicket {
        let ticket = self.board.begin_fetch();
        self.in_flight += 1;
        info!(
            %ticket,
            %trigger,
            subject_id = %self.subject_id,
            in_flight = self.in_flight,
            "fetching tasks"
        );

        let source = Arc::clone(&self.source);
        let subject_id = self.subject_id.clone();
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            // The call runs in its own task so a panic or abort still reports back.
            let call = tokio::spawn(async move {
                source
                    .fetch_tasks(&subject_id)
                    .await
                    .map_err(|err| failure_reason(&err))
            });
            let result = match call.await {
                Ok(result) => result,
                Err(err) => {
                    warn!(%ticket, error = %err, "fetch task did not finish");
                    Err(format!("fetch task did not finish: {err}"))
                }
            };
            if outcome_tx.send(FetchOutcome { ticket, result }).is_err() {
                debug!(%ticket, "controller dropped before fetch completed");
            }
        });

        ticket
    }

    /// Next completed remote call, in completion order (not issue order)
    pub async fn next_outcome(&mut self) -> Option<FetchOutcome> {
        self.outcome_rx.recv().await
    }

    /// Apply a completion; stale ones are dropped without touching the board
    pub fn apply(&mut self, outcome: FetchOutcome) -> Result<Completion, StateError> {
        let FetchOutcome { ticket, result } = outcome;

        let completion = match result {
            Ok(items) => {
                let count = items.len();
                let completion = self.board.complete_success(ticket, items)?;
                if completion == Completion::Applied {
                    info!(%ticket, count, "tasks loaded");
                }
                completion
            }
            Err(reason) => self.board.complete_error(ticket, reason)?,
        };
        self.in_flight = self.in_flight.saturating_sub(1);

        if completion == Completion::Stale {
            warn!(
                %ticket,
                latest = ?self.board.latest_ticket(),
                "dropping stale fetch result"
            );
        }
        Ok(completion)
    }

    /// Apply completions until the most recent fetch has finished
    pub async fn settle(&mut self) -> BoardView {
        while self.board.state().is_loading() {
            let Some(outcome) = self.next_outcome().await else {
                break;
            };
            if let Err(err) = self.apply(outcome) {
                warn!(error = %err, "ignoring invalid fetch completion");
            }
        }
        self.board.view()
    }

    pub fn view(&self) -> BoardView {
        self.board.view()
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    pub fn state(&self) -> &FetchState {
        self.board.state()
    }

    pub fn take_transient_error(&mut self) -> Option<String> {
        self.board.take_transient_error()
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Remote calls issued whose completion has not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// Text shown to the user for a failed fetch
fn failure_reason(err: &TaskApiError) -> String {
    if err.is_auth_error() {
        format!("{err} (check api.token or {TOKEN_ENV_VAR})")
    } else {
        err.to_string()
    }
}
