/*
[INPUT]:  Fetch begin/complete events tagged with FetchTicket
[OUTPUT]: Validated FetchState transitions with stale-completion guard
[POS]:    Board core - lifecycle of the most recent remote retrieval
[UPDATE]: When fetch lifecycle states or completion rules change
*/

use std::fmt;

use taskboard_adapter::TaskRecord;
use thiserror::Error;

/// Lifecycle stage of the most recent remote retrieval
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No fetch ever issued
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Last fetch completed with the complete, unfiltered result set
    Success(Vec<TaskRecord>),
    /// Last fetch failed
    Error(String),
}

impl FetchState {
    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Success(_) => "success",
            FetchState::Error(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

/// Sequence number handed out by every `begin_fetch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn value(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_value(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to a completion handed to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer fetch was issued after this one; the result was dropped
    Stale,
}

/// Errors occurring during state transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("completion for {ticket} while {state}")]
    NotLoading {
        ticket: FetchTicket,
        state: &'static str,
    },
    #[error("completion for {ticket} which was never issued")]
    UnknownTicket { ticket: FetchTicket },
}

/// State machine over `FetchState`.
///
/// Only the latest ticket may complete a `Loading` state. Older tickets are
/// reported as `Completion::Stale` and never touch the state.
#[derive(Debug, Default)]
pub struct FetchStateMachine {
    state: FetchState,
    latest: u64,
}

impl FetchStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Loading` from any state, discarding the held payload
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest += 1;
        self.state = FetchState::Loading;
        FetchTicket(self.latest)
    }

    pub fn complete_success(
        &mut self,
        ticket: FetchTicket,
        items: Vec<TaskRecord>,
    ) -> Result<Completion, StateError> {
        self.complete(ticket, FetchState::Success(items))
    }

    pub fn complete_error(
        &mut self,
        ticket: FetchTicket,
        reason: impl Into<String>,
    ) -> Result<Completion, StateError> {
        self.complete(ticket, FetchState::Error(reason.into()))
    }

    fn complete(&mut self, ticket: FetchTicket, next: FetchState) -> Result<Completion, StateError> {
        if ticket.0 == 0 || ticket.0 > self.latest {
            return Err(StateError::UnknownTicket { ticket });
        }
        if ticket.0 < self.latest {
            return Ok(Completion::Stale);
        }
        if !self.state.is_loading() {
            return Err(StateError::NotLoading {
                ticket,
                state: self.state.name(),
            });
        }

        self.state = next;
        Ok(Completion::Applied)
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Ticket of the most recent fetch, if any was issued
    pub fn latest_ticket(&self) -> Option<FetchTicket> {
        (self.latest > 0).then_some(FetchTicket(self.latest))
    }
}
