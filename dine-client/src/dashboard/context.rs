//! Dashboard context - the shell's only mutable state
//!
//! Holds the last applied table batch and the bookkeeping that keeps an old,
//! slow poll response from overwriting a newer one. Only the poll-completion
//! handler mutates it; rendering only reads it.

use crate::ClientResult;
use chrono::{DateTime, Local};
use shared::lifecycle::{TableCard, interpret_batch};

/// Host reachability as last observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No poll has resolved yet
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

/// Sequence tag handed out when a poll is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PollTicket {
    seq: u64,
}

/// What happened to a resolved poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Response replaced the displayed tables
    Applied { tables: usize, degraded: usize },
    /// Response was older than what is already displayed; dropped
    Stale { seq: u64, newest: u64 },
    /// Request failed; last-known-good tables stay on screen
    Failed,
}

#[derive(Debug, Default)]
pub struct DashboardContext {
    cards: Vec<TableCard>,
    /// Last ticket handed out
    issued_seq: u64,
    /// Newest ticket whose data is on screen
    applied_seq: u64,
    /// Newest ticket that has resolved either way
    resolved_seq: u64,
    connection: ConnectionStatus,
    last_updated: Option<DateTime<Local>>,
    last_error: Option<String>,
}

impl DashboardContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a poll that is about to be sent
    pub fn begin_poll(&mut self) -> PollTicket {
        self.issued_seq += 1;
        PollTicket {
            seq: self.issued_seq,
        }
    }

    /// Fold a resolved poll into the displayed state
    pub fn complete_poll(
        &mut self,
        ticket: PollTicket,
        result: ClientResult<Vec<serde_json::Value>>,
    ) -> PollOutcome {
        if ticket.seq <= self.applied_seq {
            tracing::debug!(
                seq = ticket.seq,
                newest = self.applied_seq,
                "Dropping stale poll response"
            );
            return PollOutcome::Stale {
                seq: ticket.seq,
                newest: self.applied_seq,
            };
        }

        // An older poll resolving late must not flip the indicator back
        let newest_resolution = ticket.seq > self.resolved_seq;
        self.resolved_seq = self.resolved_seq.max(ticket.seq);

        match result {
            Ok(values) => {
                let cards = interpret_batch(values);
                let degraded = cards.iter().filter(|c| c.is_degraded()).count();
                let tables = cards.len();

                self.cards = cards;
                self.applied_seq = ticket.seq;
                self.last_updated = Some(Local::now());
                if newest_resolution {
                    self.connection = ConnectionStatus::Connected;
                    self.last_error = None;
                }

                tracing::debug!(seq = ticket.seq, tables, degraded, "Applied table list");
                PollOutcome::Applied { tables, degraded }
            }
            Err(e) => {
                tracing::warn!(seq = ticket.seq, error = %e, "Failed to fetch tables");
                if newest_resolution {
                    self.connection = ConnectionStatus::Disconnected;
                    self.last_error = Some(e.to_string());
                }
                PollOutcome::Failed
            }
        }
    }

    /// Tables currently on screen, in host order
    pub fn cards(&self) -> &[TableCard] {
        &self.cards
    }

    pub fn connection(&self) -> ConnectionStatus {
        self.connection
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Sequence of the data currently on screen (0 before the first success)
    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }
}
