//! Relocation requests and their continuations.
//!
//! The engine never moves anything on screen. It queues a
//! `RelocationRequest` for the driver and remembers what to do once that
//! request completes. The driver performs the move however it likes and
//! reports back with `Engine::complete_relocation(ticket)`.
//!
//! ```text
//! pick ──▶ [state change] ──▶ outbox: Request(ticket) ──▶ driver animates
//!                                                              │
//!        match resolution ◀── complete_relocation(ticket) ◀────┘
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{TileHandle, Vec2};

/// Identifies one relocation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelocationTicket(pub u64);

impl std::fmt::Display for RelocationTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Relocation({})", self.0)
    }
}

/// What kind of move is requested. Informational for the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelocationKind {
    /// A picked tile flying to its tray slot.
    ToTray,
    /// A tray tile sliding to a new slot after a match.
    Repack,
    /// An undone tile returning to the board.
    ToBoard,
    /// A board tile moving to its shuffled position.
    Shuffle,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelocationRequest {
    pub ticket: RelocationTicket,
    pub tile: TileHandle,
    pub target: Vec2,
    pub kind: RelocationKind,
}

/// Work resumed when a ticket completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Continuation {
    /// Run match resolution; if the pick came from a hint, continue it.
    PickArrived { from_hint: bool },
    /// Count down the running shuffle batch.
    ShuffleMoved,
    /// Nothing to resume.
    Settled,
}

/// Outbox of requests plus the continuations still waiting on them.
#[derive(Clone, Debug, Default)]
pub(crate) struct RelocationQueue {
    next: u64,
    outbox: Vec<RelocationRequest>,
    pending: FxHashMap<RelocationTicket, Continuation>,
}

impl RelocationQueue {
    pub fn issue(
        &mut self,
        tile: TileHandle,
        target: Vec2,
        kind: RelocationKind,
        continuation: Continuation,
    ) -> RelocationTicket {
        let ticket = RelocationTicket(self.next);
        self.next += 1;
        self.outbox.push(RelocationRequest {
            ticket,
            tile,
            target,
            kind,
        });
        self.pending.insert(ticket, continuation);
        ticket
    }

    /// Hand queued requests to the driver.
    pub fn drain(&mut self) -> Vec<RelocationRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Take the continuation for a ticket. `None` if unknown or already
    /// completed.
    pub fn complete(&mut self, ticket: RelocationTicket) -> Option<Continuation> {
        self.pending.remove(&ticket)
    }

    /// Outstanding tickets in issue order.
    pub fn pending_tickets(&self) -> Vec<RelocationTicket> {
        let mut tickets: Vec<_> = self.pending.keys().copied().collect();
        tickets.sort_unstable();
        tickets
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_pending(&self, ticket: RelocationTicket) -> bool {
        self.pending.contains_key(&ticket)
    }
}
