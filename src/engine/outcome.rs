//! Results of player-facing operations.
//!
//! Rejections are ordinary values: the board is left untouched and the
//! caller may simply retry later.

use serde::{Deserialize, Serialize};

use super::events::RejectReason;
use super::relocation::RelocationTicket;
use crate::core::TileHandle;

/// Result of `Engine::pick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickOutcome {
    /// The tile is in the tray; match resolution runs when this relocation
    /// completes.
    Accepted(RelocationTicket),
    Rejected(RejectReason),
}

impl PickOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, PickOutcome::Accepted(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UndoRejection {
    Busy,
    /// No history, or an empty tray.
    NothingToUndo,
    /// The newest record is not the tile at the tray tail.
    NotTrayTail,
}

/// Result of `Engine::undo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndoOutcome {
    /// The tile went back to the board.
    Restored(TileHandle),
    Rejected(UndoRejection),
}

/// Result of `Engine::shuffle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleOutcome {
    /// The board is locked until this many relocations complete.
    Started { moves: usize },
    /// No layer had more than one on-board tile. The board stays idle.
    NothingToShuffle,
    Rejected(RejectReason),
}

/// Result of `Engine::hint`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintOutcome {
    /// These three tiles are being picked in order.
    Started([TileHandle; 3]),
    /// No id has three selectable tiles.
    NoMatch,
    Rejected(RejectReason),
}
