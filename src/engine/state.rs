//! The board-busy lock.
//!
//! One enum replaces separate "shuffling" and "hint running" flags, so the
//! two can never be held at once. Every player-facing operation requires
//! `Idle`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::TileHandle;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Idle,
    Shuffling,
    HintRunning,
}

/// Lock plus the bookkeeping each busy state needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Activity {
    #[default]
    Idle,
    /// Shuffle relocations still outstanding.
    Shuffling { remaining: usize },
    /// Hint tiles not yet picked, in pick order.
    HintRunning { queued: SmallVec<[TileHandle; 2]> },
}

impl Activity {
    pub fn state(&self) -> BoardState {
        match self {
            Activity::Idle => BoardState::Idle,
            Activity::Shuffling { .. } => BoardState::Shuffling,
            Activity::HintRunning { .. } => BoardState::HintRunning,
        }
    }
}
