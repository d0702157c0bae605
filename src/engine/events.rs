//! Engine events for presentation and game-flow layers.
//!
//! The engine appends events as state changes; consumers drain them with
//! `Engine::drain_events`. Events describe what already happened and carry
//! no behaviour of their own.

use serde::{Deserialize, Serialize};

use crate::core::TileHandle;

/// Why a pick was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Covered by a higher tile, not on the board, or unknown.
    NotSelectable,
    /// The tray is at capacity.
    TrayFull,
    /// A shuffle or hint holds the board.
    Busy,
}

/// Why a tile left play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Cleared as part of a triple.
    Matched,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A tile became (un)selectable. The first report for every tile is
    /// always emitted.
    SelectabilityChanged { tile: TileHandle, selectable: bool },
    TileRemoved { tile: TileHandle, reason: RemovalReason },
    /// The board and tray are both empty. Fired once per engine.
    LevelComplete,
    PickRejected { tile: TileHandle, reason: RejectReason },
}

impl EngineEvent {
    /// The tile this event concerns, if any.
    #[must_use]
    pub fn tile(&self) -> Option<TileHandle> {
        match self {
            EngineEvent::SelectabilityChanged { tile, .. }
            | EngineEvent::TileRemoved { tile, .. }
            | EngineEvent::PickRejected { tile, .. } => Some(*tile),
            EngineEvent::LevelComplete => None,
        }
    }
}
