//! Read-only copies of engine state for presentation layers.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::state::BoardState;
use crate::board::Tile;
use crate::core::{GameRngState, TileHandle};

/// Point-in-time view of the board and tray.
///
/// The tile list shares structure with the live board, so taking a snapshot
/// is O(1) regardless of board size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Every tile ever created, including removed ones.
    pub tiles: Vector<Tile>,
    /// Tray contents, head to tail.
    pub tray: Vec<TileHandle>,
    pub state: BoardState,
    /// Shuffle stream position, for reproducing later shuffles.
    pub shuffle_rng: GameRngState,
}

impl BoardSnapshot {
    /// Tiles not yet removed.
    pub fn live_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(|t| !t.is_removed())
    }
}
