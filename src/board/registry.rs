//! Board registry: the single owner of every tile.
//!
//! The `Board` holds all tiles the generator created, indexed by handle and
//! by layer. Removed tiles stay in the registry (their handles remain valid
//! for lookups and events) but no longer count as live.
//!
//! Tiles are stored in an `im::Vector`, so taking a snapshot of the board
//! for a presentation layer is O(1).

use std::collections::BTreeMap;

use im::Vector;
use log::warn;

use super::tile::{Tile, TileLocation};
use crate::core::{TileHandle, Vec2};

#[derive(Clone, Debug, Default)]
pub struct Board {
    tiles: Vector<Tile>,
    layers: BTreeMap<u32, Vec<TileHandle>>,
    live: usize,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly generated tile.
    ///
    /// Panics if the handle is not the next dense index.
    pub fn insert(&mut self, tile: Tile) {
        assert_eq!(
            tile.handle.index(),
            self.tiles.len(),
            "Tile handles must be allocated densely"
        );
        self.layers.entry(tile.layer).or_default().push(tile.handle);
        if !tile.is_removed() {
            self.live += 1;
        }
        self.tiles.push_back(tile);
    }

    #[must_use]
    pub fn get(&self, handle: TileHandle) -> Option<&Tile> {
        self.tiles.get(handle.index())
    }

    /// All tiles ever created, in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Every tile that is not `Removed`, in generation order.
    pub fn live_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(|t| !t.is_removed())
    }

    /// Every tile currently `OnBoard`, in generation order.
    pub fn on_board(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(|t| t.is_on_board())
    }

    /// Handles placed on a layer, in generation order.
    #[must_use]
    pub fn layer(&self, layer: u32) -> &[TileHandle] {
        self.layers.get(&layer).map_or(&[], |v| v.as_slice())
    }

    /// Layer indices in ascending order.
    pub fn layer_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.layers.keys().copied()
    }

    /// Total tiles ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of tiles on the board or in the tray.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// True once every tile has been matched away.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.live == 0
    }

    /// Persistent copy of the tile list.
    #[must_use]
    pub fn tiles(&self) -> Vector<Tile> {
        self.tiles.clone()
    }

    /// Move a tile through its lifecycle. Illegal steps are ignored.
    pub(crate) fn set_location(&mut self, handle: TileHandle, to: TileLocation) -> bool {
        let Some(tile) = self.tiles.get_mut(handle.index()) else {
            warn!("location change for unknown {}", handle);
            return false;
        };
        let from = tile.location();
        if !tile.set_location(to) {
            warn!("ignored illegal transition {:?} -> {:?} for {}", from, to, handle);
            return false;
        }
        if to == TileLocation::Removed {
            self.live -= 1;
        }
        true
    }

    pub(crate) fn set_position(&mut self, handle: TileHandle, position: Vec2) {
        if let Some(tile) = self.tiles.get_mut(handle.index()) {
            tile.set_position(position);
        }
    }
}
