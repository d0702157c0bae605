//! Occlusion: which tiles can be picked right now.
//!
//! A tile is selectable when it is on the board and no other on-board tile
//! on a strictly higher layer overlaps its footprint. Everything here is a
//! pure function of the current board; nothing is cached across mutations.

use super::registry::Board;
use super::tile::Tile;
use crate::core::TileHandle;

/// Check whether `tile` is covered by a higher on-board tile.
#[must_use]
pub fn is_covered(board: &Board, tile: &Tile) -> bool {
    board.on_board().any(|other| {
        other.handle != tile.handle
            && other.layer > tile.layer
            && other.footprint.intersects(&tile.footprint)
    })
}

/// Check whether the tile behind `handle` can be picked.
///
/// Unknown handles are never selectable.
#[must_use]
pub fn is_selectable(board: &Board, handle: TileHandle) -> bool {
    board
        .get(handle)
        .is_some_and(|tile| tile.is_on_board() && !is_covered(board, tile))
}

/// Every selectable tile, in board order.
#[must_use]
pub fn selectable_tiles(board: &Board) -> Vec<TileHandle> {
    board
        .on_board()
        .filter(|tile| !is_covered(board, tile))
        .map(|tile| tile.handle)
        .collect()
}
