//! Tile entity: one placed piece.
//!
//! A tile is a passive data holder. Its symbol (`id`), layer, grid cell and
//! footprint are fixed at creation; only `location` and `position` change
//! over its life:
//!
//! ```text
//! OnBoard ──pick──▶ InTray ──match──▶ Removed (terminal)
//!    ▲                 │
//!    └──────undo───────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{GridPos, Rect, TileHandle, Vec2};

/// Where a tile currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileLocation {
    /// On the board, possibly covered by higher layers.
    OnBoard,
    /// Held in the tray.
    InTray,
    /// Cleared by a triple match. Terminal.
    Removed,
}

impl TileLocation {
    /// Check whether a move from `self` to `to` is a legal lifecycle step.
    #[must_use]
    pub fn can_transition(self, to: TileLocation) -> bool {
        matches!(
            (self, to),
            (TileLocation::OnBoard, TileLocation::InTray)
                | (TileLocation::InTray, TileLocation::OnBoard)
                | (TileLocation::InTray, TileLocation::Removed)
        )
    }
}

/// One placed tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Per-instance identity.
    pub handle: TileHandle,

    /// Symbol id. Tiles with equal ids match each other.
    pub id: i32,

    /// Layer index. Higher layers cover lower ones.
    pub layer: u32,

    /// Cell coordinate within the layer.
    pub grid: GridPos,

    /// Occlusion bounds, fixed at creation.
    pub footprint: Rect,

    location: TileLocation,
    position: Vec2,
}

impl Tile {
    /// Create a tile on the board at `position`.
    #[must_use]
    pub fn new(
        handle: TileHandle,
        id: i32,
        layer: u32,
        grid: GridPos,
        position: Vec2,
        footprint_size: Vec2,
    ) -> Self {
        Self {
            handle,
            id,
            layer,
            grid,
            footprint: Rect::centered(position, footprint_size),
            location: TileLocation::OnBoard,
            position,
        }
    }

    #[must_use]
    pub fn location(&self) -> TileLocation {
        self.location
    }

    /// Current logical world position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn is_on_board(&self) -> bool {
        self.location == TileLocation::OnBoard
    }

    #[must_use]
    pub fn is_in_tray(&self) -> bool {
        self.location == TileLocation::InTray
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.location == TileLocation::Removed
    }

    /// Move to a new location. Returns false (and changes nothing) if the
    /// lifecycle does not allow the step.
    pub(crate) fn set_location(&mut self, to: TileLocation) -> bool {
        if !self.location.can_transition(to) {
            return false;
        }
        self.location = to;
        true
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }
}
