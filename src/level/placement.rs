//! Placement: grid cell + layer to board-local position.

use crate::core::{EngineConfig, GridPos, Vec2};

/// Maps a grid cell on a layer to a board-local position.
///
/// Only consulted at generation time.
pub trait Placement {
    fn place(&self, grid: GridPos, layer: u32, layer_offset: Vec2) -> Vec2;
}

/// `origin + grid * cell_size + layer * layer_offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPlacement {
    pub origin: Vec2,
    pub cell_size: Vec2,
}

impl GridPlacement {
    #[must_use]
    pub fn new(origin: Vec2, cell_size: Vec2) -> Self {
        Self { origin, cell_size }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.board_origin, config.cell_size)
    }
}

impl Placement for GridPlacement {
    fn place(&self, grid: GridPos, layer: u32, layer_offset: Vec2) -> Vec2 {
        self.origin + grid.as_vec2().scale(self.cell_size) + layer_offset * layer as f32
    }
}
