//! Level description: the JSON input to the generator.
//!
//! ```json
//! { "layers": [
//!     { "offsetX": 0.4, "offsetY": 0.45,
//!       "cells": [ { "x": 0, "y": 0 }, { "x": 1, "y": 0, "id": 5 } ] }
//! ] }
//! ```
//!
//! A missing or negative `id` means "assign from the bag".

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{GridPos, LevelError, Vec2};

/// Sentinel id for "assign randomly".
pub const RANDOM_ID: i32 = -1;

fn random_id() -> i32 {
    RANDOM_ID
}

/// One cell placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDescription {
    pub x: i32,
    pub y: i32,
    #[serde(default = "random_id")]
    pub id: i32,
}

impl CellDescription {
    /// A cell whose id comes from the bag.
    #[must_use]
    pub const fn random(x: i32, y: i32) -> Self {
        Self { x, y, id: RANDOM_ID }
    }

    /// A cell with a fixed id.
    #[must_use]
    pub const fn fixed(x: i32, y: i32, id: i32) -> Self {
        Self { x, y, id }
    }

    /// The explicit id, if this cell has one.
    #[must_use]
    pub fn explicit_id(&self) -> Option<i32> {
        (self.id >= 0).then_some(self.id)
    }

    #[must_use]
    pub fn grid(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }
}

/// One layer of cells.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescription {
    #[serde(default)]
    pub offset_x: f32,
    #[serde(default)]
    pub offset_y: f32,
    pub cells: Vec<CellDescription>,
}

impl LayerDescription {
    #[must_use]
    pub fn new(offset_x: f32, offset_y: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            cells: Vec::new(),
        }
    }

    /// Add a cell (builder pattern).
    #[must_use]
    pub fn with_cell(mut self, cell: CellDescription) -> Self {
        self.cells.push(cell);
        self
    }

    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }
}

/// Ordered list of layers, bottom first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    pub layers: Vec<LayerDescription>,
}

impl LevelDescription {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a description from JSON.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a layer on top (builder pattern).
    #[must_use]
    pub fn with_layer(mut self, layer: LayerDescription) -> Self {
        self.layers.push(layer);
        self
    }

    /// Total cells across all layers.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.layers.iter().map(|l| l.cells.len()).sum()
    }

    /// True if any cell takes its id from the bag.
    #[must_use]
    pub fn needs_random_ids(&self) -> bool {
        self.layers
            .iter()
            .flat_map(|l| &l.cells)
            .any(|c| c.explicit_id().is_none())
    }

    /// Structural checks the generator relies on.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.total_cells() == 0 {
            return Err(LevelError::EmptyLevel);
        }
        for (layer, desc) in self.layers.iter().enumerate() {
            let mut seen = FxHashSet::default();
            for cell in &desc.cells {
                if !seen.insert(cell.grid()) {
                    return Err(LevelError::DuplicateCell {
                        layer,
                        x: cell.x,
                        y: cell.y,
                    });
                }
            }
        }
        Ok(())
    }
}
