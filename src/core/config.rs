//! Engine configuration.
//!
//! Games configure the engine at startup with an `EngineConfig`:
//! - tray capacity and tray layout fallback
//! - how many symbol types the id bag cycles through
//! - board placement geometry (cell size, tile footprint, origin)
//! - the RNG seed for generation and shuffles
//!
//! Configs are built in code with the builder methods, or deserialized from
//! JSON where missing fields take their defaults.

use serde::{Deserialize, Serialize};

use super::error::LevelError;
use super::geometry::Vec2;

/// Default tray capacity.
pub const DEFAULT_TRAY_CAPACITY: usize = 7;

/// Default number of symbol types in the id bag.
pub const DEFAULT_TYPE_COUNT: u32 = 12;

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Maximum tiles held in the tray.
    pub tray_capacity: usize,

    /// Number of symbol ids the generator cycles through (`0..type_count`).
    pub type_count: u32,

    /// Distance between neighbouring grid cells.
    pub cell_size: Vec2,

    /// Footprint size of one tile. `None` means "same as `cell_size`".
    pub tile_size: Option<Vec2>,

    /// Board-local origin of grid cell (0, 0) on layer 0.
    pub board_origin: Vec2,

    /// Position of tray slot 0 when no slot provider answers.
    pub tray_origin: Vec2,

    /// Horizontal spacing of the fallback tray layout.
    pub tray_spacing: f32,

    /// Seed for the generation bag and board shuffles.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tray_capacity: DEFAULT_TRAY_CAPACITY,
            type_count: DEFAULT_TYPE_COUNT,
            cell_size: Vec2::new(0.8, 0.9),
            tile_size: None,
            board_origin: Vec2::ZERO,
            tray_origin: Vec2::new(0.0, -4.0),
            tray_spacing: 1.0,
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.tray_capacity == 0 {
            return Err(LevelError::ZeroTrayCapacity);
        }
        Ok(())
    }

    /// Set tray capacity.
    #[must_use]
    pub fn with_tray_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Tray capacity must be at least 1");
        self.tray_capacity = capacity;
        self
    }

    /// Set the number of symbol types.
    #[must_use]
    pub fn with_type_count(mut self, types: u32) -> Self {
        self.type_count = types;
        self
    }

    /// Set the grid cell size.
    #[must_use]
    pub fn with_cell_size(mut self, size: Vec2) -> Self {
        self.cell_size = size;
        self
    }

    /// Set an explicit tile footprint size.
    #[must_use]
    pub fn with_tile_size(mut self, size: Vec2) -> Self {
        self.tile_size = Some(size);
        self
    }

    /// Set the board origin.
    #[must_use]
    pub fn with_board_origin(mut self, origin: Vec2) -> Self {
        self.board_origin = origin;
        self
    }

    /// Set the fallback tray layout.
    #[must_use]
    pub fn with_tray_layout(mut self, origin: Vec2, spacing: f32) -> Self {
        self.tray_origin = origin;
        self.tray_spacing = spacing;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Footprint size actually used for tiles.
    #[must_use]
    pub fn footprint_size(&self) -> Vec2 {
        self.tile_size.unwrap_or(self.cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tray_capacity, 7);
        assert_eq!(config.type_count, 12);
        assert_eq!(config.footprint_size(), Vec2::new(0.8, 0.9));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_tray_capacity(5)
            .with_type_count(3)
            .with_cell_size(Vec2::new(1.0, 1.0))
            .with_tile_size(Vec2::new(0.9, 0.9))
            .with_seed(99);

        assert_eq!(config.tray_capacity, 5);
        assert_eq!(config.type_count, 3);
        assert_eq!(config.footprint_size(), Vec2::new(0.9, 0.9));
        assert_eq!(config.seed, 99);
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{ "trayCapacity": 4, "seed": 3 }"#).unwrap();
        assert_eq!(config.tray_capacity, 4);
        assert_eq!(config.seed, 3);
        assert_eq!(config.type_count, DEFAULT_TYPE_COUNT);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(EngineConfig::from_json("{ nope"), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_from_json_zero_capacity() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "trayCapacity": 0 }"#),
            Err(LevelError::ZeroTrayCapacity)
        ));
    }

    #[test]
    #[should_panic(expected = "Tray capacity must be at least 1")]
    fn test_zero_capacity_panics() {
        let _ = EngineConfig::new().with_tray_capacity(0);
    }
}
