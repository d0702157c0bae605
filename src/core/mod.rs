//! Core engine types: tile handles, geometry, RNG, configuration, errors.
//!
//! These are the leaf building blocks shared by the board, level, tray and
//! engine modules.

pub mod entity;
pub mod geometry;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{HandleAllocator, TileHandle};
pub use geometry::{GridPos, Rect, Vec2};
pub use rng::{GameRng, GameRngState, BAG_CONTEXT, SHUFFLE_CONTEXT};
pub use config::{EngineConfig, DEFAULT_TRAY_CAPACITY, DEFAULT_TYPE_COUNT};
pub use error::LevelError;
