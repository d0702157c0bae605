//! # triple-tiles
//!
//! Rules engine for a layered triple-match tile puzzle.
//!
//! Tiles sit on stacked layers. A tile can be picked only when no higher
//! tile overlaps it. Picked tiles go into a small tray, and three tiles with
//! the same id clear automatically. The level is won when the board and
//! tray are both empty.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: One `u64` seed fixes the generated ids and every
//!    later shuffle.
//!
//! 2. **Presentation-agnostic**: The engine never animates. It queues
//!    relocation requests and waits for the driver to report completion;
//!    match resolution is gated on completion, not on issuance.
//!
//! 3. **One lock**: Shuffle and hint hold a single `BoardState` lock that
//!    also blocks picks and undo.
//!
//! ## Modules
//!
//! - `core`: Tile handles, geometry, RNG, configuration, errors
//! - `board`: Tile entities, the board registry, occlusion
//! - `level`: Level descriptions, sources, placement, generation
//! - `tray`: Tray storage, slot layout, undo history
//! - `engine`: The state machine (pick, match, undo, shuffle, hint)

pub mod core;
pub mod board;
pub mod level;
pub mod tray;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{EngineConfig, GameRng, GridPos, LevelError, Rect, TileHandle, Vec2};

pub use crate::board::{Board, Tile, TileLocation};

pub use crate::level::{
    CellDescription, DirLevelSource, GridPlacement, LayerDescription, LevelDescription,
    LevelSource, MemoryLevelSource, Placement,
};

pub use crate::tray::{FixedSlots, Tray, TraySlots, UndoRecord};

pub use crate::engine::{
    BoardSnapshot, BoardState, Engine, EngineBuilder, EngineEvent, HintOutcome, PickOutcome,
    RejectReason, RelocationKind, RelocationRequest, RelocationTicket, RemovalReason,
    ShuffleOutcome, UndoOutcome, UndoRejection,
};
