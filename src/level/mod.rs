//! Level input and board generation.
//!
//! - `description`: the serde level format (layers of cells)
//! - `source`: loading descriptions by name (disk or memory)
//! - `placement`: grid cell to board-local position
//! - `generator`: id bag and tile creation

pub mod description;
pub mod source;
pub mod placement;
pub mod generator;

pub use description::{CellDescription, LayerDescription, LevelDescription, RANDOM_ID};
pub use source::{DirLevelSource, LevelSource, MemoryLevelSource};
pub use placement::{GridPlacement, Placement};
pub use generator::{bag_len, generate_board, make_id_bag, round_robin_bag};
