//! Board state: tile entities, the board registry and occlusion queries.

pub mod tile;
pub mod registry;
pub mod occlusion;

pub use tile::{Tile, TileLocation};
pub use registry::Board;
pub use occlusion::{is_covered, is_selectable, selectable_tiles};
