//! Fatal load errors.
//!
//! Only level loading can fail. Rejected player operations are reported as
//! outcome values (see `engine::outcome`), never as errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level description: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level has no cells")]
    EmptyLevel,
    #[error("level needs random ids but type count is 0")]
    NoTileTypes,
    #[error("duplicate cell ({x}, {y}) in layer {layer}")]
    DuplicateCell { layer: usize, x: i32, y: i32 },
    #[error("tray capacity must be at least 1")]
    ZeroTrayCapacity,
}
