//! Tile identity.
//!
//! Every placed tile gets a unique `TileHandle` when the board is generated.
//! Two tiles may show the same symbol (`Tile::id`) and still be distinct
//! entities; the handle is what the engine uses to tell them apart.
//!
//! ## Usage
//!
//! ```
//! use triple_tiles::core::TileHandle;
//!
//! let first = TileHandle::new(0);
//! let second = TileHandle::new(1);
//!
//! assert_ne!(first, second);
//! assert_eq!(second.index(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for one placed tile.
///
/// Handles are allocated densely from 0 in generation order, so they double
/// as indices into the board registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileHandle(pub u32);

impl TileHandle {
    /// Create a handle from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the registry index for this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Sequential handle allocation for the generator.
#[derive(Clone, Debug, Default)]
pub struct HandleAllocator {
    next: u32,
}

impl HandleAllocator {
    /// Create an allocator starting at handle 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next handle.
    pub fn allocate(&mut self) -> TileHandle {
        let handle = TileHandle(self.next);
        self.next += 1;
        handle
    }

    /// Number of handles allocated so far.
    #[must_use]
    pub fn allocated(&self) -> usize {
        self.next as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_display() {
        assert_eq!(format!("{}", TileHandle::new(7)), "Tile(7)");
    }

    #[test]
    fn test_handle_index() {
        let handle = TileHandle::new(42);
        assert_eq!(handle.raw(), 42);
        assert_eq!(handle.index(), 42);
    }

    #[test]
    fn test_allocator_is_sequential() {
        let mut alloc = HandleAllocator::new();
        assert_eq!(alloc.allocate(), TileHandle(0));
        assert_eq!(alloc.allocate(), TileHandle(1));
        assert_eq!(alloc.allocate(), TileHandle(2));
        assert_eq!(alloc.allocated(), 3);
    }

    #[test]
    fn test_handle_ordering() {
        assert!(TileHandle(1) < TileHandle(2));
    }
}
