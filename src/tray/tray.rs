//! The tray: a capacity-bounded, ordered holding area.
//!
//! Index 0 is the head (oldest pick), the last index is the tail (most
//! recent pick). The tray only stores handles; tile locations live on the
//! board.

use smallvec::SmallVec;

use crate::core::{TileHandle, Vec2};

/// Ordered tray contents.
#[derive(Clone, Debug)]
pub struct Tray {
    tiles: SmallVec<[TileHandle; 8]>,
    capacity: usize,
}

impl Tray {
    /// Create an empty tray.
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Tray capacity must be at least 1");
        Self {
            tiles: SmallVec::new(),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tiles.len() >= self.capacity
    }

    /// Contents from head to tail.
    #[must_use]
    pub fn tiles(&self) -> &[TileHandle] {
        &self.tiles
    }

    /// Most recently added tile.
    #[must_use]
    pub fn tail(&self) -> Option<TileHandle> {
        self.tiles.last().copied()
    }

    #[must_use]
    pub fn contains(&self, handle: TileHandle) -> bool {
        self.tiles.contains(&handle)
    }

    /// Append at the tail. Returns the slot index, or `None` when full.
    pub fn push(&mut self, handle: TileHandle) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        self.tiles.push(handle);
        Some(self.tiles.len() - 1)
    }

    /// Remove and return the tail.
    pub fn pop_tail(&mut self) -> Option<TileHandle> {
        self.tiles.pop()
    }

    /// Remove the tile at `index`, shifting later tiles toward the head.
    pub fn remove_at(&mut self, index: usize) -> Option<TileHandle> {
        (index < self.tiles.len()).then(|| self.tiles.remove(index))
    }
}

/// Supplies target positions for tray slots.
///
/// Returning `None` defers to the fallback linear layout.
pub trait TraySlots: std::fmt::Debug {
    fn slot(&self, index: usize) -> Option<Vec2>;
}

/// No slot positions; always use the fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSlots;

impl TraySlots for NoSlots {
    fn slot(&self, _index: usize) -> Option<Vec2> {
        None
    }
}

/// A fixed list of slot positions.
#[derive(Clone, Debug, Default)]
pub struct FixedSlots(pub Vec<Vec2>);

impl TraySlots for FixedSlots {
    fn slot(&self, index: usize) -> Option<Vec2> {
        self.0.get(index).copied()
    }
}

/// Resolves slot indices to positions.
#[derive(Debug)]
pub struct TrayLayout {
    slots: Box<dyn TraySlots>,
    origin: Vec2,
    spacing: f32,
    capacity: usize,
}

impl TrayLayout {
    #[must_use]
    pub fn new(slots: Box<dyn TraySlots>, origin: Vec2, spacing: f32, capacity: usize) -> Self {
        Self {
            slots,
            origin,
            spacing,
            capacity,
        }
    }

    /// Clamp an index to the configured capacity.
    #[must_use]
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.capacity.saturating_sub(1))
    }

    /// Target position for slot `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Vec2 {
        let index = self.clamp_index(index);
        self.slots
            .slot(index)
            .unwrap_or_else(|| self.origin + Vec2::new(index as f32 * self.spacing, 0.0))
    }
}
