//! Undo history.
//!
//! One record is pushed per accepted pick. The engine only ever pops the
//! newest record, and only when its tile is still the tray tail; records for
//! tiles that were matched away are pruned so they can never resurface.

use serde::{Deserialize, Serialize};

use crate::core::{TileHandle, Vec2};

/// Where a picked tile came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UndoRecord {
    pub tile: TileHandle,
    pub previous_position: Vec2,
}

/// Stack of undo records, oldest first.
#[derive(Clone, Debug, Default)]
pub struct UndoManager {
    records: Vec<UndoRecord>,
}

impl UndoManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tile: TileHandle, previous_position: Vec2) {
        self.records.push(UndoRecord {
            tile,
            previous_position,
        });
    }

    /// Newest record.
    #[must_use]
    pub fn peek(&self) -> Option<&UndoRecord> {
        self.records.last()
    }

    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records oldest first.
    #[must_use]
    pub fn records(&self) -> &[UndoRecord] {
        &self.records
    }

    /// Drop every record for `tile`. Returns how many were dropped.
    pub fn prune_tile(&mut self, tile: TileHandle) -> usize {
        self.retain(|h| h != tile)
    }

    /// Keep only records whose tile passes `keep`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(TileHandle) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(|r| keep(r.tile));
        before - self.records.len()
    }
}
