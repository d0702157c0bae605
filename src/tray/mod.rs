//! Tray storage, tray slot layout and undo history.

pub mod tray;
pub mod undo;

pub use tray::{FixedSlots, NoSlots, Tray, TrayLayout, TraySlots};
pub use undo::{UndoManager, UndoRecord};
