//! The rules engine: picks, matches, undo, shuffle and hints.
//!
//! - `engine`: the `Engine` state machine, pick path, match resolution, undo
//! - `shuffle`: per-layer position shuffle under the board lock
//! - `hint`: staged triple picks under the board lock
//! - `relocation`: move requests and the continuations waiting on them
//! - `events`, `outcome`, `state`, `snapshot`: what the engine reports

pub mod engine;
pub mod events;
pub mod outcome;
pub mod relocation;
pub mod state;
pub mod shuffle;
pub mod hint;
pub mod snapshot;

pub use engine::{Engine, EngineBuilder, MATCH_SIZE};
pub use events::{EngineEvent, RejectReason, RemovalReason};
pub use outcome::{HintOutcome, PickOutcome, ShuffleOutcome, UndoOutcome, UndoRejection};
pub use relocation::{RelocationKind, RelocationRequest, RelocationTicket};
pub use state::BoardState;
pub use shuffle::plan_shuffle;
pub use hint::find_hint;
pub use snapshot::BoardSnapshot;
