//! The board/tray state machine.
//!
//! `Engine` owns the board registry, the tray, the undo history and the
//! relocation queue. All mutation goes through it:
//!
//! - `pick`: move a selectable tile into the tray
//! - `complete_relocation`: resume whatever was waiting on a move
//! - `undo`: return the newest tray tile to the board
//! - `shuffle` / `hint`: board-wide operations (see `shuffle.rs`, `hint.rs`)
//!
//! ## Usage
//!
//! ```
//! use triple_tiles::engine::{Engine, EngineEvent};
//! use triple_tiles::core::EngineConfig;
//! use triple_tiles::level::{CellDescription, LayerDescription, LevelDescription};
//!
//! let layer = (0..3).fold(LayerDescription::new(0.0, 0.0), |l, x| {
//!     l.with_cell(CellDescription::random(x, 0))
//! });
//! let level = LevelDescription::new().with_layer(layer);
//! let mut engine = Engine::new(&level, EngineConfig::new().with_type_count(1)).unwrap();
//!
//! for tile in engine.selectable_tiles() {
//!     engine.pick(tile);
//! }
//! engine.settle();
//!
//! assert!(engine.board().is_cleared());
//! assert!(engine.drain_events().contains(&EngineEvent::LevelComplete));
//! ```

use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::events::{EngineEvent, RejectReason, RemovalReason};
use super::outcome::{PickOutcome, UndoOutcome, UndoRejection};
use super::relocation::{
    Continuation, RelocationKind, RelocationQueue, RelocationRequest, RelocationTicket,
};
use super::snapshot::BoardSnapshot;
use super::state::{Activity, BoardState};
use crate::board::{is_covered, is_selectable, selectable_tiles, Board, TileLocation};
use crate::core::{EngineConfig, GameRng, LevelError, TileHandle, BAG_CONTEXT, SHUFFLE_CONTEXT};
use crate::level::{generate_board, GridPlacement, LevelDescription, LevelSource, Placement};
use crate::tray::{NoSlots, Tray, TrayLayout, TraySlots, UndoManager, UndoRecord};

/// Tiles removed per triple.
pub const MATCH_SIZE: usize = 3;

/// Who asked for a pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PickOrigin {
    Player,
    Hint,
}

/// Builder for an `Engine` with custom collaborators.
pub struct EngineBuilder {
    config: EngineConfig,
    placement: Option<Box<dyn Placement>>,
    slots: Box<dyn TraySlots>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            placement: None,
            slots: Box::new(NoSlots),
        }
    }

    /// Use a custom placement provider instead of `GridPlacement`.
    pub fn placement(mut self, placement: impl Placement + 'static) -> Self {
        self.placement = Some(Box::new(placement));
        self
    }

    /// Use a tray slot provider instead of the fallback layout.
    pub fn tray_slots(mut self, slots: impl TraySlots + 'static) -> Self {
        self.slots = Box::new(slots);
        self
    }

    /// Generate the board and create the engine.
    pub fn build(self, level: &LevelDescription) -> Result<Engine, LevelError> {
        let config = self.config;
        config.validate()?;
        let rng = GameRng::new(config.seed);
        let placement = self
            .placement
            .unwrap_or_else(|| Box::new(GridPlacement::from_config(&config)));

        let board = generate_board(
            level,
            &config,
            placement.as_ref(),
            &mut rng.for_context(BAG_CONTEXT),
        )?;

        let layout = TrayLayout::new(
            self.slots,
            config.tray_origin,
            config.tray_spacing,
            config.tray_capacity,
        );

        let mut engine = Engine {
            tray: Tray::new(config.tray_capacity),
            board,
            layout,
            undo: UndoManager::new(),
            relocations: RelocationQueue::default(),
            activity: Activity::Idle,
            shuffle_rng: rng.for_context(SHUFFLE_CONTEXT),
            events: Vec::new(),
            reported: FxHashMap::default(),
            completed: false,
            config,
        };
        engine.refresh_selectability();
        Ok(engine)
    }

    /// Load a level by name and build.
    pub fn load(self, source: &dyn LevelSource, name: &str) -> Result<Engine, LevelError> {
        let level = source.load(name)?;
        self.build(&level)
    }
}

/// Rules engine for one level.
#[derive(Debug)]
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) board: Board,
    pub(crate) tray: Tray,
    pub(crate) layout: TrayLayout,
    pub(crate) undo: UndoManager,
    pub(crate) relocations: RelocationQueue,
    pub(crate) activity: Activity,
    pub(crate) shuffle_rng: GameRng,
    events: Vec<EngineEvent>,
    /// Last selectability reported per live tile.
    reported: FxHashMap<TileHandle, bool>,
    completed: bool,
}

impl Engine {
    /// Build an engine with default collaborators.
    pub fn new(level: &LevelDescription, config: EngineConfig) -> Result<Self, LevelError> {
        EngineBuilder::new(config).build(level)
    }

    /// Load a level by name with default collaborators.
    pub fn load(source: &dyn LevelSource, name: &str, config: EngineConfig) -> Result<Self, LevelError> {
        EngineBuilder::new(config).load(source, name)
    }

    // === Read views ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    #[must_use]
    pub fn undo_history(&self) -> &[UndoRecord] {
        self.undo.records()
    }

    #[must_use]
    pub fn state(&self) -> BoardState {
        self.activity.state()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.activity == Activity::Idle
    }

    /// True once the level-complete event has fired.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_selectable(&self, tile: TileHandle) -> bool {
        is_selectable(&self.board, tile)
    }

    #[must_use]
    pub fn selectable_tiles(&self) -> Vec<TileHandle> {
        selectable_tiles(&self.board)
    }

    /// Cheap copy of the board and tray for presentation.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tiles: self.board.tiles(),
            tray: self.tray.tiles().to_vec(),
            state: self.state(),
            shuffle_rng: self.shuffle_rng.state(),
        }
    }

    // === Events and relocations ===

    /// Take all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take all relocation requests issued since the last call.
    pub fn drain_relocations(&mut self) -> Vec<RelocationRequest> {
        self.relocations.drain()
    }

    /// Number of relocations issued but not yet completed.
    #[must_use]
    pub fn pending_relocations(&self) -> usize {
        self.relocations.pending_len()
    }

    /// Report that a relocation finished and resume what waited on it.
    ///
    /// Unknown or already completed tickets are ignored; returns whether the
    /// ticket was live.
    pub fn complete_relocation(&mut self, ticket: RelocationTicket) -> bool {
        let Some(continuation) = self.relocations.complete(ticket) else {
            warn!("ignoring completion for unknown {}", ticket);
            return false;
        };

        match continuation {
            Continuation::PickArrived { from_hint } => {
                self.resolve_matches();
                if from_hint {
                    self.advance_hint();
                }
            }
            Continuation::ShuffleMoved => self.shuffle_moved(),
            Continuation::Settled => {}
        }

        self.refresh_selectability();
        true
    }

    /// Complete every outstanding relocation, including ones issued while
    /// completing, in issue order. Returns how many were completed.
    pub fn settle(&mut self) -> usize {
        let mut completed = 0;
        loop {
            self.relocations.drain();
            let tickets = self.relocations.pending_tickets();
            if tickets.is_empty() {
                break;
            }
            for ticket in tickets {
                if self.complete_relocation(ticket) {
                    completed += 1;
                }
            }
        }
        completed
    }

    // === Picking ===

    /// Move a tile from the board into the tray.
    pub fn pick(&mut self, tile: TileHandle) -> PickOutcome {
        let outcome = if self.is_idle() {
            self.pick_from(tile, PickOrigin::Player)
        } else {
            self.reject_pick(tile, RejectReason::Busy)
        };
        self.refresh_selectability();
        outcome
    }

    /// Shared pick path for players and hints. Assumes the caller checked
    /// the lock.
    pub(crate) fn pick_from(&mut self, tile: TileHandle, origin: PickOrigin) -> PickOutcome {
        if self.tray.is_full() {
            return self.reject_pick(tile, RejectReason::TrayFull);
        }
        let Some(position) = self
            .board
            .get(tile)
            .filter(|t| t.is_on_board() && !is_covered(&self.board, t))
            .map(|t| t.position())
        else {
            return self.reject_pick(tile, RejectReason::NotSelectable);
        };

        self.undo.push(tile, position);
        let Some(slot) = self.tray.push(tile) else {
            // Capacity was checked above
            self.undo.pop();
            return self.reject_pick(tile, RejectReason::TrayFull);
        };
        self.board.set_location(tile, TileLocation::InTray);

        let target = self.layout.position(slot);
        self.board.set_position(tile, target);
        let ticket = self.relocations.issue(
            tile,
            target,
            RelocationKind::ToTray,
            Continuation::PickArrived {
                from_hint: origin == PickOrigin::Hint,
            },
        );
        debug!("{:?} picked {} into slot {} ({})", origin, tile, slot, ticket);
        PickOutcome::Accepted(ticket)
    }

    fn reject_pick(&mut self, tile: TileHandle, reason: RejectReason) -> PickOutcome {
        debug!("pick of {} rejected: {:?}", tile, reason);
        self.events.push(EngineEvent::PickRejected { tile, reason });
        PickOutcome::Rejected(reason)
    }

    // === Match resolution ===

    /// Clear triples from the tray, re-pack it and check for a win.
    fn resolve_matches(&mut self) {
        let mut removed: SmallVec<[TileHandle; 6]> = SmallVec::new();

        loop {
            let triples = self.triple_ids();
            if triples.is_empty() {
                break;
            }
            for id in triples {
                self.remove_newest(id, &mut removed);
            }
        }

        for &tile in &removed {
            self.board.set_location(tile, TileLocation::Removed);
            self.undo.prune_tile(tile);
            self.reported.remove(&tile);
            self.events.push(EngineEvent::TileRemoved {
                tile,
                reason: RemovalReason::Matched,
            });
        }

        if !removed.is_empty() {
            debug!("matched {:?}, {} left in tray", removed, self.tray.len());
            self.repack_tray();
        }

        let board = &self.board;
        let stale = self
            .undo
            .retain(|h| board.get(h).is_some_and(|t| !t.is_removed()));
        if stale > 0 {
            warn!("pruned {} stale undo records", stale);
        }

        if self.board.is_cleared() && !self.completed {
            self.completed = true;
            info!("level complete");
            self.events.push(EngineEvent::LevelComplete);
        }
    }

    /// Ids with at least three tray tiles, in first-appearance order.
    fn triple_ids(&self) -> Vec<i32> {
        let mut counts: SmallVec<[(i32, usize); 8]> = SmallVec::new();
        for id in self.tray.tiles().iter().filter_map(|&h| self.board.get(h).map(|t| t.id)) {
            match counts.iter_mut().find(|(seen, _)| *seen == id) {
                Some((_, n)) => *n += 1,
                None => counts.push((id, 1)),
            }
        }
        counts
            .into_iter()
            .filter(|&(_, n)| n >= MATCH_SIZE)
            .map(|(id, _)| id)
            .collect()
    }

    /// Remove `MATCH_SIZE` tiles of `id`, scanning tail to head.
    fn remove_newest(&mut self, id: i32, removed: &mut SmallVec<[TileHandle; 6]>) {
        let mut need = MATCH_SIZE;
        let mut index = self.tray.len();
        while need > 0 && index > 0 {
            index -= 1;
            let tile = self.tray.tiles()[index];
            if self.board.get(tile).is_some_and(|t| t.id == id) {
                self.tray.remove_at(index);
                removed.push(tile);
                need -= 1;
            }
        }
    }

    /// Send every tray tile to the slot matching its index.
    fn repack_tray(&mut self) {
        let tiles: SmallVec<[TileHandle; 8]> = self.tray.tiles().iter().copied().collect();
        for (slot, tile) in tiles.into_iter().enumerate() {
            let target = self.layout.position(slot);
            self.board.set_position(tile, target);
            self.relocations
                .issue(tile, target, RelocationKind::Repack, Continuation::Settled);
        }
    }

    // === Undo ===

    /// Return the most recent pick to the board, if it is still the tray
    /// tail.
    pub fn undo(&mut self) -> UndoOutcome {
        let outcome = self.try_undo();
        if let UndoOutcome::Rejected(reason) = outcome {
            debug!("undo rejected: {:?}", reason);
        }
        self.refresh_selectability();
        outcome
    }

    fn try_undo(&mut self) -> UndoOutcome {
        if !self.is_idle() {
            return UndoOutcome::Rejected(UndoRejection::Busy);
        }
        let (Some(record), Some(tail)) = (self.undo.peek().copied(), self.tray.tail()) else {
            return UndoOutcome::Rejected(UndoRejection::NothingToUndo);
        };
        if record.tile != tail {
            return UndoOutcome::Rejected(UndoRejection::NotTrayTail);
        }

        self.undo.pop();
        self.tray.pop_tail();
        self.board.set_location(tail, TileLocation::OnBoard);
        self.board.set_position(tail, record.previous_position);
        self.relocations.issue(
            tail,
            record.previous_position,
            RelocationKind::ToBoard,
            Continuation::Settled,
        );
        debug!("undo returned {} to the board", tail);
        UndoOutcome::Restored(tail)
    }

    // === Selectability notifications ===

    /// Recompute selectability for every live tile and emit an event for
    /// each one that changed since it was last reported.
    pub fn refresh_selectability(&mut self) {
        for tile in self.board.live_tiles() {
            let now = tile.is_on_board() && !is_covered(&self.board, tile);
            if self.reported.insert(tile.handle, now) != Some(now) {
                self.events.push(EngineEvent::SelectabilityChanged {
                    tile: tile.handle,
                    selectable: now,
                });
            }
        }
    }
}
