//! Board shuffle.
//!
//! Positions are permuted among the on-board tiles of each layer. Ids,
//! layers and footprints never change, and tray tiles are never touched.
//! The board stays locked until every move of the batch has completed.

use log::{debug, info};

use super::engine::Engine;
use super::events::RejectReason;
use super::outcome::ShuffleOutcome;
use super::relocation::{Continuation, RelocationKind};
use super::state::Activity;
use crate::board::Board;
use crate::core::{GameRng, TileHandle, Vec2};

/// New positions for every on-board tile in a layer with more than one
/// such tile, layers ascending.
#[must_use]
pub fn plan_shuffle(board: &Board, rng: &mut GameRng) -> Vec<(TileHandle, Vec2)> {
    let mut plan = Vec::new();
    for layer in board.layer_indices() {
        let group: Vec<TileHandle> = board
            .layer(layer)
            .iter()
            .copied()
            .filter(|&h| board.get(h).is_some_and(|t| t.is_on_board()))
            .collect();
        if group.len() <= 1 {
            continue;
        }

        let mut positions: Vec<Vec2> = group
            .iter()
            .filter_map(|&h| board.get(h).map(|t| t.position()))
            .collect();
        rng.shuffle(&mut positions);
        plan.extend(group.into_iter().zip(positions));
    }
    plan
}

impl Engine {
    /// Shuffle on-board tile positions within each layer.
    pub fn shuffle(&mut self) -> ShuffleOutcome {
        if !self.is_idle() {
            debug!("shuffle rejected: board is {:?}", self.state());
            return ShuffleOutcome::Rejected(RejectReason::Busy);
        }

        let plan = plan_shuffle(&self.board, &mut self.shuffle_rng);
        if plan.is_empty() {
            debug!("shuffle found nothing to move");
            return ShuffleOutcome::NothingToShuffle;
        }

        let moves = plan.len();
        self.activity = Activity::Shuffling { remaining: moves };
        for (tile, target) in plan {
            self.board.set_position(tile, target);
            self.relocations
                .issue(tile, target, RelocationKind::Shuffle, Continuation::ShuffleMoved);
        }
        info!("shuffling {} tiles", moves);

        self.refresh_selectability();
        ShuffleOutcome::Started { moves }
    }

    /// One shuffle move landed; release the lock after the last.
    pub(crate) fn shuffle_moved(&mut self) {
        if let Activity::Shuffling { remaining } = &mut self.activity {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.activity = Activity::Idle;
                debug!("shuffle finished");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;
    use crate::engine::{BoardState, PickOutcome};
    use crate::level::{CellDescription, LayerDescription, LevelDescription};

    fn two_layer_engine() -> Engine {
        let bottom = (0..4).fold(LayerDescription::new(0.0, 0.0), |l, x| {
            l.with_cell(CellDescription::fixed(x * 3, 0, x))
        });
        let top = LayerDescription::new(0.0, 5.0).with_cell(CellDescription::fixed(0, 0, 9));
        let level = LevelDescription::new().with_layer(bottom).with_layer(top);
        Engine::new(&level, EngineConfig::new().with_seed(11)).unwrap()
    }

    #[test]
    fn test_plan_skips_single_tile_layers() {
        let engine = two_layer_engine();
        let mut rng = GameRng::new(1);
        let plan = plan_shuffle(engine.board(), &mut rng);

        assert_eq!(plan.len(), 4);
        assert!(plan.iter().all(|(h, _)| engine.board().get(*h).unwrap().layer == 0));
    }

    #[test]
    fn test_shuffle_locks_until_all_moves_complete() {
        let mut engine = two_layer_engine();
        let outcome = engine.shuffle();
        assert_eq!(outcome, ShuffleOutcome::Started { moves: 4 });
        assert_eq!(engine.state(), BoardState::Shuffling);

        assert_eq!(engine.pick(TileHandle(4)), PickOutcome::Rejected(RejectReason::Busy));
        assert_eq!(engine.shuffle(), ShuffleOutcome::Rejected(RejectReason::Busy));

        let requests = engine.drain_relocations();
        for request in &requests[..3] {
            engine.complete_relocation(request.ticket);
        }
        assert_eq!(engine.state(), BoardState::Shuffling);

        engine.complete_relocation(requests[3].ticket);
        assert_eq!(engine.state(), BoardState::Idle);
    }

    #[test]
    fn test_nothing_to_shuffle_stays_idle() {
        let level = LevelDescription::new()
            .with_layer(LayerDescription::new(0.0, 0.0).with_cell(CellDescription::fixed(0, 0, 1)))
            .with_layer(LayerDescription::new(9.0, 0.0).with_cell(CellDescription::fixed(0, 0, 2)));
        let mut engine = Engine::new(&level, EngineConfig::new()).unwrap();

        assert_eq!(engine.shuffle(), ShuffleOutcome::NothingToShuffle);
        assert_eq!(engine.state(), BoardState::Idle);
        assert_eq!(engine.pending_relocations(), 0);
    }

    #[test]
    fn test_shuffle_is_position_permutation() {
        let mut engine = two_layer_engine();
        let mut before: Vec<(f32, f32)> = engine
            .board()
            .iter()
            .filter(|t| t.layer == 0)
            .map(|t| (t.position().x, t.position().y))
            .collect();

        engine.shuffle();
        engine.settle();

        let mut after: Vec<(f32, f32)> = engine
            .board()
            .iter()
            .filter(|t| t.layer == 0)
            .map(|t| (t.position().x, t.position().y))
            .collect();

        before.sort_by(|a, b| a.partial_cmp(b).unwrap());
        after.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(before, after);
    }
}
