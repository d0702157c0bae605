//! Board generation integration tests.
//!
//! These tests cover the id bag (length, balance, determinism) and how
//! generated tiles are laid out across layers.

use proptest::prelude::*;
use triple_tiles::core::{EngineConfig, GameRng, LevelError, Vec2};
use triple_tiles::engine::Engine;
use triple_tiles::level::{
    bag_len, make_id_bag, round_robin_bag, CellDescription, LayerDescription, LevelDescription,
};

fn grid_layer(width: i32, height: i32, offset: f32) -> LayerDescription {
    let mut layer = LayerDescription::new(offset, offset);
    for y in 0..height {
        for x in 0..width {
            layer = layer.with_cell(CellDescription::random(x, y));
        }
    }
    layer
}

fn id_counts(ids: impl IntoIterator<Item = i32>, types: u32) -> Vec<usize> {
    let ids: Vec<i32> = ids.into_iter().collect();
    (0..types as i32)
        .map(|id| ids.iter().filter(|&&i| i == id).count())
        .collect()
}

// =============================================================================
// Id Bag Tests
// =============================================================================

proptest! {
    /// The bag always covers every cell and is a whole number of triples.
    #[test]
    fn test_bag_len_is_padded_multiple_of_three(cells in 0usize..500) {
        let len = bag_len(cells);
        prop_assert_eq!(len % 3, 0);
        prop_assert!(len >= cells);
        prop_assert!(len < cells + 3);
    }

    /// Every id appears floor(B/K) or ceil(B/K) times.
    #[test]
    fn test_bag_is_balanced(cells in 1usize..300, types in 1u32..20, seed in any::<u64>()) {
        let bag = make_id_bag(cells, types, &mut GameRng::new(seed));
        let len = bag.len();
        let low = len / types as usize;
        let high = len.div_ceil(types as usize);
        for count in id_counts(bag.iter().copied(), types) {
            prop_assert!(count == low || count == high);
        }
    }

    /// Shuffling never changes the multiset of ids.
    #[test]
    fn test_bag_is_permutation_of_round_robin(cells in 1usize..200, types in 1u32..16, seed in any::<u64>()) {
        let mut shuffled = make_id_bag(cells, types, &mut GameRng::new(seed));
        let mut plain = round_robin_bag(cells, types);
        shuffled.sort_unstable();
        plain.sort_unstable();
        prop_assert_eq!(shuffled, plain);
    }
}

#[test]
fn test_bag_same_seed_same_order() {
    let a = make_id_bag(30, 5, &mut GameRng::new(77));
    let b = make_id_bag(30, 5, &mut GameRng::new(77));
    assert_eq!(a, b);
}

// =============================================================================
// Generation Tests
// =============================================================================

/// Nine cells with three types yields exactly three of each id.
#[test]
fn test_nine_cells_three_types() {
    let level = LevelDescription::new().with_layer(grid_layer(3, 3, 0.0));
    let engine = Engine::new(&level, EngineConfig::new().with_type_count(3).with_seed(3)).unwrap();

    assert_eq!(engine.board().len(), 9);
    assert_eq!(
        id_counts(engine.board().iter().map(|t| t.id), 3),
        vec![3, 3, 3]
    );
}

/// Same seed and description produce the same board.
#[test]
fn test_generation_is_deterministic() {
    let level = LevelDescription::new()
        .with_layer(grid_layer(4, 3, 0.0))
        .with_layer(grid_layer(3, 2, 0.4));
    let config = EngineConfig::new().with_type_count(6).with_seed(1234);

    let a = Engine::new(&level, config.clone()).unwrap();
    let b = Engine::new(&level, config).unwrap();

    let ids_a: Vec<i32> = a.board().iter().map(|t| t.id).collect();
    let ids_b: Vec<i32> = b.board().iter().map(|t| t.id).collect();
    assert_eq!(ids_a, ids_b);
}

/// Tiles are created layer by layer with dense handles.
#[test]
fn test_tiles_grouped_by_layer() {
    let level = LevelDescription::new()
        .with_layer(grid_layer(2, 2, 0.0))
        .with_layer(grid_layer(1, 1, 0.4));
    let engine = Engine::new(&level, EngineConfig::new().with_type_count(5)).unwrap();
    let board = engine.board();

    assert_eq!(board.layer(0).len(), 4);
    assert_eq!(board.layer(1).len(), 1);
    for (i, tile) in board.iter().enumerate() {
        assert_eq!(tile.handle.index(), i);
    }
    assert!(board.iter().all(|t| t.is_on_board()));
}

/// Layer offsets shift every cell of the layer.
#[test]
fn test_layer_offset_applied() {
    let level = LevelDescription::new()
        .with_layer(LayerDescription::new(0.0, 0.0).with_cell(CellDescription::random(2, 1)))
        .with_layer(LayerDescription::new(0.5, -0.25).with_cell(CellDescription::random(2, 1)));
    let config = EngineConfig::new()
        .with_type_count(1)
        .with_cell_size(Vec2::new(1.0, 2.0));
    let engine = Engine::new(&level, config).unwrap();

    let bottom = engine.board().get(engine.board().layer(0)[0]).unwrap();
    let top = engine.board().get(engine.board().layer(1)[0]).unwrap();
    assert_eq!(bottom.position(), Vec2::new(2.0, 2.0));
    assert_eq!(top.position(), Vec2::new(2.5, 1.75));
}

/// A level whose cells are all fixed works with zero types.
#[test]
fn test_fixed_ids_only() {
    let layer = LayerDescription::new(0.0, 0.0)
        .with_cell(CellDescription::fixed(0, 0, 8))
        .with_cell(CellDescription::fixed(1, 0, 8));
    let level = LevelDescription::new().with_layer(layer);
    let engine = Engine::new(&level, EngineConfig::new().with_type_count(0)).unwrap();

    assert!(engine.board().iter().all(|t| t.id == 8));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_empty_level_rejected() {
    let level = LevelDescription::new().with_layer(LayerDescription::new(0.0, 0.0));
    assert!(matches!(
        Engine::new(&level, EngineConfig::new()),
        Err(LevelError::EmptyLevel)
    ));
}

#[test]
fn test_duplicate_cell_rejected() {
    let layer = LayerDescription::new(0.0, 0.0)
        .with_cell(CellDescription::random(1, 1))
        .with_cell(CellDescription::fixed(1, 1, 3));
    let level = LevelDescription::new().with_layer(layer);
    assert!(matches!(
        Engine::new(&level, EngineConfig::new()),
        Err(LevelError::DuplicateCell { layer: 0, x: 1, y: 1 })
    ));
}

/// The same cell on two different layers is fine.
#[test]
fn test_same_cell_different_layers_allowed() {
    let level = LevelDescription::new()
        .with_layer(LayerDescription::new(0.0, 0.0).with_cell(CellDescription::random(0, 0)))
        .with_layer(LayerDescription::new(0.0, 0.0).with_cell(CellDescription::random(0, 0)));
    assert!(Engine::new(&level, EngineConfig::new()).is_ok());
}
