//! Level generation: id bag + tile placement.
//!
//! ## Id Bag
//!
//! Random ids come from a bag whose length is the cell count rounded up to
//! a multiple of 3. The bag is filled round-robin (`0, 1, …, K-1, 0, …`)
//! so every id appears `⌊B/K⌋` or `⌈B/K⌉` times, then shuffled.
//!
//! Cells with an explicit id bypass the bag entirely. Such ids are not
//! counted toward any triple and may leave a level unclearable; that is the
//! level author's responsibility.

use log::info;

use super::description::LevelDescription;
use super::placement::Placement;
use crate::board::{Board, Tile};
use crate::core::{EngineConfig, GameRng, HandleAllocator, LevelError};

/// Bag length for `total_cells`: rounded up to the next multiple of 3.
#[must_use]
pub fn bag_len(total_cells: usize) -> usize {
    total_cells.div_ceil(3) * 3
}

/// Round-robin fill of a bag, before shuffling.
#[must_use]
pub fn round_robin_bag(total_cells: usize, type_count: u32) -> Vec<i32> {
    if type_count == 0 {
        return Vec::new();
    }
    (0..bag_len(total_cells))
        .map(|i| (i % type_count as usize) as i32)
        .collect()
}

/// Build the shuffled id bag.
#[must_use]
pub fn make_id_bag(total_cells: usize, type_count: u32, rng: &mut GameRng) -> Vec<i32> {
    let mut bag = round_robin_bag(total_cells, type_count);
    rng.shuffle(&mut bag);
    bag
}

/// Populate a board from a level description.
///
/// `rng` should be the dedicated bag stream. Fails before creating any tile
/// if the description is invalid.
pub fn generate_board(
    level: &LevelDescription,
    config: &EngineConfig,
    placement: &dyn Placement,
    rng: &mut GameRng,
) -> Result<Board, LevelError> {
    level.validate()?;
    if level.needs_random_ids() && config.type_count == 0 {
        return Err(LevelError::NoTileTypes);
    }

    let total = level.total_cells();
    let bag = make_id_bag(total, config.type_count, rng);
    let mut draws = bag.iter().copied();

    let footprint = config.footprint_size();
    let mut handles = HandleAllocator::new();
    let mut board = Board::new();

    for (layer_index, layer) in level.layers.iter().enumerate() {
        let layer_index = layer_index as u32;
        for cell in &layer.cells {
            // Bag length >= total cells, so a draw is always available
            let id = match cell.explicit_id() {
                Some(id) => id,
                None => draws.next().unwrap_or_default(),
            };
            let position = placement.place(cell.grid(), layer_index, layer.offset());
            board.insert(Tile::new(
                handles.allocate(),
                id,
                layer_index,
                cell.grid(),
                position,
                footprint,
            ));
        }
    }

    info!(
        "generated board: {} tiles on {} layers, bag of {} ({} unused)",
        board.len(),
        level.layers.len(),
        bag.len(),
        draws.count()
    );
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridPos, Vec2};
    use crate::level::description::{CellDescription, LayerDescription};
    use crate::level::placement::GridPlacement;

    fn counts(bag: &[i32], types: u32) -> Vec<usize> {
        (0..types as i32).map(|id| bag.iter().filter(|&&b| b == id).count()).collect()
    }

    fn row(len: i32) -> LayerDescription {
        (0..len).fold(LayerDescription::new(0.0, 0.0), |layer, x| {
            layer.with_cell(CellDescription::random(x, 0))
        })
    }

    #[test]
    fn test_bag_len_rounds_up() {
        assert_eq!(bag_len(0), 0);
        assert_eq!(bag_len(1), 3);
        assert_eq!(bag_len(9), 9);
        assert_eq!(bag_len(10), 12);
    }

    #[test]
    fn test_round_robin_fill() {
        assert_eq!(round_robin_bag(7, 4), vec![0, 1, 2, 3, 0, 1, 2, 3, 0]);
        assert!(round_robin_bag(7, 0).is_empty());
    }

    #[test]
    fn test_nine_cells_three_types() {
        let mut rng = GameRng::new(1);
        let bag = make_id_bag(9, 3, &mut rng);
        assert_eq!(bag.len(), 9);
        assert_eq!(counts(&bag, 3), vec![3, 3, 3]);
    }

    #[test]
    fn test_generate_assigns_from_bag() {
        let level = LevelDescription::new().with_layer(row(9));
        let config = EngineConfig::new().with_type_count(3);
        let mut rng = GameRng::new(5);

        let board = generate_board(&level, &config, &GridPlacement::from_config(&config), &mut rng).unwrap();

        let ids: Vec<i32> = board.iter().map(|t| t.id).collect();
        assert_eq!(counts(&ids, 3), vec![3, 3, 3]);
    }

    #[test]
    fn test_explicit_ids_bypass_bag() {
        let level = LevelDescription::new().with_layer(
            LayerDescription::new(0.0, 0.0)
                .with_cell(CellDescription::fixed(0, 0, 42))
                .with_cell(CellDescription::random(1, 0))
                .with_cell(CellDescription::random(2, 0)),
        );
        let config = EngineConfig::new().with_type_count(2);
        let mut rng = GameRng::new(5);

        let board = generate_board(&level, &config, &GridPlacement::from_config(&config), &mut rng).unwrap();
        let ids: Vec<i32> = board.iter().map(|t| t.id).collect();

        assert_eq!(ids[0], 42);
        assert!(ids[1..].iter().all(|&id| id == 0 || id == 1));
    }

    #[test]
    fn test_placement_and_layers() {
        let level = LevelDescription::new()
            .with_layer(LayerDescription::new(0.0, 0.0).with_cell(CellDescription::random(1, 1)))
            .with_layer(LayerDescription::new(0.5, 0.5).with_cell(CellDescription::random(1, 1)));
        let config = EngineConfig::new()
            .with_type_count(1)
            .with_cell_size(Vec2::new(1.0, 1.0));
        let mut rng = GameRng::new(0);

        let board = generate_board(&level, &config, &GridPlacement::from_config(&config), &mut rng).unwrap();
        let tiles: Vec<_> = board.iter().collect();

        assert_eq!(tiles[0].layer, 0);
        assert_eq!(tiles[0].position(), Vec2::new(1.0, 1.0));
        assert_eq!(tiles[1].layer, 1);
        assert_eq!(tiles[1].grid, GridPos::new(1, 1));
        assert_eq!(tiles[1].position(), Vec2::new(1.5, 1.5));
        assert!(tiles[1].footprint.intersects(&tiles[0].footprint));
    }

    #[test]
    fn test_zero_types_with_random_cells_fails() {
        let level = LevelDescription::new().with_layer(row(3));
        let config = EngineConfig::new().with_type_count(0);
        let mut rng = GameRng::new(0);
        assert!(matches!(
            generate_board(&level, &config, &GridPlacement::from_config(&config), &mut rng),
            Err(LevelError::NoTileTypes)
        ));
    }

    #[test]
    fn test_zero_types_with_fixed_cells_succeeds() {
        let level = LevelDescription::new()
            .with_layer(LayerDescription::new(0.0, 0.0).with_cell(CellDescription::fixed(0, 0, 1)));
        let config = EngineConfig::new().with_type_count(0);
        let mut rng = GameRng::new(0);
        let board = generate_board(&level, &config, &GridPlacement::from_config(&config), &mut rng).unwrap();
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_same_seed_same_board() {
        let level = LevelDescription::new().with_layer(row(12));
        let config = EngineConfig::new().with_type_count(4);
        let placement = GridPlacement::from_config(&config);

        let a = generate_board(&level, &config, &placement, &mut GameRng::new(9)).unwrap();
        let b = generate_board(&level, &config, &placement, &mut GameRng::new(9)).unwrap();

        let ids_a: Vec<i32> = a.iter().map(|t| t.id).collect();
        let ids_b: Vec<i32> = b.iter().map(|t| t.id).collect();
        assert_eq!(ids_a, ids_b);
    }
}
