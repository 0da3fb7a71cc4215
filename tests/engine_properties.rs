use std::collections::HashSet;

use phonecade::engine::flappy::{FlappyEngine, FLAP_VELOCITY, GRAVITY};
use phonecade::engine::game2048::{slide_grid, slide_row, Game2048Engine, Grid, SIZE};
use phonecade::engine::snake::SnakeEngine;
use phonecade::engine::{Direction, Engine, Phase, TickEngine};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn tile() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), (1u32..=11).prop_map(|exp| 1 << exp)]
}

fn grid() -> impl Strategy<Value = Grid> {
    prop::array::uniform4(prop::array::uniform4(tile()))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn total(grid: &Grid) -> u32 {
    grid.iter().flatten().sum()
}

fn occupied(grid: &Grid) -> usize {
    grid.iter().flatten().filter(|&&v| v != 0).count()
}

proptest! {
    #[test]
    fn slide_preserves_tile_sum(g in grid(), dir in direction()) {
        let (next, _) = slide_grid(&g, dir);
        prop_assert_eq!(total(&next), total(&g));
    }

    #[test]
    fn slide_never_adds_tiles(g in grid(), dir in direction()) {
        let (next, gained) = slide_grid(&g, dir);
        prop_assert!(occupied(&next) <= occupied(&g));
        let merges = occupied(&g) - occupied(&next);
        prop_assert_eq!(merges == 0, gained == 0);
        prop_assert!(next.iter().flatten().all(|&v| v == 0 || v.is_power_of_two()));
    }

    #[test]
    fn slide_row_packs_towards_start(row in prop::array::uniform4(tile())) {
        let (packed, _) = slide_row(row);
        let filled = packed.iter().filter(|&&v| v != 0).count();
        prop_assert!(packed[..filled].iter().all(|&v| v != 0));
        prop_assert!(packed[filled..].iter().all(|&v| v == 0));
    }

    #[test]
    fn game2048_keeps_tiles_valid(seed in any::<u64>(), moves in prop::collection::vec(direction(), 0..60)) {
        let mut engine = Game2048Engine::with_rng(ChaCha8Rng::seed_from_u64(seed));
        engine.start();
        for dir in moves {
            let before = total(engine.grid());
            let changed = engine.slide(dir);
            let after = total(engine.grid());
            if changed {
                prop_assert!(after == before + 2 || after == before + 4);
            } else {
                prop_assert_eq!(after, before);
            }
            prop_assert!(engine.tile_count() <= SIZE * SIZE);
        }
    }

    #[test]
    fn snake_length_tracks_score(seed in any::<u64>(), turns in prop::collection::vec(direction(), 1..120)) {
        let mut engine = SnakeEngine::with_rng(ChaCha8Rng::seed_from_u64(seed));
        engine.start();
        for dir in turns {
            engine.set_direction(dir);
            engine.tick();

            prop_assert_eq!(engine.len(), 1 + engine.score() as usize);
            let unique: HashSet<_> = engine.body().iter().copied().collect();
            prop_assert_eq!(unique.len(), engine.len());
            prop_assert!(engine.body().iter().all(|cell| cell.in_bounds()));
            if let Some(food) = engine.food() {
                prop_assert!(!engine.body().contains(&food));
            }
            if engine.phase() != Phase::Running {
                break;
            }
        }
    }

    #[test]
    fn flappy_follows_gravity(flaps in prop::collection::vec(any::<bool>(), 1..40)) {
        let mut engine = FlappyEngine::new();
        engine.start();
        for flap in flaps {
            if flap {
                engine.flap();
                prop_assert_eq!(engine.bird_velocity(), FLAP_VELOCITY);
            }
            let (y, v) = (engine.bird_y(), engine.bird_velocity());
            engine.tick();
            if !engine.is_active() {
                break;
            }
            prop_assert_eq!(engine.bird_y(), y + (v + GRAVITY));
            prop_assert_eq!(engine.bird_velocity(), v + GRAVITY);
        }
    }
}
