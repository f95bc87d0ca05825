//! Long seeded horizon runs: obstacle spacing, gap bounds and cleanup.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use trex_runner::core::{Dimensions, RunnerConfig};
use trex_runner::entities::{Horizon, Obstacle, ObstacleKind};

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn assert_spacing(horizon: &Horizon) {
    let obstacles: Vec<&Obstacle> = horizon.obstacles.iter().collect();
    for pair in obstacles.windows(2) {
        let (ahead, behind) = (pair[0], pair[1]);
        assert!(ahead.following_obstacle_created);
        // The follower appeared only once the leader's gap had cleared
        // the right edge, and both scroll by the same amount since.
        let spacing = behind.x_pos - (ahead.x_pos + ahead.width);
        assert!(
            spacing > ahead.gap - behind.width,
            "spacing {} too small for gap {}",
            spacing,
            ahead.gap
        );
    }
    if let Some(last) = obstacles.last() {
        assert!(!last.following_obstacle_created || last.x_pos + last.width + last.gap < 600.0);
    }
}

#[test]
fn test_base_speed_run() {
    let config = RunnerConfig::default();
    let mut rng = create_test_rng();
    let mut horizon = Horizon::new(Dimensions::default(), &config, &mut rng);
    let speed = 6.0;

    let mut spawned = 0;
    let mut previous_back_x = f64::NAN;
    for _ in 0..20_000 {
        horizon.update(16.0, speed, true, &mut rng);

        if let Some(back) = horizon.obstacles.back() {
            if back.x_pos != previous_back_x && back.x_pos == 600.0 - back.width {
                spawned += 1;
            }
            previous_back_x = back.x_pos;
        }

        for obstacle in &horizon.obstacles {
            let (min_gap, max_gap) = obstacle.gap_bounds(config.gap_coefficient, speed);
            assert!(obstacle.gap >= min_gap && obstacle.gap <= max_gap);
            assert!(obstacle.size >= 1 && obstacle.size <= config.max_obstacle_length);
            assert!(!obstacle.remove, "removed obstacles are dropped each frame");

            if obstacle.kind == ObstacleKind::CactusSmall && obstacle.size == 1 {
                assert!(obstacle.gap >= 174.0 && obstacle.gap <= 261.0);
            }
        }
        assert!(horizon.obstacles.len() <= 6);
        assert_spacing(&horizon);
        assert!(!horizon.clouds.is_empty() && horizon.clouds.len() <= config.max_clouds);
    }
    assert!(spawned > 50, "only {} obstacles spawned", spawned);
}

#[test]
fn test_slow_speed_never_groups_large_cacti() {
    let config = RunnerConfig::default();
    let mut rng = create_test_rng();
    let mut horizon = Horizon::new(Dimensions::default(), &config, &mut rng);

    for _ in 0..10_000 {
        horizon.update(16.0, 5.0, true, &mut rng);
        for obstacle in &horizon.obstacles {
            if obstacle.kind == ObstacleKind::CactusLarge {
                assert_eq!(obstacle.size, 1);
            }
        }
    }
}

#[test]
fn test_both_kinds_appear() {
    let config = RunnerConfig::default();
    let mut rng = create_test_rng();
    let mut horizon = Horizon::new(Dimensions::default(), &config, &mut rng);
    let mut small = false;
    let mut large = false;

    for _ in 0..10_000 {
        horizon.update(16.0, 8.0, true, &mut rng);
        for obstacle in &horizon.obstacles {
            match obstacle.kind {
                ObstacleKind::CactusSmall => small = true,
                ObstacleKind::CactusLarge => large = true,
            }
        }
    }
    assert!(small && large);
}

#[test]
fn test_disabled_obstacles_keep_queue_empty() {
    let config = RunnerConfig::default();
    let mut rng = create_test_rng();
    let mut horizon = Horizon::new(Dimensions::default(), &config, &mut rng);
    for _ in 0..1_000 {
        horizon.update(16.0, 6.0, false, &mut rng);
    }
    assert!(horizon.obstacles.is_empty());
}
