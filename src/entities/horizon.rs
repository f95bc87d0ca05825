//! Background layer: horizon line, clouds and the obstacle queue.

use std::collections::VecDeque;

use super::cloud::Cloud;
use super::horizon_line::HorizonLine;
use super::obstacle::{Obstacle, ObstacleKind};
use crate::core::config::RunnerConfig;
use crate::core::constants::Dimensions;
use crate::render::{Canvas, SpriteResolution};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Horizon {
    pub dimensions: Dimensions,
    /// Oldest first; the front obstacle is the one tested for collisions.
    pub obstacles: VecDeque<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub horizon_line: HorizonLine,
    pub gap_coefficient: f64,
    pub cloud_frequency: f64,
    pub cloud_speed: f64,
    pub max_clouds: usize,
    pub max_obstacle_length: u32,
    pub running_time: f64,
}

impl Horizon {
    pub fn new<R: Rng>(dimensions: Dimensions, config: &RunnerConfig, rng: &mut R) -> Self {
        let mut horizon = Self {
            dimensions,
            obstacles: VecDeque::new(),
            clouds: Vec::new(),
            horizon_line: HorizonLine::new(config.bump_threshold),
            gap_coefficient: config.gap_coefficient,
            cloud_frequency: config.cloud_frequency,
            cloud_speed: config.bg_cloud_speed,
            max_clouds: config.max_clouds,
            max_obstacle_length: config.max_obstacle_length,
            running_time: 0.0,
        };
        horizon.add_cloud(rng);
        horizon
    }

    /// Pick up tuning changes without disturbing entities on screen.
    pub fn set_config(&mut self, config: &RunnerConfig) {
        self.gap_coefficient = config.gap_coefficient;
        self.cloud_frequency = config.cloud_frequency;
        self.cloud_speed = config.bg_cloud_speed;
        self.max_clouds = config.max_clouds;
        self.max_obstacle_length = config.max_obstacle_length;
        self.horizon_line.bump_threshold = config.bump_threshold;
    }

    pub fn update<R: Rng>(
        &mut self,
        delta_time: f64,
        speed: f64,
        update_obstacles: bool,
        rng: &mut R,
    ) {
        self.running_time += delta_time;
        self.horizon_line.update(delta_time, speed, rng);
        self.update_clouds(delta_time, speed, rng);
        if update_obstacles {
            self.update_obstacles(delta_time, speed, rng);
        }
    }

    fn update_clouds<R: Rng>(&mut self, delta_time: f64, speed: f64, rng: &mut R) {
        let cloud_speed = self.cloud_speed / 1000.0 * delta_time * speed;

        for cloud in self.clouds.iter_mut() {
            cloud.update(cloud_speed);
        }

        let spawn = match self.clouds.last() {
            Some(last) => {
                self.clouds.len() < self.max_clouds
                    && self.dimensions.width - last.x_pos > last.cloud_gap
                    && self.cloud_frequency > rng.gen::<f64>()
            }
            None => true,
        };
        if spawn {
            self.add_cloud(rng);
        }

        self.clouds.retain(|cloud| !cloud.remove);
        if self.clouds.is_empty() {
            self.add_cloud(rng);
        }
    }

    fn update_obstacles<R: Rng>(&mut self, delta_time: f64, speed: f64, rng: &mut R) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.update(delta_time, speed);
        }
        while self.obstacles.front().map_or(false, |o| o.remove) {
            self.obstacles.pop_front();
        }

        let width = self.dimensions.width;
        let spawn_follower = match self.obstacles.back_mut() {
            Some(last) => {
                let ready = !last.following_obstacle_created
                    && last.is_visible()
                    && last.x_pos + last.width + last.gap < width;
                if ready {
                    last.following_obstacle_created = true;
                }
                ready
            }
            None => true,
        };
        if spawn_follower {
            self.add_new_obstacle(speed, rng);
        }
    }

    pub fn add_new_obstacle<R: Rng>(&mut self, speed: f64, rng: &mut R) {
        let kind = ObstacleKind::random(rng);
        self.obstacles.push_back(Obstacle::new(
            kind,
            self.dimensions.width,
            self.gap_coefficient,
            speed,
            self.max_obstacle_length,
            rng,
        ));
    }

    pub fn add_cloud<R: Rng>(&mut self, rng: &mut R) {
        self.clouds.push(Cloud::new(self.dimensions.width, rng));
    }

    /// Clear obstacles, rewind the ground and leave exactly one fresh cloud.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.obstacles.clear();
        self.clouds.clear();
        self.add_cloud(rng);
        self.horizon_line.reset();
        self.running_time = 0.0;
    }

    pub fn resize(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C, resolution: SpriteResolution) {
        self.horizon_line.draw(canvas, resolution);
        for cloud in &self.clouds {
            cloud.draw(canvas, resolution);
        }
        for obstacle in &self.obstacles {
            obstacle.draw(canvas, resolution);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingCanvas, Sprite};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn new_horizon(rng: &mut ChaCha8Rng) -> Horizon {
        Horizon::new(Dimensions::default(), &RunnerConfig::default(), rng)
    }

    #[test]
    fn test_starts_with_one_cloud_and_no_obstacles() {
        let mut rng = create_test_rng();
        let horizon = new_horizon(&mut rng);
        assert_eq!(horizon.clouds.len(), 1);
        assert!(horizon.obstacles.is_empty());
    }

    #[test]
    fn test_obstacles_suppressed_when_disabled() {
        let mut rng = create_test_rng();
        let mut horizon = new_horizon(&mut rng);
        for _ in 0..100 {
            horizon.update(16.0, 6.0, false, &mut rng);
        }
        assert!(horizon.obstacles.is_empty());
    }

    #[test]
    fn test_first_obstacle_spawns_when_empty() {
        let mut rng = create_test_rng();
        let mut horizon = new_horizon(&mut rng);
        horizon.update(16.0, 6.0, true, &mut rng);
        assert_eq!(horizon.obstacles.len(), 1);
        assert!(!horizon.obstacles[0].following_obstacle_created);
    }

    #[test]
    fn test_follower_spawns_once_after_gap() {
        let mut rng = create_test_rng();
        let mut horizon = new_horizon(&mut rng);
        horizon.add_new_obstacle(6.0, &mut rng);
        {
            let first = &mut horizon.obstacles[0];
            // Leave exactly enough room for the gap
            first.x_pos = 600.0 - first.width - first.gap - 10.0;
        }
        horizon.update(0.0, 6.0, true, &mut rng);
        assert_eq!(horizon.obstacles.len(), 2);
        assert!(horizon.obstacles[0].following_obstacle_created);

        // The first obstacle never spawns a second follower
        horizon.obstacles[1].x_pos = 600.0;
        horizon.obstacles[1].following_obstacle_created = true;
        horizon.update(0.0, 6.0, true, &mut rng);
        assert_eq!(horizon.obstacles.len(), 2);
    }

    #[test]
    fn test_no_follower_before_gap_clears() {
        let mut rng = create_test_rng();
        let mut horizon = new_horizon(&mut rng);
        horizon.add_new_obstacle(6.0, &mut rng);
        horizon.update(0.0, 6.0, true, &mut rng);
        assert_eq!(horizon.obstacles.len(), 1);
    }

    #[test]
    fn test_removed_obstacles_dropped_oldest_first() {
        let mut rng = create_test_rng();
        let mut horizon = new_horizon(&mut rng);
        horizon.add_new_obstacle(6.0, &mut rng);
        horizon.add_new_obstacle(6.0, &mut rng);
        horizon.obstacles[0].x_pos = -200.0;
        horizon.obstacles[0].following_obstacle_created = true;
        horizon.obstacles[1].following_obstacle_created = true;
        let survivor_x = horizon.obstacles[1].x_pos;

        horizon.update(16.0, 6.0, true, &mut rng);
        assert_eq!(horizon.obstacles.len(), 1);
        assert!(horizon.obstacles[0].x_pos < survivor_x);
    }

    #[test]
    fn test_long_run_keeps_invariants() {
        let mut rng = create_test_rng();
        let mut horizon = new_horizon(&mut rng);
        for _ in 0..5000 {
            horizon.update(16.0, 8.0, true, &mut rng);
            assert!(!horizon.clouds.is_empty());
            assert!(horizon.clouds.len() <= 6);
            assert!(horizon.obstacles.iter().all(|o| !o.remove || o.x_pos + o.width <= 0.0));
            let mut pairs = horizon.obstacles.iter().zip(horizon.obstacles.iter().skip(1));
            assert!(pairs.all(|(a, b)| a.x_pos <= b.x_pos));
        }
    }

    #[test]
    fn test_reset_leaves_one_cloud() {
        let mut rng = create_test_rng();
        let mut horizon = new_horizon(&mut rng);
        for _ in 0..3000 {
            horizon.update(16.0, 8.0, true, &mut rng);
        }
        horizon.reset(&mut rng);
        assert!(horizon.obstacles.is_empty());
        assert_eq!(horizon.clouds.len(), 1);
        assert_eq!(horizon.horizon_line.x_pos, [0.0, 600.0]);
    }

    #[test]
    fn test_draw_order() {
        let mut rng = create_test_rng();
        let mut horizon = new_horizon(&mut rng);
        horizon.add_new_obstacle(6.0, &mut rng);
        let mut canvas = RecordingCanvas::new();
        horizon.draw(&mut canvas, SpriteResolution::Ldpi);
        assert_eq!(canvas.blits.len(), 4);
        assert_eq!(canvas.blits[0].sprite, Sprite::Horizon);
        assert_eq!(canvas.blits[2].sprite, Sprite::Cloud);
    }
}
