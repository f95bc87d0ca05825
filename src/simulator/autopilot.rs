//! Look-ahead jumping strategy.

use crate::core::events::InputEvent;
use crate::core::runner::Runner;
use rand::Rng;

/// Jumps when the nearest obstacle ahead is within a speed-scaled distance.
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Frames of travel at the current speed that trigger a jump.
    pub lookahead_frames: f64,
}

impl Autopilot {
    pub fn new(lookahead_frames: f64) -> Self {
        Self { lookahead_frames }
    }

    /// Distance from the t-rex's front edge to the nearest obstacle that
    /// has not passed it yet. Negative while they overlap.
    pub fn gap_ahead<R: Rng>(runner: &Runner<R>) -> Option<f64> {
        let trex = &runner.trex;
        let front = trex.x_pos + trex.config.width;
        runner
            .horizon
            .obstacles
            .iter()
            .find(|obstacle| obstacle.x_pos + obstacle.width > trex.x_pos)
            .map(|obstacle| obstacle.x_pos - front)
    }

    /// Input to send before the next frame, if any.
    pub fn decide<R: Rng>(&self, runner: &Runner<R>) -> Option<InputEvent> {
        if runner.crashed || runner.trex.jumping {
            return None;
        }
        // The first jump activates the game
        if !runner.activated {
            return Some(InputEvent::JumpPressed);
        }
        let gap = Self::gap_ahead(runner)?;
        if gap <= runner.current_speed * self.lookahead_frames {
            Some(InputEvent::JumpPressed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RunnerConfig;
    use crate::core::constants::Dimensions;
    use crate::entities::obstacle::{Obstacle, ObstacleKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn runner() -> Runner<ChaCha8Rng> {
        Runner::with_rng(
            RunnerConfig::default(),
            Dimensions::default(),
            ChaCha8Rng::seed_from_u64(12345),
        )
    }

    fn push_obstacle(runner: &mut Runner<ChaCha8Rng>, x_pos: f64) {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut obstacle = Obstacle::with_size(
            ObstacleKind::CactusSmall,
            1,
            runner.dimensions.width,
            runner.config.gap_coefficient,
            runner.current_speed,
            &mut rng,
        );
        obstacle.x_pos = x_pos;
        runner.horizon.obstacles.push_back(obstacle);
    }

    #[test]
    fn test_presses_jump_to_activate() {
        let runner = runner();
        assert_eq!(
            Autopilot::new(8.0).decide(&runner),
            Some(InputEvent::JumpPressed)
        );
    }

    #[test]
    fn test_jumps_only_when_obstacle_close() {
        let mut runner = runner();
        runner.activated = true;
        let autopilot = Autopilot::new(8.0);
        assert_eq!(autopilot.decide(&runner), None);

        // Front edge is at 44; speed 6 gives a 48px trigger
        push_obstacle(&mut runner, 200.0);
        assert_eq!(autopilot.decide(&runner), None);

        runner.horizon.obstacles[0].x_pos = 80.0;
        assert_eq!(autopilot.decide(&runner), Some(InputEvent::JumpPressed));
    }

    #[test]
    fn test_ignores_passed_obstacles() {
        let mut runner = runner();
        runner.activated = true;
        push_obstacle(&mut runner, -40.0);
        assert_eq!(Autopilot::gap_ahead(&runner), None);
    }
}
