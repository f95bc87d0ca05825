//! Collision boxes and the two-phase player/obstacle test.

use super::obstacle::Obstacle;
use super::trex::{Trex, TREX_COLLISION_BOXES};

/// Axis-aligned collision box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CollisionBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Translate a local box by the origin of `adjustment`.
    pub fn adjusted_by(&self, adjustment: &CollisionBox) -> CollisionBox {
        CollisionBox::new(
            self.x + adjustment.x,
            self.y + adjustment.y,
            self.width,
            self.height,
        )
    }
}

/// Strict AABB overlap: touching edges do not collide.
pub fn box_compare(a: &CollisionBox, b: &CollisionBox) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Check the player against one obstacle.
///
/// The outer boxes are inset by 1px on every side because both sprites carry
/// a 1px transparent border. Only when those overlap are the detailed
/// sub-boxes compared. Returns the first colliding pair in canvas
/// coordinates.
pub fn check_for_collision(
    obstacle: &Obstacle,
    trex: &Trex,
) -> Option<(CollisionBox, CollisionBox)> {
    let trex_box = CollisionBox::new(
        trex.x_pos + 1.0,
        trex.y_pos + 1.0,
        trex.config.width - 2.0,
        trex.config.height - 2.0,
    );

    let descriptor = obstacle.kind.descriptor();
    let obstacle_box = CollisionBox::new(
        obstacle.x_pos + 1.0,
        obstacle.y_pos + 1.0,
        descriptor.width * obstacle.size as f64 - 2.0,
        descriptor.height - 2.0,
    );

    if !box_compare(&trex_box, &obstacle_box) {
        return None;
    }

    for trex_part in TREX_COLLISION_BOXES.iter() {
        let adj_trex = trex_part.adjusted_by(&trex_box);
        for obstacle_part in &obstacle.collision_boxes {
            let adj_obstacle = obstacle_part.adjusted_by(&obstacle_box);
            if box_compare(&adj_trex, &adj_obstacle) {
                return Some((adj_trex, adj_obstacle));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TrexConfig;
    use crate::entities::obstacle::ObstacleKind;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_separated_boxes_do_not_collide() {
        let a = CollisionBox::new(0.0, 0.0, 10.0, 10.0);
        let b = CollisionBox::new(20.0, 0.0, 10.0, 10.0);
        assert!(!box_compare(&a, &b));
        assert!(!box_compare(&b, &a));
    }

    #[test]
    fn test_overlapping_boxes_collide() {
        let a = CollisionBox::new(0.0, 0.0, 10.0, 10.0);
        let b = CollisionBox::new(5.0, 5.0, 10.0, 10.0);
        assert!(box_compare(&a, &b));
        assert!(box_compare(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = CollisionBox::new(0.0, 0.0, 10.0, 10.0);
        let right = CollisionBox::new(10.0, 0.0, 10.0, 10.0);
        let below = CollisionBox::new(0.0, 10.0, 10.0, 10.0);
        assert!(!box_compare(&a, &right));
        assert!(!box_compare(&a, &below));
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        let a = CollisionBox::new(0.0, 0.0, 10.0, 10.0);
        // Same rows, different columns
        let b = CollisionBox::new(30.0, 2.0, 5.0, 5.0);
        // Same columns, different rows
        let c = CollisionBox::new(2.0, 30.0, 5.0, 5.0);
        assert!(!box_compare(&a, &b));
        assert!(!box_compare(&a, &c));
    }

    #[test]
    fn test_adjusted_by_translates_origin_only() {
        let local = CollisionBox::new(4.0, 0.0, 6.0, 34.0);
        let outer = CollisionBox::new(100.0, 106.0, 15.0, 33.0);
        let adjusted = local.adjusted_by(&outer);
        assert_eq!(adjusted, CollisionBox::new(104.0, 106.0, 6.0, 34.0));
    }

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn grounded_trex(rng: &mut ChaCha8Rng) -> Trex {
        let mut trex = Trex::new(TrexConfig::default(), 150.0, 10.0, rng);
        trex.x_pos = 50.0;
        trex
    }

    fn cactus(kind: ObstacleKind, rng: &mut ChaCha8Rng) -> Obstacle {
        Obstacle::with_size(kind, 1, 600.0, 0.6, 6.0, rng)
    }

    #[test]
    fn test_obstacle_under_trex_collides() {
        let mut rng = create_test_rng();
        let trex = grounded_trex(&mut rng);
        let mut obstacle = cactus(ObstacleKind::CactusSmall, &mut rng);
        obstacle.x_pos = trex.x_pos + 10.0;

        let hit = check_for_collision(&obstacle, &trex);
        assert!(hit.is_some(), "cactus inside the t-rex body should collide");
    }

    #[test]
    fn test_distant_obstacle_does_not_collide() {
        let mut rng = create_test_rng();
        let trex = grounded_trex(&mut rng);
        let obstacle = cactus(ObstacleKind::CactusLarge, &mut rng);
        assert!(check_for_collision(&obstacle, &trex).is_none());
    }

    #[test]
    fn test_high_jump_clears_obstacle() {
        let mut rng = create_test_rng();
        let mut trex = grounded_trex(&mut rng);
        trex.y_pos = 20.0;
        let mut obstacle = cactus(ObstacleKind::CactusSmall, &mut rng);
        obstacle.x_pos = trex.x_pos + 10.0;

        assert!(check_for_collision(&obstacle, &trex).is_none());
    }

    #[test]
    fn test_outer_overlap_without_detailed_overlap() {
        // Below the head the t-rex body ends well short of its outer box,
        // so a cactus at the front edge overlaps only the outer box.
        let mut rng = create_test_rng();
        let trex = grounded_trex(&mut rng);
        let mut obstacle = cactus(ObstacleKind::CactusSmall, &mut rng);
        obstacle.x_pos = trex.x_pos + 41.0;

        let outer_trex = CollisionBox::new(51.0, 94.0, 42.0, 45.0);
        let outer_obstacle = CollisionBox::new(obstacle.x_pos + 1.0, 106.0, 15.0, 33.0);
        assert!(box_compare(&outer_trex, &outer_obstacle));
        assert!(check_for_collision(&obstacle, &trex).is_none());
    }
}
