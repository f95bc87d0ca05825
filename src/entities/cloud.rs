//! Decorative background clouds.

use crate::core::constants::{
    CLOUD_HEIGHT, CLOUD_WIDTH, MAX_CLOUD_GAP, MAX_SKY_LEVEL, MIN_CLOUD_GAP, MIN_SKY_LEVEL,
};
use crate::render::{Blit, Canvas, Rect, Sprite, SpriteResolution};
use rand::Rng;

/// A cloud drifting across the sky. No collision geometry.
#[derive(Debug, Clone)]
pub struct Cloud {
    pub x_pos: f64,
    pub y_pos: f64,
    /// Space (px) this cloud wants before the next one spawns.
    pub cloud_gap: f64,
    pub remove: bool,
}

impl Cloud {
    /// Spawn a cloud at the right edge at a random sky level.
    pub fn new<R: Rng>(container_width: f64, rng: &mut R) -> Self {
        Self {
            x_pos: container_width,
            y_pos: rng.gen_range(MAX_SKY_LEVEL..=MIN_SKY_LEVEL) as f64,
            cloud_gap: rng.gen_range(MIN_CLOUD_GAP..=MAX_CLOUD_GAP) as f64,
            remove: false,
        }
    }

    pub fn update(&mut self, speed: f64) {
        if self.remove {
            return;
        }
        self.x_pos -= speed.ceil();
        if !self.is_visible() {
            self.remove = true;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.x_pos + CLOUD_WIDTH > 0.0
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C, resolution: SpriteResolution) {
        let source = resolution.scale_source(Rect::new(0.0, 0.0, CLOUD_WIDTH, CLOUD_HEIGHT));
        let dest = Rect::new(self.x_pos, self.y_pos, CLOUD_WIDTH, CLOUD_HEIGHT);
        canvas.draw(Blit::new(Sprite::Cloud, source, dest));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_cloud_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let cloud = Cloud::new(600.0, &mut rng);
            assert!((cloud.x_pos - 600.0).abs() < f64::EPSILON);
            assert!(cloud.y_pos >= 30.0 && cloud.y_pos <= 71.0);
            assert!(cloud.cloud_gap >= 100.0 && cloud.cloud_gap <= 400.0);
        }
    }

    #[test]
    fn test_update_rounds_speed_up() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut cloud = Cloud::new(600.0, &mut rng);
        cloud.update(0.02);
        assert!((cloud.x_pos - 599.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_removed_once_off_screen() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut cloud = Cloud::new(600.0, &mut rng);
        cloud.x_pos = -45.0;
        cloud.update(1.0);
        assert!(cloud.remove);
    }
}
