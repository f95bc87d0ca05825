//! The ground: two abutting segments that leapfrog each other.

use crate::core::constants::{
    FPS, HORIZON_LINE_HEIGHT, HORIZON_LINE_WIDTH, HORIZON_LINE_Y,
};
use crate::render::{Blit, Canvas, Rect, Sprite, SpriteResolution};
use rand::Rng;

/// Ground texture of one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizonVariant {
    Flat,
    Bumpy,
}

impl HorizonVariant {
    /// Sprite sheet x offset of this texture.
    pub fn source_x(&self) -> f64 {
        match self {
            Self::Flat => 0.0,
            Self::Bumpy => HORIZON_LINE_WIDTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HorizonLine {
    pub x_pos: [f64; 2],
    pub variants: [HorizonVariant; 2],
    pub y_pos: f64,
    pub bump_threshold: f64,
}

impl HorizonLine {
    pub fn new(bump_threshold: f64) -> Self {
        Self {
            x_pos: [0.0, HORIZON_LINE_WIDTH],
            variants: [HorizonVariant::Flat, HorizonVariant::Bumpy],
            y_pos: HORIZON_LINE_Y,
            bump_threshold,
        }
    }

    fn random_variant<R: Rng>(&self, rng: &mut R) -> HorizonVariant {
        if rng.gen::<f64>() > self.bump_threshold {
            HorizonVariant::Bumpy
        } else {
            HorizonVariant::Flat
        }
    }

    /// Move the leading segment; the other one stays glued behind it.
    fn update_x_pos<R: Rng>(&mut self, line1: usize, increment: f64, rng: &mut R) {
        let line2 = 1 - line1;

        self.x_pos[line1] -= increment;
        self.x_pos[line2] = self.x_pos[line1] + HORIZON_LINE_WIDTH;

        if self.x_pos[line1] <= -HORIZON_LINE_WIDTH {
            self.x_pos[line1] += HORIZON_LINE_WIDTH * 2.0;
            self.x_pos[line2] = self.x_pos[line1] - HORIZON_LINE_WIDTH;
            self.variants[line1] = self.random_variant(rng);
        }
    }

    pub fn update<R: Rng>(&mut self, delta_time: f64, speed: f64, rng: &mut R) {
        let increment = (speed * (FPS / 1000.0) * delta_time).floor();
        if self.x_pos[0] <= 0.0 {
            self.update_x_pos(0, increment, rng);
        } else {
            self.update_x_pos(1, increment, rng);
        }
    }

    pub fn reset(&mut self) {
        self.x_pos = [0.0, HORIZON_LINE_WIDTH];
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C, resolution: SpriteResolution) {
        for (x_pos, variant) in self.x_pos.iter().zip(self.variants.iter()) {
            let source = Rect::new(
                variant.source_x() * resolution.source_scale(),
                0.0,
                HORIZON_LINE_WIDTH * resolution.source_scale(),
                HORIZON_LINE_HEIGHT * resolution.source_scale(),
            );
            let dest = Rect::new(*x_pos, self.y_pos, HORIZON_LINE_WIDTH, HORIZON_LINE_HEIGHT);
            canvas.draw(Blit::new(Sprite::Horizon, source, dest));
        }
    }
}
