//! Obstacles: the cactus catalog, run-length grouping and gap generation.

use super::collision::CollisionBox;
use crate::core::constants::{FPS, MAX_GAP_COEFFICIENT};
use crate::render::{Blit, Canvas, Rect, Sprite, SpriteResolution};
use rand::Rng;

/// Obstacle types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    CactusSmall,
    CactusLarge,
}

/// Static geometry and spacing rules for one obstacle type.
#[derive(Debug)]
pub struct ObstacleDescriptor {
    pub width: f64,
    pub height: f64,
    pub y_pos: f64,
    /// Speed at which grouped (run length > 1) obstacles are allowed.
    pub multiple_speed: f64,
    /// Minimum pixel space between obstacles.
    pub min_gap: f64,
    /// Left, middle and right boxes in local coordinates.
    pub collision_boxes: [CollisionBox; 3],
    pub sprite: Sprite,
}

static CACTUS_SMALL: ObstacleDescriptor = ObstacleDescriptor {
    width: 17.0,
    height: 35.0,
    y_pos: 105.0,
    multiple_speed: 3.0,
    min_gap: 120.0,
    collision_boxes: [
        CollisionBox::new(0.0, 7.0, 5.0, 27.0),
        CollisionBox::new(4.0, 0.0, 6.0, 34.0),
        CollisionBox::new(10.0, 4.0, 7.0, 14.0),
    ],
    sprite: Sprite::CactusSmall,
};

static CACTUS_LARGE: ObstacleDescriptor = ObstacleDescriptor {
    width: 25.0,
    height: 50.0,
    y_pos: 90.0,
    multiple_speed: 6.0,
    min_gap: 120.0,
    collision_boxes: [
        CollisionBox::new(0.0, 12.0, 7.0, 38.0),
        CollisionBox::new(8.0, 0.0, 7.0, 49.0),
        CollisionBox::new(13.0, 10.0, 10.0, 38.0),
    ],
    sprite: Sprite::CactusLarge,
};

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 2] = [ObstacleKind::CactusSmall, ObstacleKind::CactusLarge];

    pub fn descriptor(&self) -> &'static ObstacleDescriptor {
        match self {
            Self::CactusSmall => &CACTUS_SMALL,
            Self::CactusLarge => &CACTUS_LARGE,
        }
    }

    /// Pick a type uniformly from the catalog.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// A single (possibly grouped) obstacle on the horizon.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Run length: how many sprite tiles make up this obstacle.
    pub size: u32,
    pub x_pos: f64,
    pub y_pos: f64,
    pub width: f64,
    /// Collision boxes in local coordinates, widened for grouped obstacles.
    pub collision_boxes: Vec<CollisionBox>,
    /// Trailing space (px) required before the next obstacle spawns.
    pub gap: f64,
    /// Set once the obstacle has scrolled fully off the left edge.
    pub remove: bool,
    /// Set once this obstacle has spawned its follower.
    pub following_obstacle_created: bool,
}

impl Obstacle {
    /// Create an obstacle at the right edge with a random run length.
    pub fn new<R: Rng>(
        kind: ObstacleKind,
        canvas_width: f64,
        gap_coefficient: f64,
        speed: f64,
        max_length: u32,
        rng: &mut R,
    ) -> Self {
        let size = rng.gen_range(1..=max_length.max(1));
        Self::with_size(kind, size, canvas_width, gap_coefficient, speed, rng)
    }

    /// Create an obstacle with a requested run length.
    ///
    /// The run length collapses to 1 when `speed` is below the type's
    /// grouping threshold.
    pub fn with_size<R: Rng>(
        kind: ObstacleKind,
        size: u32,
        canvas_width: f64,
        gap_coefficient: f64,
        speed: f64,
        rng: &mut R,
    ) -> Self {
        let descriptor = kind.descriptor();

        // Only allow sizing if we're at the right speed
        let size = if size > 1 && descriptor.multiple_speed > speed {
            1
        } else {
            size.max(1)
        };
        let width = descriptor.width * size as f64;

        let mut collision_boxes = descriptor.collision_boxes.to_vec();
        // Grouped cacti share one silhouette: the middle box stretches to
        // fill the space between the first and last boxes.
        if size > 1 {
            collision_boxes[1].width =
                width - collision_boxes[0].width - collision_boxes[2].width;
            collision_boxes[2].x = width - collision_boxes[2].width;
        }

        let mut obstacle = Self {
            kind,
            size,
            x_pos: canvas_width - width,
            y_pos: descriptor.y_pos,
            width,
            collision_boxes,
            gap: 0.0,
            remove: false,
            following_obstacle_created: false,
        };
        obstacle.gap = obstacle.random_gap(gap_coefficient, speed, rng);
        obstacle
    }

    /// Inclusive `(min, max)` gap for this obstacle at a given speed.
    ///
    /// The minimum widens with speed so reaction time stays roughly constant
    /// as the game accelerates. It never drops below zero, so the range is
    /// never empty.
    pub fn gap_bounds(&self, gap_coefficient: f64, speed: f64) -> (f64, f64) {
        let min_gap = (self.width * speed + self.kind.descriptor().min_gap * gap_coefficient)
            .round()
            .max(0.0);
        let max_gap = (min_gap * MAX_GAP_COEFFICIENT).round();
        (min_gap, max_gap)
    }

    fn random_gap<R: Rng>(&self, gap_coefficient: f64, speed: f64, rng: &mut R) -> f64 {
        let (min_gap, max_gap) = self.gap_bounds(gap_coefficient, speed);
        rng.gen_range(min_gap as i64..=max_gap as i64) as f64
    }

    /// Scroll left. Marks the obstacle for removal once it leaves the canvas.
    pub fn update(&mut self, delta_time: f64, speed: f64) {
        if self.remove {
            return;
        }
        self.x_pos -= ((speed * FPS / 1000.0) * delta_time).floor();
        if !self.is_visible() {
            self.remove = true;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.x_pos + self.width > 0.0
    }

    /// Blit the sprite strip matching this run length.
    pub fn draw<C: Canvas>(&self, canvas: &mut C, resolution: SpriteResolution) {
        let descriptor = self.kind.descriptor();
        let strip_width = descriptor.width * self.size as f64;
        let source_x = strip_width * (0.5 * (self.size as f64 - 1.0));
        let source = resolution.scale_source(Rect::new(
            source_x,
            0.0,
            strip_width,
            descriptor.height,
        ));
        let dest = Rect::new(self.x_pos, self.y_pos, strip_width, descriptor.height);
        canvas.draw(Blit::new(descriptor.sprite, source, dest));
    }
}
