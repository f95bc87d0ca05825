//! Score display: zero-padded distance digits, milestone flashing and the
//! session high score.

use crate::core::constants::{
    ACHIEVEMENT_DISTANCE, DIGIT_DEST_WIDTH, DIGIT_HEIGHT, DIGIT_WIDTH, DISTANCE_COEFFICIENT,
    FLASH_DURATION_MS, FLASH_ITERATIONS, HIGH_SCORE_ALPHA, MAX_DISTANCE_UNITS, METER_Y,
};
use crate::render::{Blit, Canvas, Rect, Sprite, SpriteResolution};

/// Sprite sheet glyph indices past the ten digits.
const GLYPH_H: u8 = 10;
const GLYPH_I: u8 = 11;

/// Pixels between the high score and the current score.
const HIGH_SCORE_OFFSET: f64 = MAX_DISTANCE_UNITS as f64 * 2.0 * DIGIT_WIDTH;

/// Convert raw pixel distance into score units.
pub fn actual_distance(distance: f64) -> u32 {
    if distance > 0.0 {
        (distance * DISTANCE_COEFFICIENT).round() as u32
    } else {
        0
    }
}

/// Split a score into fixed-width digits, keeping only the low digits.
fn to_digits(value: u32) -> [u8; MAX_DISTANCE_UNITS] {
    let mut digits = [0u8; MAX_DISTANCE_UNITS];
    let mut rest = value;
    for slot in digits.iter_mut().rev() {
        *slot = (rest % 10) as u8;
        rest /= 10;
    }
    digits
}

#[derive(Debug, Clone)]
pub struct DistanceMeter {
    pub x: f64,
    pub y: f64,
    pub digits: [u8; MAX_DISTANCE_UNITS],
    /// Glyphs drawn at reduced alpha: `H`, `I`, blank, then the digits.
    pub high_score: Option<[u8; MAX_DISTANCE_UNITS]>,
    pub max_score: u32,
    /// True while a milestone flash is running; digits are frozen meanwhile.
    pub achievement: bool,
    pub flash_timer: f64,
    pub flash_iterations: u32,
    /// Highest milestone already celebrated this run.
    pub last_milestone: u32,
    /// Whether the current digits are visible this frame.
    pub paint: bool,
}

impl DistanceMeter {
    pub fn new(canvas_width: f64) -> Self {
        let max_score = 10u32.pow(MAX_DISTANCE_UNITS as u32) - 1;
        let mut meter = Self {
            x: 0.0,
            y: METER_Y,
            digits: [0; MAX_DISTANCE_UNITS],
            high_score: None,
            max_score,
            achievement: false,
            flash_timer: 0.0,
            flash_iterations: 0,
            last_milestone: 0,
            paint: true,
        };
        meter.calc_x_pos(canvas_width);
        meter
    }

    /// Right-align the meter, leaving one digit of margin.
    pub fn calc_x_pos(&mut self, canvas_width: f64) {
        self.x = canvas_width - DIGIT_DEST_WIDTH * (MAX_DISTANCE_UNITS as f64 + 1.0);
    }

    pub fn actual_distance(&self, distance: f64) -> u32 {
        actual_distance(distance)
    }

    /// Advance the display. Returns true when a milestone sound should play.
    pub fn update(&mut self, delta_time: f64, distance: f64) -> bool {
        self.paint = true;

        if !self.achievement {
            let distance = actual_distance(distance);
            let milestone = distance / ACHIEVEMENT_DISTANCE;

            if milestone < self.last_milestone {
                // Score rolled over
                self.last_milestone = milestone;
            }
            self.digits = to_digits(distance);

            if distance > 0 && milestone > self.last_milestone {
                self.last_milestone = milestone;
                self.achievement = true;
                self.flash_timer = 0.0;
                return true;
            }
            return false;
        }

        if self.flash_iterations < FLASH_ITERATIONS {
            self.flash_timer += delta_time;
            if self.flash_timer < FLASH_DURATION_MS {
                self.paint = false;
            } else if self.flash_timer > FLASH_DURATION_MS * 2.0 {
                self.flash_timer = 0.0;
                self.flash_iterations += 1;
            }
        } else {
            self.achievement = false;
            self.flash_iterations = 0;
            self.flash_timer = 0.0;
        }
        false
    }

    pub fn set_high_score(&mut self, distance: f64) {
        self.high_score = Some(to_digits(actual_distance(distance)));
    }

    /// Back to zero for a new run. The high score is kept.
    pub fn reset(&mut self) {
        self.achievement = false;
        self.flash_timer = 0.0;
        self.flash_iterations = 0;
        self.last_milestone = 0;
        self.update(0.0, 0.0);
    }

    fn draw_glyph<C: Canvas>(
        &self,
        canvas: &mut C,
        resolution: SpriteResolution,
        origin_x: f64,
        position: usize,
        glyph: u8,
        alpha: f32,
    ) {
        let source = resolution.scale_source(Rect::new(
            DIGIT_WIDTH * glyph as f64,
            0.0,
            DIGIT_WIDTH,
            DIGIT_HEIGHT,
        ));
        let dest = Rect::new(
            origin_x + position as f64 * DIGIT_DEST_WIDTH,
            self.y,
            DIGIT_WIDTH,
            DIGIT_HEIGHT,
        );
        canvas.draw(Blit::new(Sprite::Text, source, dest).with_alpha(alpha));
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C, resolution: SpriteResolution) {
        if self.paint {
            for (i, digit) in self.digits.iter().enumerate() {
                self.draw_glyph(canvas, resolution, self.x, i, *digit, 1.0);
            }
        }

        if let Some(high_score) = &self.high_score {
            let origin = self.x - HIGH_SCORE_OFFSET;
            self.draw_glyph(canvas, resolution, origin, 0, GLYPH_H, HIGH_SCORE_ALPHA);
            self.draw_glyph(canvas, resolution, origin, 1, GLYPH_I, HIGH_SCORE_ALPHA);
            for (i, digit) in high_score.iter().enumerate() {
                self.draw_glyph(canvas, resolution, origin, i + 3, *digit, HIGH_SCORE_ALPHA);
            }
        }
    }
}
