// Frame timing
pub const FPS: f64 = 60.0;
pub const MS_PER_FRAME: f64 = 1000.0 / FPS;
pub const MAX_FRAME_DELTA_MS: f64 = 100.0; // clamp after stalls so physics can't explode
pub const RESIZE_DEBOUNCE_MS: f64 = 250.0;
pub const VISIBILITY_DEBOUNCE_MS: f64 = 250.0;

// Canvas
pub const DEFAULT_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 150.0;

// Intro: container expands from the t-rex width to the full canvas
pub const INTRO_ANIMATION_MS: f64 = 400.0;

// Obstacles
pub const MAX_GAP_COEFFICIENT: f64 = 1.5;

// Clouds
pub const CLOUD_WIDTH: f64 = 46.0;
pub const CLOUD_HEIGHT: f64 = 13.0;
pub const MIN_CLOUD_GAP: u32 = 100;
pub const MAX_CLOUD_GAP: u32 = 400;
pub const MAX_SKY_LEVEL: u32 = 30; // highest a cloud can sit (smallest y)
pub const MIN_SKY_LEVEL: u32 = 71;

// Horizon line
pub const HORIZON_LINE_WIDTH: f64 = 600.0;
pub const HORIZON_LINE_HEIGHT: f64 = 12.0;
pub const HORIZON_LINE_Y: f64 = 127.0;

// Distance meter
pub const DIGIT_WIDTH: f64 = 10.0;
pub const DIGIT_HEIGHT: f64 = 13.0;
pub const DIGIT_DEST_WIDTH: f64 = 11.0;
pub const METER_Y: f64 = 5.0;
pub const MAX_DISTANCE_UNITS: usize = 5;
pub const ACHIEVEMENT_DISTANCE: u32 = 100;
pub const DISTANCE_COEFFICIENT: f64 = 0.025;
pub const FLASH_DURATION_MS: f64 = 1000.0 / 4.0;
pub const FLASH_ITERATIONS: u32 = 3;
pub const HIGH_SCORE_ALPHA: f32 = 0.8;

// T-rex
pub const BLINK_TIMING_MS: f64 = 7000.0;

// Game over panel
pub const GAME_OVER_TEXT_X: f64 = 0.0;
pub const GAME_OVER_TEXT_Y: f64 = 13.0;
pub const GAME_OVER_TEXT_WIDTH: f64 = 191.0;
pub const GAME_OVER_TEXT_HEIGHT: f64 = 11.0;
pub const RESTART_WIDTH: f64 = 36.0;
pub const RESTART_HEIGHT: f64 = 32.0;

/// Logical canvas size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Dimensions {
    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}
