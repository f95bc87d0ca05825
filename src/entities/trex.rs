//! The t-rex: animation state machine and jump physics.

use super::collision::CollisionBox;
use crate::core::config::TrexConfig;
use crate::core::constants::BLINK_TIMING_MS;
use crate::render::{Blit, Canvas, Rect, Sprite, SpriteResolution};
use rand::Rng;

/// Detailed collision boxes relative to the t-rex's outer box.
pub const TREX_COLLISION_BOXES: [CollisionBox; 6] = [
    CollisionBox::new(1.0, -1.0, 30.0, 26.0),
    CollisionBox::new(32.0, 0.0, 8.0, 16.0),
    CollisionBox::new(10.0, 35.0, 14.0, 8.0),
    CollisionBox::new(1.0, 24.0, 29.0, 5.0),
    CollisionBox::new(5.0, 30.0, 21.0, 4.0),
    CollisionBox::new(9.0, 34.0, 15.0, 4.0),
];

/// Animation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrexStatus {
    Waiting,
    Running,
    Jumping,
    Crashed,
}

impl TrexStatus {
    /// Sprite sheet x offsets of this state's animation frames.
    pub fn frames(&self) -> &'static [f64] {
        match self {
            Self::Waiting => &[44.0, 0.0],
            Self::Running => &[88.0, 132.0],
            Self::Crashed => &[220.0],
            Self::Jumping => &[0.0],
        }
    }

    pub fn ms_per_frame(&self) -> f64 {
        match self {
            Self::Waiting => 1000.0 / 3.0,
            Self::Running => 1000.0 / 12.0,
            Self::Crashed => 1000.0 / 60.0,
            Self::Jumping => 1000.0 / 60.0,
        }
    }
}

/// The player character.
#[derive(Debug, Clone)]
pub struct Trex {
    pub config: TrexConfig,
    pub x_pos: f64,
    pub y_pos: f64,
    /// Resting y when on the ground.
    pub ground_y_pos: f64,
    /// A jump must rise above this y before it can be cut short.
    pub min_jump_height: f64,

    // -- Animation --
    pub status: TrexStatus,
    pub current_frame: usize,
    /// Time accumulated towards the next animation frame.
    pub timer: f64,
    /// Sprite x offset drawn on the next render.
    pub sprite_x: f64,
    /// Local clock (ms), advanced by every update.
    pub clock: f64,
    pub anim_start_time: f64,
    pub blink_delay: f64,
    /// Slides in from the left while the game intro plays.
    pub playing_intro: bool,

    // -- Jump --
    pub jumping: bool,
    pub jump_velocity: f64,
    pub reached_min_height: bool,
    pub speed_drop: bool,
    /// Completed jumps since the last reset.
    pub jump_count: u32,
}

impl Trex {
    pub fn new<R: Rng>(config: TrexConfig, canvas_height: f64, bottom_pad: f64, rng: &mut R) -> Self {
        let ground_y_pos = canvas_height - config.height - bottom_pad;
        let mut trex = Self {
            config,
            x_pos: 0.0,
            y_pos: ground_y_pos,
            ground_y_pos,
            min_jump_height: ground_y_pos - config.min_jump_height,

            status: TrexStatus::Waiting,
            current_frame: 0,
            timer: 0.0,
            sprite_x: TrexStatus::Waiting.frames()[0],
            clock: 0.0,
            anim_start_time: 0.0,
            blink_delay: 0.0,
            playing_intro: false,

            jumping: false,
            jump_velocity: 0.0,
            reached_min_height: false,
            speed_drop: false,
            jump_count: 0,
        };
        trex.update(0.0, Some(TrexStatus::Waiting), rng);
        trex
    }

    /// Swap in new physics. Derived heights are recomputed.
    pub fn set_config(&mut self, config: TrexConfig) {
        self.min_jump_height = self.ground_y_pos - config.min_jump_height;
        self.config = config;
    }

    /// Advance the animation, optionally switching state first.
    pub fn update<R: Rng>(&mut self, delta_time: f64, status: Option<TrexStatus>, rng: &mut R) {
        self.timer += delta_time;
        self.clock += delta_time;

        if let Some(status) = status {
            self.status = status;
            self.current_frame = 0;
            if status == TrexStatus::Waiting {
                self.anim_start_time = self.clock;
                self.set_blink_delay(rng);
            }
        }

        // Game intro: the t-rex moves in from the left
        if self.playing_intro && self.x_pos < self.config.start_x_pos {
            self.x_pos +=
                ((self.config.start_x_pos / self.config.intro_duration) * delta_time).round();
        }

        let frames = self.status.frames();
        if self.status == TrexStatus::Waiting {
            self.blink(rng);
        } else {
            self.sprite_x = frames[self.current_frame.min(frames.len() - 1)];
        }

        if self.timer >= self.status.ms_per_frame() {
            self.current_frame = if self.current_frame + 1 >= frames.len() {
                0
            } else {
                self.current_frame + 1
            };
            self.timer = 0.0;
        }
    }

    fn set_blink_delay<R: Rng>(&mut self, rng: &mut R) {
        self.blink_delay = (rng.gen::<f64>() * BLINK_TIMING_MS).ceil();
    }

    /// Show the blink frame once the randomized delay has passed.
    fn blink<R: Rng>(&mut self, rng: &mut R) {
        let frames = self.status.frames();
        if self.clock - self.anim_start_time >= self.blink_delay {
            self.sprite_x = frames[self.current_frame.min(frames.len() - 1)];
            if self.current_frame == 1 {
                self.set_blink_delay(rng);
                self.anim_start_time = self.clock;
            }
        } else {
            self.sprite_x = frames[0];
        }
    }

    /// Begin a jump. No-op while already airborne.
    pub fn start_jump(&mut self) {
        if self.jumping {
            return;
        }
        self.status = TrexStatus::Jumping;
        self.current_frame = 0;
        self.sprite_x = TrexStatus::Jumping.frames()[0];
        self.jump_velocity = self.config.initial_jump_velocity;
        self.jumping = true;
        self.reached_min_height = false;
        self.speed_drop = false;
    }

    /// Cut the jump short once the minimum height has been reached.
    pub fn end_jump(&mut self) {
        if self.reached_min_height && self.jump_velocity < self.config.drop_velocity {
            self.jump_velocity = self.config.drop_velocity;
        }
    }

    /// Integrate one frame of jump physics.
    pub fn update_jump<R: Rng>(&mut self, delta_time: f64, rng: &mut R) {
        let frames_elapsed = delta_time / TrexStatus::Jumping.ms_per_frame();

        // Speed drop makes the t-rex fall faster
        let coefficient = if self.speed_drop {
            self.config.speed_drop_coefficient
        } else {
            1.0
        };
        self.y_pos += (self.jump_velocity * coefficient * frames_elapsed).round();
        self.jump_velocity += self.config.gravity * frames_elapsed;

        // Top of the canvas
        if self.y_pos < 0.0 {
            self.y_pos = 0.0;
        }

        if self.y_pos < self.min_jump_height || self.speed_drop {
            self.reached_min_height = true;
        }

        if self.y_pos < self.config.max_jump_height || self.speed_drop {
            self.end_jump();
        }

        // Back down at ground level: jump completed
        if self.y_pos > self.ground_y_pos {
            self.land(rng);
            self.jump_count += 1;
        }
    }

    /// Fast-drop: abandon the rise and fall immediately.
    pub fn set_speed_drop(&mut self) {
        self.speed_drop = true;
        self.jump_velocity = 1.0;
    }

    fn land<R: Rng>(&mut self, rng: &mut R) {
        self.y_pos = self.ground_y_pos;
        self.jump_velocity = 0.0;
        self.jumping = false;
        self.speed_drop = false;
        self.reached_min_height = false;
        self.update(0.0, Some(TrexStatus::Running), rng);
    }

    /// Put the t-rex back on the ground, running, for a fresh game.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.land(rng);
        self.jump_count = 0;
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C, resolution: SpriteResolution) {
        let source = resolution.scale_source(Rect::new(
            self.sprite_x,
            0.0,
            self.config.width,
            self.config.height,
        ));
        let dest = Rect::new(self.x_pos, self.y_pos, self.config.width, self.config.height);
        canvas.draw(Blit::new(Sprite::Trex, source, dest));
    }
}
