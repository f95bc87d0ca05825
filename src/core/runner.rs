//! The runner: owns every entity and drives them one frame at a time.
//!
//! Lifecycle: waiting for the first jump, then a short intro while the
//! viewport opens up, then running until a crash. Running can be paused
//! (focus lost, resize) and resumed; a crash waits for a restart.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{ConfigSetting, RunnerConfig};
use super::constants::{
    Dimensions, DEFAULT_WIDTH, INTRO_ANIMATION_MS, MAX_FRAME_DELTA_MS, MS_PER_FRAME,
};
use super::events::{InputEvent, RunnerEvent};
use super::game_loop::FrameScheduler;
use crate::audio::SoundId;
use crate::entities::collision::check_for_collision;
use crate::entities::distance_meter::{actual_distance, DistanceMeter};
use crate::entities::game_over_panel::GameOverPanel;
use crate::entities::horizon::Horizon;
use crate::entities::obstacle::ObstacleKind;
use crate::entities::trex::{Trex, TrexStatus};
use crate::render::{canvas_scaling, Canvas, SpriteResolution};

pub struct Runner<R: Rng = StdRng> {
    pub config: RunnerConfig,
    pub dimensions: Dimensions,
    pub resolution: SpriteResolution,

    pub trex: Trex,
    pub horizon: Horizon,
    pub distance_meter: DistanceMeter,
    pub game_over_panel: GameOverPanel,

    pub current_speed: f64,
    /// Raw pixel distance of the current run.
    pub distance_ran: f64,
    pub highest_score: f64,
    /// Time since activation (reset when the game starts or restarts).
    pub running_time: f64,
    pub play_count: u32,

    pub activated: bool,
    pub started: bool,
    pub crashed: bool,
    pub paused: bool,
    pub playing_intro: bool,
    /// Progress of the viewport expansion.
    pub intro_elapsed: f64,

    /// Timestamp of the last frame (or crash).
    time: Option<f64>,
    scheduler: FrameScheduler,
    in_frame: bool,
    events: Vec<RunnerEvent>,
    rng: R,
}

impl Runner<StdRng> {
    pub fn new(config: RunnerConfig, dimensions: Dimensions) -> Self {
        Self::with_rng(config, dimensions, StdRng::from_entropy())
    }
}

impl<R: Rng> Runner<R> {
    pub fn with_rng(config: RunnerConfig, dimensions: Dimensions, mut rng: R) -> Self {
        let horizon = Horizon::new(dimensions, &config, &mut rng);
        let trex = Trex::new(config.trex, dimensions.height, config.bottom_pad, &mut rng);

        let mut runner = Self {
            config,
            dimensions,
            resolution: SpriteResolution::default(),
            trex,
            horizon,
            distance_meter: DistanceMeter::new(dimensions.width),
            game_over_panel: GameOverPanel::new(dimensions),
            current_speed: config.speed,
            distance_ran: 0.0,
            highest_score: 0.0,
            running_time: 0.0,
            play_count: 0,
            activated: false,
            started: false,
            crashed: false,
            paused: false,
            playing_intro: false,
            intro_elapsed: 0.0,
            time: None,
            scheduler: FrameScheduler::new(),
            in_frame: false,
            events: Vec::new(),
            rng,
        };
        runner.set_speed(None);
        // The waiting t-rex animates before the game is activated
        runner.scheduler.request();
        runner
    }

    // ── Scheduling ──────────────────────────────────────────────

    /// Run the pending frame, if any, at timestamp `now` (ms).
    ///
    /// Returns false when no frame was requested (stopped or crashed).
    pub fn frame(&mut self, now: f64) -> bool {
        if self.in_frame || self.scheduler.begin_frame().is_none() {
            return false;
        }
        self.update(now);
        true
    }

    /// Run the pending frame `delta_time` ms after the previous one.
    pub fn tick(&mut self, delta_time: f64) -> bool {
        let now = self.time() + delta_time;
        self.frame(now)
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.has_pending_frame()
    }

    /// Timestamp of the last frame.
    pub fn time(&self) -> f64 {
        self.time.unwrap_or(0.0)
    }

    pub fn drain_events(&mut self) -> Vec<RunnerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[RunnerEvent] {
        &self.events
    }

    fn update(&mut self, now: f64) {
        if self.in_frame {
            // Called back from inside a frame: let the next frame do it
            self.scheduler.request();
            return;
        }
        self.in_frame = true;

        let delta_time = match self.time {
            Some(previous) => (now - previous).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        self.time = Some(now);
        self.step(delta_time);

        self.in_frame = false;
    }

    fn step(&mut self, frame_delta: f64) {
        let mut delta_time = frame_delta;

        if self.activated {
            if self.trex.jumping {
                self.trex.update_jump(delta_time, &mut self.rng);
            }

            if self.playing_intro {
                self.advance_intro(frame_delta);
            }

            self.running_time += delta_time;
            let has_obstacles = self.running_time > self.config.clear_time;

            // First landing triggers the intro
            if self.trex.jump_count == 1 && !self.playing_intro {
                self.play_intro();
            }

            // The ground holds still until the intro is over
            if self.playing_intro {
                self.horizon
                    .update(0.0, self.current_speed, has_obstacles, &mut self.rng);
            } else {
                if !self.started {
                    delta_time = 0.0;
                }
                self.horizon
                    .update(delta_time, self.current_speed, has_obstacles, &mut self.rng);
            }

            let collision = if has_obstacles {
                self.horizon.obstacles.front().and_then(|obstacle| {
                    check_for_collision(obstacle, &self.trex).map(|_| obstacle.kind)
                })
            } else {
                None
            };

            match collision {
                None => {
                    self.distance_ran += self.current_speed * delta_time / MS_PER_FRAME;
                    if self.current_speed < self.config.max_speed {
                        self.current_speed =
                            (self.current_speed + self.config.acceleration).min(self.config.max_speed);
                    }
                }
                Some(kind) => self.game_over(kind),
            }

            if actual_distance(self.distance_ran) > self.distance_meter.max_score {
                self.distance_ran = 0.0;
            }

            if self
                .distance_meter
                .update(delta_time, self.distance_ran.ceil())
            {
                self.events.push(RunnerEvent::Sound(SoundId::Score));
                self.events.push(RunnerEvent::Achievement {
                    distance: self.distance(),
                });
            }
        }

        if !self.crashed {
            self.trex.update(delta_time, None, &mut self.rng);
            self.scheduler.request();
        }
    }

    // ── Intro ───────────────────────────────────────────────────

    fn play_intro(&mut self) {
        if self.started || self.crashed {
            return;
        }
        self.playing_intro = true;
        self.trex.playing_intro = true;
        self.intro_elapsed = 0.0;
        self.activated = true;
        self.started = true;
        self.events.push(RunnerEvent::IntroStarted);
    }

    fn advance_intro(&mut self, delta_time: f64) {
        self.intro_elapsed += delta_time;
        if self.intro_elapsed >= INTRO_ANIMATION_MS {
            self.start_game();
        }
    }

    fn start_game(&mut self) {
        self.running_time = 0.0;
        self.playing_intro = false;
        self.trex.playing_intro = false;
        self.intro_elapsed = INTRO_ANIMATION_MS;
        self.play_count += 1;
        self.events.push(RunnerEvent::GameStarted {
            play_count: self.play_count,
        });
    }

    /// Visible width of the game. Grows from the t-rex width to the
    /// canvas width during the intro (ease-out).
    pub fn viewport_width(&self) -> f64 {
        let trex_width = self.trex.config.width;
        if self.playing_intro {
            let t = (self.intro_elapsed / INTRO_ANIMATION_MS).clamp(0.0, 1.0);
            let eased = 1.0 - (1.0 - t) * (1.0 - t);
            trex_width + (self.dimensions.width - trex_width) * eased
        } else if self.started {
            self.dimensions.width
        } else {
            trex_width
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────

    fn game_over(&mut self, obstacle: ObstacleKind) {
        self.events.push(RunnerEvent::Sound(SoundId::Hit));
        self.stop();
        self.crashed = true;
        self.distance_meter.achievement = false;
        self.trex
            .update(100.0, Some(TrexStatus::Crashed), &mut self.rng);
        self.game_over_panel
            .update_dimensions(self.dimensions.width, Some(self.dimensions.height));

        self.events.push(RunnerEvent::Crashed {
            distance: self.distance(),
            obstacle,
        });

        if self.distance_ran > self.highest_score {
            self.highest_score = self.distance_ran.ceil();
            self.distance_meter.set_high_score(self.highest_score);
            self.events.push(RunnerEvent::NewHighScore {
                distance: actual_distance(self.highest_score),
            });
        }
    }

    /// Halt the frame loop.
    pub fn stop(&mut self) {
        self.activated = false;
        self.paused = true;
        self.scheduler.cancel();
    }

    /// Resume after a stop. Does nothing after a crash or while the loop
    /// is already running.
    pub fn play(&mut self, now: f64) {
        if self.crashed || self.scheduler.is_running() {
            return;
        }
        self.activated = true;
        self.paused = false;
        self.trex
            .update(0.0, Some(TrexStatus::Running), &mut self.rng);
        self.time = Some(now);
        self.update(now);
    }

    /// Start a new run. Only allowed once the loop has stopped.
    pub fn restart(&mut self, now: f64) {
        if self.scheduler.is_running() {
            return;
        }
        self.play_count += 1;
        self.running_time = 0.0;
        self.activated = true;
        self.crashed = false;
        self.paused = false;
        self.distance_ran = 0.0;
        self.set_speed(Some(self.config.speed));
        self.time = Some(now);
        self.distance_meter.reset();
        self.horizon.reset(&mut self.rng);
        self.trex.reset(&mut self.rng);
        self.events.push(RunnerEvent::Sound(SoundId::ButtonPress));
        self.events.push(RunnerEvent::Restarted {
            play_count: self.play_count,
        });
        self.update(now);
    }

    // ── Input ───────────────────────────────────────────────────

    pub fn handle_input(&mut self, input: InputEvent, now: f64) {
        match input {
            InputEvent::JumpPressed => {
                if self.crashed || self.paused {
                    return;
                }
                if !self.activated {
                    self.events.push(RunnerEvent::LoadSounds);
                    self.activated = true;
                }
                if !self.trex.jumping {
                    self.events.push(RunnerEvent::Sound(SoundId::ButtonPress));
                    self.trex.start_jump();
                }
            }
            InputEvent::JumpReleased => {
                if self.is_running() {
                    self.trex.end_jump();
                } else if self.crashed {
                    if now - self.time() >= self.config.gameover_clear_time {
                        self.restart(now);
                    }
                } else if self.paused {
                    self.play(now);
                    self.events.push(RunnerEvent::Resumed);
                }
            }
            InputEvent::DuckPressed => {
                if self.trex.jumping {
                    self.trex.set_speed_drop();
                }
            }
            InputEvent::DuckReleased => {
                self.trex.speed_drop = false;
            }
            InputEvent::RestartRequested => {
                if self.crashed {
                    self.restart(now);
                }
            }
        }
    }

    /// Focus or tab visibility changed. Only matters once a game started.
    pub fn set_visibility(&mut self, visible: bool, now: f64) {
        if !self.started {
            return;
        }
        if visible {
            let was_paused = self.paused;
            self.play(now);
            if was_paused && !self.crashed {
                self.events.push(RunnerEvent::Resumed);
            }
        } else {
            let was_active = self.activated;
            self.stop();
            if was_active {
                self.events.push(RunnerEvent::Paused);
            }
        }
    }

    // ── Tuning ──────────────────────────────────────────────────

    /// Pick the sprite sheets for a display's pixel ratio.
    ///
    /// Returns the factor the host must upscale its canvas backing store by,
    /// or `None` when the ratios already match.
    pub fn set_device_pixel_ratio(
        &mut self,
        device_pixel_ratio: f64,
        backing_store_ratio: f64,
    ) -> Option<f64> {
        self.resolution = SpriteResolution::for_device_pixel_ratio(device_pixel_ratio);
        canvas_scaling(device_pixel_ratio, backing_store_ratio)
    }

    /// Set the current speed, scaled down on canvases narrower than the
    /// default. `None` re-applies the scaling to the current speed.
    pub fn set_speed(&mut self, speed: Option<f64>) {
        let base = speed.unwrap_or(self.current_speed);
        if self.dimensions.width < DEFAULT_WIDTH {
            let narrow_speed = base * self.dimensions.width / DEFAULT_WIDTH
                * self.config.mobile_speed_coefficient;
            self.current_speed = narrow_speed.min(base);
        } else if let Some(speed) = speed {
            self.current_speed = speed;
        }
    }

    pub fn update_config_setting(&mut self, setting: ConfigSetting, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.config = self.config.with_setting(setting, value);
        match setting {
            ConfigSetting::Gravity
            | ConfigSetting::MinJumpHeight
            | ConfigSetting::SpeedDropCoefficient
            | ConfigSetting::InitialJumpVelocity => self.trex.set_config(self.config.trex),
            ConfigSetting::Speed => self.set_speed(Some(self.config.speed)),
            _ => {}
        }
        self.horizon.set_config(&self.config);
    }

    /// Apply a settled canvas width. An active or crashed game is paused.
    pub fn adjust_dimensions(&mut self, width: f64) {
        self.dimensions.width = width;
        self.distance_meter.calc_x_pos(width);
        self.horizon.resize(self.dimensions);
        self.horizon.update(0.0, 0.0, false, &mut self.rng);
        self.trex.update(0.0, None, &mut self.rng);

        if self.activated || self.crashed {
            let was_active = self.activated;
            self.distance_meter.update(0.0, self.distance_ran.ceil());
            self.stop();
            if was_active {
                self.events.push(RunnerEvent::Paused);
            }
        }
        if self.crashed {
            self.game_over_panel.update_dimensions(width, None);
        }
    }

    // ── Queries & drawing ───────────────────────────────────────

    /// Score of the current run.
    pub fn distance(&self) -> u32 {
        actual_distance(self.distance_ran)
    }

    pub fn high_score(&self) -> u32 {
        actual_distance(self.highest_score)
    }

    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        canvas.clear();
        self.horizon.draw(canvas, self.resolution);
        self.distance_meter.draw(canvas, self.resolution);
        self.trex.draw(canvas, self.resolution);
        if self.crashed {
            self.game_over_panel.draw(canvas, self.resolution);
        }
    }
}
