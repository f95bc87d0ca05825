//! Runner state machine, tuning and frame scheduling.

pub mod config;
pub mod constants;
pub mod events;
pub mod game_loop;
pub mod runner;

pub use config::{ConfigSetting, RunnerConfig, TrexConfig};
pub use constants::Dimensions;
pub use events::{InputEvent, RunnerEvent};
pub use game_loop::{Clock, Debouncer, FrameScheduler, ManualClock, MonotonicClock};
pub use runner::Runner;
