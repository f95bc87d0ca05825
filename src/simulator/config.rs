//! Simulation configuration.

use crate::core::config::RunnerConfig;
use crate::core::constants::{DEFAULT_WIDTH, MS_PER_FRAME};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per run before it counts as timed out
    pub max_frames_per_run: u64,

    /// Milliseconds between simulated frames
    pub frame_ms: f64,

    /// Logical canvas width
    pub canvas_width: f64,

    /// Autopilot jumps when the next obstacle is this many frames of travel away
    pub lookahead_frames: f64,

    /// Game tuning used for every run
    pub runner: RunnerConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_frames_per_run: 36_000,
            frame_ms: MS_PER_FRAME,
            canvas_width: DEFAULT_WIDTH,
            lookahead_frames: 8.0,
            runner: RunnerConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Few short runs for a quick sanity check
    pub fn quick() -> Self {
        Self {
            num_runs: 20,
            max_frames_per_run: 6_000,
            ..Default::default()
        }
    }

    /// Narrow canvas, where speed is scaled down
    pub fn narrow(num_runs: u32) -> Self {
        Self {
            num_runs,
            canvas_width: 400.0,
            ..Default::default()
        }
    }
}
