//! Drives seeded games through the real runner on a manual clock.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::audio::{AudioSink, RecordingAudioSink};
use crate::core::constants::Dimensions;
use crate::core::events::RunnerEvent;
use crate::core::game_loop::{Clock, ManualClock};
use crate::core::runner::Runner;
use crate::entities::obstacle::ObstacleKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => StdRng::from_entropy(),
        };

        let stats = simulate_single_run(config, rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Distance {}, Jumps {}, Frames {}, {}",
                run_idx + 1,
                config.num_runs,
                stats.distance,
                stats.jumps,
                stats.frames,
                if stats.crashed { "crashed" } else { "timed out" }
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

/// Play one game until the first crash or the frame limit.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, rng: R) -> RunStats {
    let dimensions = Dimensions::with_width(config.canvas_width);
    let mut runner = Runner::with_rng(config.runner, dimensions, rng);
    let autopilot = Autopilot::new(config.lookahead_frames);
    let mut clock = ManualClock::new(0.0);
    let mut audio = RecordingAudioSink::default();
    let mut stats = RunStats::default();

    for frame in 0..config.max_frames_per_run {
        if let Some(input) = autopilot.decide(&runner) {
            runner.handle_input(input, clock.now_ms());
        }
        let now = clock.advance(config.frame_ms);
        runner.frame(now);
        stats.frames = frame + 1;
        stats.top_speed = stats.top_speed.max(runner.current_speed);

        for event in runner.drain_events() {
            match event {
                RunnerEvent::Sound(sound) => audio.play_sound(sound),
                RunnerEvent::Achievement { .. } => stats.achievements += 1,
                RunnerEvent::Crashed { obstacle, .. } => {
                    stats.crashed = true;
                    stats.crashed_small = obstacle == ObstacleKind::CactusSmall;
                    stats.crashed_large = obstacle == ObstacleKind::CactusLarge;
                }
                _ => {}
            }
        }
        if runner.crashed {
            break;
        }
    }

    stats.distance = runner.distance();
    stats.jumps = runner.trex.jump_count;
    stats.sounds_played = audio.played.len();
    stats
}
