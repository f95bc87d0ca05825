//! Headless balance simulator.
//!
//! Plays seeded games with an autopilot and aggregates how far runs get,
//! how often the t-rex jumps and what it crashes into. Runs go through the
//! same [`Runner`](crate::core::Runner) the terminal game uses, on a manual
//! clock.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
