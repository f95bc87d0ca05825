//! Game balance simulator CLI.
//!
//! Plays seeded games with an autopilot to see how far runs get.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 100 runs
//!   cargo run --bin simulate -- -n 500 -l 10   # 500 runs, jump 10 frames ahead
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use std::env;
use trex_runner::simulator::{run_simulation, SimConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              T-REX RUNNER SIMULATOR                           ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Frames:     {}", config.max_frames_per_run);
    println!("  Canvas Width:   {}", config.canvas_width);
    println!("  Look-ahead:     {} frames", config.lookahead_frames);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write {}: {}", filename, e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-f" | "--frames" => {
                if i + 1 < args.len() {
                    config.max_frames_per_run = args[i + 1].parse().unwrap_or(36_000);
                    i += 1;
                }
            }
            "-l" | "--lookahead" => {
                if i + 1 < args.len() {
                    config.lookahead_frames = args[i + 1].parse().unwrap_or(8.0);
                    i += 1;
                }
            }
            "-w" | "--width" => {
                if i + 1 < args.len() {
                    config.canvas_width = args[i + 1].parse().unwrap_or(600.0);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    let path = std::path::Path::new(&args[i + 1]);
                    match trex_runner::core::RunnerConfig::load(path) {
                        Ok(runner) => config.runner = runner,
                        Err(e) => {
                            eprintln!("Could not load config {}: {}", args[i + 1], e);
                            std::process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "--narrow" => {
                config = SimConfig::narrow(config.num_runs);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("T-Rex Runner Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulation runs (default: 100)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -f, --frames <F>      Max frames per run (default: 36,000)");
    println!("    -l, --lookahead <L>   Jump when the next obstacle is L frames away (default: 8)");
    println!("    -w, --width <W>       Logical canvas width (default: 600)");
    println!("    -c, --config <PATH>   Load game tuning from a JSON file");
    println!("    -v, --verbose         Print every run");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick test (20 short runs)");
    println!("    --narrow              Narrow 400px canvas");
    println!("    -h, --help            Show this help");
}
