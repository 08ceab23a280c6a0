//! Lane runner balance simulator CLI.
//!
//! Plays many sessions with an autopilot to check how the difficulty curve
//! feels: how long players survive, which levels they reach.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 1000 runs
//!   cargo run --bin simulate -- -n 100 -e 0.2   # 100 sloppy runs
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use lane_runner::logging;
use lane_runner::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    logging::init_stderr(if config.verbosity >= 2 { "info" } else { "warn" });

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              LANE RUNNER BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Ticks:      {}", config.max_ticks_per_run);
    println!("  Frame:          {}ms", config.frame_ms);
    println!("  Look-ahead:     {:.1}", config.look_ahead);
    println!("  Miss chance:    {:.0}%", config.reaction_error * 100.0);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if config.verbosity >= 2 {
        println!("{}", report.runs_text());
    }

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
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
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.max_ticks_per_run = args[i + 1].parse().unwrap_or(200_000);
                    i += 1;
                }
            }
            "-l" | "--look-ahead" => {
                if i + 1 < args.len() {
                    config.look_ahead = args[i + 1].parse().unwrap_or(4.0);
                    i += 1;
                }
            }
            "-e" | "--error" => {
                if i + 1 < args.len() {
                    config.reaction_error = args[i + 1]
                        .parse::<f64>()
                        .map(|e| e.clamp(0.0, 1.0))
                        .unwrap_or(0.05);
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
            "--novice" => {
                config = SimConfig::novice();
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Lane Runner Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of sessions (default: 1000)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -t, --ticks <T>       Max ticks per session (default: 200,000)");
    println!("    -l, --look-ahead <D>  Autopilot reaction distance (default: 4.0)");
    println!("    -e, --error <P>       Chance to miss a dodge, 0-1 (default: 0.05)");
    println!("    -v, --verbose         Per-run output");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick check (100 runs)");
    println!("    --novice              Careless autopilot");
    println!("    -h, --help            Show this help");
}
