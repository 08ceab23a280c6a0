//! Headless runner simulator for balance analysis.
//!
//! Plays many sessions with an autopilot through the same `RunnerSession`
//! the terminal game uses, then summarises score, level and survival time.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{play_session, run_simulation};
