//! Simulation configuration.

use crate::core::constants::FRAME_INTERVAL_MS;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per session before giving up
    pub max_ticks_per_run: u64,

    /// Milliseconds of wall time each frame represents
    pub frame_ms: u64,

    /// How far ahead of the collision band the autopilot starts reacting
    pub look_ahead: f64,

    /// Chance per frame that the autopilot misses a needed dodge (0.0-1.0)
    pub reaction_error: f64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            max_ticks_per_run: 200_000,
            frame_ms: FRAME_INTERVAL_MS,
            look_ahead: 4.0,
            reaction_error: 0.05,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a balance sanity check
    pub fn quick() -> Self {
        Self {
            num_runs: 100,
            max_ticks_per_run: 50_000,
            ..Default::default()
        }
    }

    /// A careless player: short look-ahead, frequent misses
    pub fn novice() -> Self {
        Self {
            look_ahead: 1.5,
            reaction_error: 0.3,
            ..Default::default()
        }
    }
}
