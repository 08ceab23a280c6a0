//! Tuning constants shared by the runner, the UI and the simulator.

pub mod constants;
