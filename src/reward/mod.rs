//! Reward settlement for finished runner sessions.

pub mod settlement;
pub mod types;

pub use settlement::*;
pub use types::*;
