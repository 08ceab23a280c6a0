//! Lane runner: dodge obstacles across three lanes.

pub mod lane;
pub mod logic;
pub mod phase;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod spawner;
pub mod types;

pub use lane::*;
pub use logic::*;
pub use phase::*;
pub use scheduler::*;
pub use scoring::*;
pub use session::*;
pub use spawner::*;
pub use types::*;
