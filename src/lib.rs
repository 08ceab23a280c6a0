//! Lane Runner - terminal endless runner library.
//!
//! Dodge obstacles across three lanes. This crate exposes the session engine
//! (`runner`), reward settlement (`reward`) and the external collaborators it
//! talks to (`backend`) for the terminal front end, the simulator and tests.

pub mod backend;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod loading;
pub mod logging;
pub mod reward;
pub mod runner;
pub mod simulator;
pub mod ui;
pub mod utils;
