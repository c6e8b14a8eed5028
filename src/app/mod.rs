pub mod cli;
pub mod config;
pub mod controller;
pub mod events;
pub mod inputs;
pub mod keys;
pub mod schedule;
pub mod state;

pub use state::*;
