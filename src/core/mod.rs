//! Core state machine contract.
//!
//! This module contains what every game phase and the driver share:
//! - The behavioural `State` trait
//! - The in-memory log of phase changes

mod history;
mod state;

pub use history::{PhaseChange, TransitionLog, DEFAULT_LOG_LIMIT};
pub use state::State;
