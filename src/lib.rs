//! Lane Duel - a turn-based, three-lane card battle engine
//!
//! Two players alternate through draw, play, attack and end phases, placing
//! creature cards into three lanes. Cards fight the card in the mirrored
//! lane or hit the opposing player directly, and overkill bleeds through.
//! The opponent is a weighted heuristic AI whose personality and noise
//! depend on its difficulty.

#[macro_use]
mod macros;

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tournament;
pub mod zones;

pub use error::{ActionError, ActionErrorKind, DuelError, Result};
