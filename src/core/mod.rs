//! Core heap game types: sides, moves, configuration, state, RNG, errors.
//!
//! These are the building blocks the rules engine and the strategy module
//! share. Games are configured through `GameConfig` values rather than
//! global settings.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{Side, SideMap};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, GameConfigBuilder, Goal, LARGE_GAME_OBJECTS};
pub use action::{HeapMove, MoveRecord};
pub use state::{GameState, Heaps};
pub use error::{ConfigError, Error, IllegalMove, Result};
