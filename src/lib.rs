//! # parlour
//!
//! Rules and strategy engines for small parlour games, free of any
//! presentation concerns.
//!
//! ## Engines
//!
//! 1. **Heap games**: single-heap matchsticks with a pickup limit and
//!    multi-heap Nim, under normal play (taking the last object wins) or
//!    misère play (taking the last object loses). The computer opponent plays
//!    a winning move whenever one exists and plays randomly otherwise.
//!
//! 2. **Magic squares**: an N×N grid of the values `1..=N²` with validity
//!    checking for user-entered squares and constructive solving for odd
//!    orders and orders divisible by 4.
//!
//! The engines are independent, synchronous and deterministic given a seed.
//! A presentation layer calls into them and renders the returned state; it
//! owns all timing, animation and text.
//!
//! ## Modules
//!
//! - `core`: Sides, moves, configuration, heap game state, RNG, errors
//! - `strategy`: Nim-sum analysis, exhaustive solver, opponent policies
//! - `rules`: The `HeapGame` session driving a game
//! - `magic`: Magic square grid and solver

pub mod core;
pub mod strategy;
pub mod rules;
pub mod magic;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    GameRng, GameRngState,
    Goal, GameConfig, GameConfigBuilder,
    HeapMove, MoveRecord,
    GameState,
    Error, ConfigError, IllegalMove, Result,
};

pub use crate::strategy::{
    OpponentMove, OpponentPolicy, OptimalPolicy, RandomPolicy,
    ExhaustiveSolver, is_safe_position, winning_moves,
};

pub use crate::rules::HeapGame;

pub use crate::magic::{Grid, Line, Method, Validity, solve};
