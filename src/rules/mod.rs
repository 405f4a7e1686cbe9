//! Heap game rules engine.
//!
//! `HeapGame` applies human and opponent moves to a `GameState`, asks the
//! configured `OpponentPolicy` for the opponent's move, and reports the
//! winner according to the game's `Goal`. It covers both the single-heap
//! matchsticks game and multi-heap Nim.

pub mod engine;

pub use engine::HeapGame;
