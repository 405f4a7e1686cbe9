//! Heap game strategy: position analysis and opponent policies.
//!
//! - `nim`: closed-form analysis (nim-sum, Grundy values, misère rules)
//! - `exhaustive`: exact memoized solver for the cases without a closed form
//! - `policy`: the `OpponentPolicy` trait and its implementations

pub mod nim;
pub mod exhaustive;
pub mod policy;

pub use nim::{grundy, is_safe_position, nim_sum, single_heap_take, winning_moves};
pub use exhaustive::ExhaustiveSolver;
pub use policy::{random_move, OpponentMove, OpponentPolicy, OptimalPolicy, RandomPolicy};
