//! Move representation: a heap index plus a quantity to remove.
//!
//! Moves are plain values. Whether a move is legal depends on the state it is
//! applied to, see `GameState::validate_move`.

use serde::{Deserialize, Serialize};

use super::player::Side;

/// Remove `quantity` objects from the heap at `heap`.
///
/// ```
/// use parlour::core::HeapMove;
///
/// let mv = HeapMove::new(2, 3);
/// assert_eq!(mv.heap, 2);
/// assert_eq!(mv.quantity, 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeapMove {
    /// Index of the heap to take from.
    pub heap: usize,
    /// Number of objects to remove.
    pub quantity: u32,
}

impl HeapMove {
    /// Create a new move.
    #[must_use]
    pub const fn new(heap: usize, quantity: u32) -> Self {
        Self { heap, quantity }
    }
}

impl std::fmt::Display for HeapMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "take {} from heap {}", self.quantity, self.heap)
    }
}

/// An applied move with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - Telling the presentation layer whether the opponent played to win
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The side that moved.
    pub side: Side,

    /// The move taken.
    pub heap_move: HeapMove,

    /// True when the opponent chose this move from a winning strategy.
    /// Always false for human moves.
    pub used_optimal_strategy: bool,
}

impl MoveRecord {
    /// Record a human move.
    #[must_use]
    pub const fn human(heap_move: HeapMove) -> Self {
        Self {
            side: Side::Human,
            heap_move,
            used_optimal_strategy: false,
        }
    }

    /// Record an opponent move.
    #[must_use]
    pub const fn opponent(heap_move: HeapMove, used_optimal_strategy: bool) -> Self {
        Self {
            side: Side::Opponent,
            heap_move,
            used_optimal_strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display() {
        assert_eq!(HeapMove::new(1, 4).to_string(), "take 4 from heap 1");
    }

    #[test]
    fn test_move_record() {
        let mv = HeapMove::new(0, 2);

        let human = MoveRecord::human(mv);
        assert_eq!(human.side, Side::Human);
        assert!(!human.used_optimal_strategy);

        let opponent = MoveRecord::opponent(mv, true);
        assert_eq!(opponent.side, Side::Opponent);
        assert!(opponent.used_optimal_strategy);
    }

    #[test]
    fn test_move_record_serialization() {
        let record = MoveRecord::opponent(HeapMove::new(3, 1), false);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
