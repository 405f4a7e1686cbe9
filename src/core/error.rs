//! Error types shared by both engines.
//!
//! Every fallible operation leaves its target untouched when it returns
//! `Err`: a rejected move never half-applies, a rejected cell write never
//! frees or claims a value.

use thiserror::Error;

use super::config::Goal;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for both engines.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Bad construction arguments.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// A move or cell write whose preconditions do not hold.
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),

    /// No constructive method exists for this magic square order.
    #[error("no constructive method for a magic square of order {size}")]
    UnsupportedOrder { size: usize },

    /// A saved game state could not be decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl Error {
    /// True for the `IllegalMove` family.
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, Error::IllegalMove(_))
    }
}

/// Reasons a configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("heap {index} has negative count {count}")]
    NegativeHeap { index: usize, count: i64 },

    #[error("heap {index} count {count} does not fit in 32 bits")]
    HeapTooLarge { index: usize, count: i64 },

    #[error("pickup limit must be positive, got {0}")]
    NonPositivePickupLimit(i64),

    #[error("grid size must be positive")]
    ZeroGridSize,

    #[error("grid of size {0} has more cells than values can address")]
    GridTooLarge(usize),

    #[error("saved game uses different rules ({goal:?}, limit {pickup_limit:?})")]
    RulesMismatch {
        goal: Goal,
        pickup_limit: Option<u32>,
    },
}

/// Reasons a move or cell write is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("it is not this side's turn")]
    NotYourTurn,

    #[error("the game has already ended")]
    GameEnded,

    #[error("heap index {index} out of range ({len} heaps)")]
    HeapOutOfRange { index: usize, len: usize },

    #[error("a move must remove at least one object")]
    ZeroQuantity,

    #[error("cannot remove {quantity} from heap {index} holding {available}")]
    ExceedsHeap {
        index: usize,
        quantity: u32,
        available: u32,
    },

    #[error("cannot remove {quantity}, the pickup limit is {limit}")]
    ExceedsPickupLimit { quantity: u32, limit: u32 },

    #[error("cell ({x}, {y}) is outside a grid of size {size}")]
    CellOutOfBounds { x: usize, y: usize, size: usize },

    #[error("value {value} is outside 1..={max}")]
    ValueOutOfRange { value: u32, max: u32 },

    #[error("value {value} is already placed at ({x}, {y})")]
    DuplicateValue { value: u32, x: usize, y: usize },

    #[error("value {0} is not placed in the grid")]
    ValueNotPlaced(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: Error = ConfigError::ZeroGridSize.into();
        assert_eq!(err, Error::InvalidConfiguration(ConfigError::ZeroGridSize));
        assert!(!err.is_illegal_move());

        let err: Error = IllegalMove::ZeroQuantity.into();
        assert!(err.is_illegal_move());
    }

    #[test]
    fn test_display() {
        let err = Error::from(IllegalMove::ExceedsPickupLimit { quantity: 4, limit: 3 });
        assert_eq!(
            err.to_string(),
            "illegal move: cannot remove 4, the pickup limit is 3"
        );

        let err = Error::UnsupportedOrder { size: 6 };
        assert_eq!(
            err.to_string(),
            "no constructive method for a magic square of order 6"
        );
    }
}
