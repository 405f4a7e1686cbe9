//! Heap game state.
//!
//! ## GameState
//!
//! Complete state of one heap game:
//! - Heap counts (index stable, count never below zero)
//! - Whose turn it is and whether the game has ended
//! - The goal and pickup limit the game was created with
//! - Move history
//!
//! The only mutation is `apply_move`, which validates first and changes
//! nothing when it fails. Once `ended` is set no further move is accepted.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use super::action::{HeapMove, MoveRecord};
use super::config::{GameConfig, Goal};
use super::error::{Error, IllegalMove, Result};
use super::player::{Side, SideMap};

/// Heap storage. Most games have a handful of heaps.
pub type Heaps = SmallVec<[u32; 8]>;

/// Heap game state.
///
/// Uses an `im` vector for the history so snapshots clone in O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    heaps: Heaps,
    goal: Goal,
    pickup_limit: Option<u32>,
    whose_turn: Side,
    ended: bool,
    /// Side that took the last object, set when the game ends.
    took_last: Option<Side>,
    history: Vector<MoveRecord>,
}

impl GameState {
    /// Create the starting state for a configuration.
    ///
    /// A configuration with no objects at all ends immediately, and the
    /// side that did not move first counts as having taken the last object.
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;

        let mut state = Self {
            heaps: config.heaps.iter().copied().collect(),
            goal: config.goal,
            pickup_limit: config.pickup_limit,
            whose_turn: config.first_player,
            ended: false,
            took_last: None,
            history: Vector::new(),
        };
        if state.is_terminal() {
            state.finish(config.first_player.other());
        }
        Ok(state)
    }

    // === Readers ===

    /// All heap counts.
    #[must_use]
    pub fn heaps(&self) -> &[u32] {
        &self.heaps
    }

    /// Count of one heap.
    #[must_use]
    pub fn heap(&self, index: usize) -> Option<u32> {
        self.heaps.get(index).copied()
    }

    /// Number of heaps.
    #[must_use]
    pub fn heap_count(&self) -> usize {
        self.heaps.len()
    }

    /// Objects left across all heaps.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.heaps.iter().map(|&h| u64::from(h)).sum()
    }

    #[must_use]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    #[must_use]
    pub fn pickup_limit(&self) -> Option<u32> {
        self.pickup_limit
    }

    #[must_use]
    pub fn whose_turn(&self) -> Side {
        self.whose_turn
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Moves applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Objects removed by each side so far.
    #[must_use]
    pub fn objects_taken(&self) -> SideMap<u64> {
        let mut taken = SideMap::with_value(0);
        for record in &self.history {
            taken[record.side] += u64::from(record.heap_move.quantity);
        }
        taken
    }

    /// Most objects a single move may take from a heap of `count`.
    #[must_use]
    pub fn max_take(&self, count: u32) -> u32 {
        self.pickup_limit.map_or(count, |limit| count.min(limit))
    }

    // === Rules ===

    /// True iff every heap is empty.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.heaps.iter().all(|&h| h == 0)
    }

    /// The winner once the game has ended, `None` while it is running.
    #[must_use]
    pub fn resolve_outcome(&self) -> Option<Side> {
        if !self.ended {
            return None;
        }
        self.took_last.map(|side| self.goal.winner(side))
    }

    /// Check a move for `side` without applying it.
    pub fn validate_move(&self, side: Side, mv: HeapMove) -> std::result::Result<(), IllegalMove> {
        if self.ended {
            return Err(IllegalMove::GameEnded);
        }
        if self.whose_turn != side {
            return Err(IllegalMove::NotYourTurn);
        }
        let available = self.heap(mv.heap).ok_or(IllegalMove::HeapOutOfRange {
            index: mv.heap,
            len: self.heaps.len(),
        })?;
        if mv.quantity == 0 {
            return Err(IllegalMove::ZeroQuantity);
        }
        if mv.quantity > available {
            return Err(IllegalMove::ExceedsHeap {
                index: mv.heap,
                quantity: mv.quantity,
                available,
            });
        }
        if let Some(limit) = self.pickup_limit {
            if mv.quantity > limit {
                return Err(IllegalMove::ExceedsPickupLimit {
                    quantity: mv.quantity,
                    limit,
                });
            }
        }
        Ok(())
    }

    /// Every legal move for `side`, by heap then quantity.
    #[must_use]
    pub fn legal_moves(&self, side: Side) -> Vec<HeapMove> {
        if self.ended || self.whose_turn != side {
            return Vec::new();
        }
        self.heaps
            .iter()
            .enumerate()
            .flat_map(|(heap, &count)| {
                (1..=self.max_take(count)).map(move |quantity| HeapMove::new(heap, quantity))
            })
            .collect()
    }

    /// Apply a move: decrement the heap, pass the turn, evaluate termination.
    ///
    /// Fails without touching the state when the move is illegal.
    #[instrument(skip(self), fields(heaps = ?self.heaps))]
    pub fn apply_move(&mut self, record: MoveRecord) -> Result<()> {
        self.validate_move(record.side, record.heap_move)?;

        self.heaps[record.heap_move.heap] -= record.heap_move.quantity;
        self.history.push_back(record);
        self.whose_turn = record.side.other();
        debug!(side = %record.side, mv = %record.heap_move, "move applied");

        if self.is_terminal() {
            self.finish(record.side);
        }
        Ok(())
    }

    fn finish(&mut self, took_last: Side) {
        self.ended = true;
        self.took_last = Some(took_last);
        debug!(
            took_last = %took_last,
            winner = %self.goal.winner(took_last),
            "game ended"
        );
    }

    // === Snapshots ===

    /// Encode the state for checkpointing.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Snapshot(e.to_string()))
    }

    /// Decode a state produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Snapshot(e.to_string()))
    }
}
