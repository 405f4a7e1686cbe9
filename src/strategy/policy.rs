//! Opponent policies.
//!
//! Policies are trait-based so a presentation layer can offer difficulty
//! levels:
//! - `OptimalPolicy`: plays a winning move whenever one exists, uniformly at
//!   random among them, and otherwise falls back to random legal play
//! - `RandomPolicy`: uniform random legal play

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{GameRng, GameState, HeapMove};

use super::exhaustive::ExhaustiveSolver;
use super::nim::winning_moves_with;

/// A move chosen by a policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentMove {
    /// The move to play.
    pub heap_move: HeapMove,
    /// True when the move comes from a winning strategy rather than chance.
    pub used_optimal_strategy: bool,
}

/// Policy for choosing the opponent's move.
pub trait OpponentPolicy: Send {
    /// Choose a move for the side to move in `state`.
    ///
    /// Returns `None` if every heap is empty. Must not depend on anything
    /// but the heaps, the rules, and `rng`.
    fn choose(&mut self, state: &GameState, rng: &mut GameRng) -> Option<OpponentMove>;
}

/// Game-theoretically optimal policy.
///
/// Keeps the exhaustive solver's cache between moves, so repeated calls in
/// the same game only solve new positions.
#[derive(Clone, Debug, Default)]
pub struct OptimalPolicy {
    solver: Option<ExhaustiveSolver>,
}

impl OptimalPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn solver_for(&mut self, state: &GameState) -> &mut ExhaustiveSolver {
        let (limit, goal) = (state.pickup_limit(), state.goal());
        if !self.solver.as_ref().is_some_and(|s| s.matches(limit, goal)) {
            self.solver = Some(ExhaustiveSolver::new(limit, goal));
        }
        self.solver.get_or_insert_with(|| ExhaustiveSolver::new(limit, goal))
    }
}

impl OpponentPolicy for OptimalPolicy {
    fn choose(&mut self, state: &GameState, rng: &mut GameRng) -> Option<OpponentMove> {
        let (limit, goal) = (state.pickup_limit(), state.goal());
        let solver = self.solver_for(state);
        let moves = winning_moves_with(state.heaps(), limit, goal, solver);

        if let Some(&heap_move) = rng.choose(&moves) {
            trace!(%heap_move, candidates = moves.len(), "winning move");
            return Some(OpponentMove {
                heap_move,
                used_optimal_strategy: true,
            });
        }

        let heap_move = random_move(state, rng)?;
        trace!(%heap_move, "no winning move, playing randomly");
        Some(OpponentMove {
            heap_move,
            used_optimal_strategy: false,
        })
    }
}

/// Uniform random policy.
///
/// Picks a nonempty heap uniformly, then a quantity uniformly from the
/// quantities legal on that heap.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl OpponentPolicy for RandomPolicy {
    fn choose(&mut self, state: &GameState, rng: &mut GameRng) -> Option<OpponentMove> {
        random_move(state, rng).map(|heap_move| OpponentMove {
            heap_move,
            used_optimal_strategy: false,
        })
    }
}

/// A uniformly random legal move, `None` when every heap is empty.
pub fn random_move(state: &GameState, rng: &mut GameRng) -> Option<HeapMove> {
    let nonempty: SmallVec<[usize; 8]> = state
        .heaps()
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > 0)
        .map(|(i, _)| i)
        .collect();

    let heap = nonempty[rng.index(nonempty.len())?];
    let quantity = rng.quantity(state.max_take(state.heaps()[heap]))?;
    Some(HeapMove::new(heap, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Goal, Side};

    fn state(heaps: &[u32], limit: Option<u32>, goal: Goal) -> GameState {
        let config = GameConfig {
            heaps: heaps.to_vec(),
            first_player: Side::Opponent,
            goal,
            pickup_limit: limit,
        };
        GameState::new(&config).unwrap()
    }

    #[test]
    fn test_optimal_matchsticks() {
        let s = state(&[7], Some(3), Goal::NormalPlay);
        let mut rng = GameRng::new(1);

        let chosen = OptimalPolicy::new().choose(&s, &mut rng).unwrap();
        assert_eq!(chosen.heap_move, HeapMove::new(0, 3));
        assert!(chosen.used_optimal_strategy);
    }

    #[test]
    fn test_optimal_falls_back_to_random() {
        let s = state(&[8], Some(3), Goal::NormalPlay);
        let mut policy = OptimalPolicy::new();

        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let chosen = policy.choose(&s, &mut rng).unwrap();
            assert!(!chosen.used_optimal_strategy);
            assert!((1..=3).contains(&chosen.heap_move.quantity));
        }
    }

    #[test]
    fn test_random_move_skips_empty_heaps() {
        let s = state(&[0, 4, 0], None, Goal::NormalPlay);
        let mut rng = GameRng::new(9);

        for _ in 0..50 {
            let mv = random_move(&s, &mut rng).unwrap();
            assert_eq!(mv.heap, 1);
            assert!((1..=4).contains(&mv.quantity));
        }
    }

    #[test]
    fn test_random_move_reaches_every_nonempty_heap() {
        let s = state(&[2, 0, 3], None, Goal::NormalPlay);
        let mut rng = GameRng::new(12);

        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[random_move(&s, &mut rng).unwrap().heap] = true;
        }
        assert_eq!(seen, [true, false, true]);
    }

    #[test]
    fn test_no_move_on_empty_heaps() {
        let s = state(&[0, 0], None, Goal::NormalPlay);
        let mut rng = GameRng::new(3);

        assert_eq!(OptimalPolicy::new().choose(&s, &mut rng), None);
        assert_eq!(RandomPolicy.choose(&s, &mut rng), None);
    }

    #[test]
    fn test_solver_rebuilt_for_new_rules() {
        let mut policy = OptimalPolicy::new();
        let mut rng = GameRng::new(5);

        let limited = state(&[3, 4], Some(2), Goal::MiserePlay);
        policy.choose(&limited, &mut rng);
        assert!(policy.solver.as_ref().unwrap().matches(Some(2), Goal::MiserePlay));

        let other = state(&[3, 4], Some(3), Goal::MiserePlay);
        policy.choose(&other, &mut rng);
        assert!(policy.solver.as_ref().unwrap().matches(Some(3), Goal::MiserePlay));
    }
}
