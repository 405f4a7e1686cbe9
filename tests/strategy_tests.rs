//! Strategy integration tests.
//!
//! The closed-form analysis in `strategy::nim` is checked against the exact
//! game-tree search for every small position, and the optimal policy is
//! checked to only ever claim moves that hand the human a lost position.

use parlour::core::{GameConfig, GameRng, GameState, Goal, HeapMove, Side};
use parlour::strategy::{
    is_safe_position, winning_moves, ExhaustiveSolver, OpponentPolicy, OptimalPolicy,
};
use proptest::prelude::*;
use tracing_subscriber::EnvFilter;

const LIMITS: [Option<u32>; 4] = [None, Some(1), Some(2), Some(3)];
const GOALS: [Goal; 2] = [Goal::NormalPlay, Goal::MiserePlay];

/// Route engine logs through the test harness; `RUST_LOG=parlour=trace`
/// shows the strategy decisions.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Every position with up to three heaps of at most `max` objects.
fn small_positions(max: u32) -> Vec<Vec<u32>> {
    let mut positions = Vec::new();
    for a in 0..=max {
        positions.push(vec![a]);
        for b in 0..=max {
            positions.push(vec![a, b]);
            for c in 0..=max {
                positions.push(vec![a, b, c]);
            }
        }
    }
    positions
}

fn sorted(moves: Vec<HeapMove>) -> Vec<(usize, u32)> {
    let mut pairs: Vec<_> = moves.into_iter().map(|m| (m.heap, m.quantity)).collect();
    pairs.sort_unstable();
    pairs
}

fn apply(heaps: &[u32], mv: HeapMove) -> Vec<u32> {
    let mut next = heaps.to_vec();
    next[mv.heap] -= mv.quantity;
    next
}

// =============================================================================
// Closed form vs exhaustive search
// =============================================================================

#[test]
fn test_safe_positions_match_exhaustive_search() {
    init_tracing();

    for limit in LIMITS {
        for goal in GOALS {
            let mut solver = ExhaustiveSolver::new(limit, goal);
            for heaps in small_positions(7) {
                assert_eq!(
                    is_safe_position(&heaps, limit, goal),
                    !solver.is_winning(&heaps),
                    "heaps {heaps:?}, limit {limit:?}, {goal:?}"
                );
            }
        }
    }
}

#[test]
fn test_winning_moves_match_exhaustive_search() {
    for limit in LIMITS {
        for goal in GOALS {
            let mut solver = ExhaustiveSolver::new(limit, goal);
            for heaps in small_positions(6) {
                assert_eq!(
                    sorted(winning_moves(&heaps, limit, goal)),
                    sorted(solver.winning_moves(&heaps)),
                    "heaps {heaps:?}, limit {limit:?}, {goal:?}"
                );
            }
        }
    }
}

#[test]
fn test_winning_moves_are_legal_and_reach_safe_positions() {
    for limit in LIMITS {
        for goal in GOALS {
            for heaps in small_positions(6) {
                for mv in winning_moves(&heaps, limit, goal) {
                    assert!(mv.quantity >= 1);
                    assert!(mv.quantity <= heaps[mv.heap]);
                    assert!(limit.map_or(true, |l| mv.quantity <= l));

                    let next = apply(&heaps, mv);
                    assert!(
                        is_safe_position(&next, limit, goal),
                        "{mv} from {heaps:?} leaves {next:?}"
                    );
                }
            }
        }
    }
}

// =============================================================================
// Known positions
// =============================================================================

#[test]
fn test_classic_three_four_five() {
    // Nim-sum 3 ^ 4 ^ 5 = 2: only the 3-heap can be reduced, to 1.
    assert_eq!(
        winning_moves(&[3, 4, 5], None, Goal::NormalPlay),
        vec![HeapMove::new(0, 2)]
    );
    assert!(is_safe_position(&[1, 4, 5], None, Goal::NormalPlay));
}

#[test]
fn test_matchsticks_multiples() {
    for count in 1..=40u32 {
        let normal = is_safe_position(&[count], Some(3), Goal::NormalPlay);
        let misere = is_safe_position(&[count], Some(3), Goal::MiserePlay);

        assert_eq!(normal, count % 4 == 0, "normal play, {count} sticks");
        assert_eq!(misere, count % 4 == 1, "misère play, {count} sticks");
    }
}

#[test]
fn test_misere_endgame_of_ones() {
    // Only 1-heaps: the side to move wins iff their count is even.
    assert!(is_safe_position(&[1, 1, 1], None, Goal::MiserePlay));
    assert!(!is_safe_position(&[1, 1, 1, 1], None, Goal::MiserePlay));
    assert!(is_safe_position(&[1], None, Goal::MiserePlay));
}

#[test]
fn test_misere_single_large_heap() {
    // Shrink the large heap so an odd number of 1-heaps remain.
    assert_eq!(
        winning_moves(&[1, 1, 6], None, Goal::MiserePlay),
        vec![HeapMove::new(2, 5)]
    );
    assert_eq!(
        winning_moves(&[1, 6], None, Goal::MiserePlay),
        vec![HeapMove::new(1, 6)]
    );
}

#[test]
fn test_empty_position() {
    // The side to move did not take the last object.
    assert!(is_safe_position(&[0, 0], None, Goal::NormalPlay));
    assert!(!is_safe_position(&[0, 0], None, Goal::MiserePlay));
    assert!(winning_moves(&[0, 0], None, Goal::MiserePlay).is_empty());
}

// =============================================================================
// Optimal policy
// =============================================================================

#[test]
fn test_optimal_policy_keeps_solver_across_rule_changes() {
    let mut policy = OptimalPolicy::new();
    let mut rng = GameRng::new(4);

    let rule_sets = [
        (Some(2), Goal::MiserePlay),
        (None, Goal::NormalPlay),
        (Some(3), Goal::MiserePlay),
    ];
    for (limit, goal) in rule_sets {
        let config = GameConfig {
            heaps: vec![4, 5, 6],
            first_player: Side::Opponent,
            goal,
            pickup_limit: limit,
        };
        let state = GameState::new(&config).unwrap();
        let chosen = policy.choose(&state, &mut rng).unwrap();

        let next = apply(state.heaps(), chosen.heap_move);
        assert_eq!(chosen.used_optimal_strategy, is_safe_position(&next, limit, goal));
    }
}

fn rules() -> impl Strategy<Value = (Vec<u32>, Option<u32>, Goal)> {
    (
        prop::collection::vec(0u32..9, 1..4),
        prop::sample::select(LIMITS.to_vec()),
        prop::sample::select(GOALS.to_vec()),
    )
}

proptest! {
    #[test]
    fn prop_optimal_claims_imply_safe_result((heaps, limit, goal) in rules(), seed in any::<u64>()) {
        let config = GameConfig {
            heaps,
            first_player: Side::Opponent,
            goal,
            pickup_limit: limit,
        };
        let state = GameState::new(&config).unwrap();
        prop_assume!(!state.is_ended());

        let mut rng = GameRng::new(seed);
        let chosen = OptimalPolicy::new().choose(&state, &mut rng).unwrap();
        let next = apply(state.heaps(), chosen.heap_move);

        prop_assert!(state.validate_move(Side::Opponent, chosen.heap_move).is_ok());
        prop_assert_eq!(
            chosen.used_optimal_strategy,
            !is_safe_position(state.heaps(), limit, goal)
        );
        if chosen.used_optimal_strategy {
            prop_assert!(is_safe_position(&next, limit, goal));
        }
    }

    #[test]
    fn prop_normal_play_winning_move_decreases_heap(heaps in prop::collection::vec(0u32..64, 2..6)) {
        for mv in winning_moves(&heaps, None, Goal::NormalPlay) {
            let next = apply(&heaps, mv);
            prop_assert!(next[mv.heap] < heaps[mv.heap]);
            prop_assert_eq!(next.iter().fold(0, |acc, &h| acc ^ h), 0);
        }
    }
}
