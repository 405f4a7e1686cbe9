//! Closed-form heap game analysis.
//!
//! Positions are classified by the Sprague-Grundy theory of Nim:
//! - Several heaps, normal play: XOR of the heap values (the nim-sum)
//! - A pickup limit `k` reduces a heap of `h` to `h mod (k + 1)`
//! - A single heap: leave a multiple of `k + 1` (normal play) or one more
//!   than a multiple (misère play)
//! - Several unlimited heaps, misère play: play as in normal play until the
//!   move would leave only heaps of size 0 or 1, then leave an odd number
//!   of 1-heaps
//!
//! Misère play with a pickup limit across two or more heaps has no closed
//! form here and is delegated to `ExhaustiveSolver`.

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Goal, HeapMove};

use super::exhaustive::ExhaustiveSolver;

/// Bitwise XOR of all values.
///
/// ```
/// use parlour::strategy::nim_sum;
///
/// assert_eq!(nim_sum([3, 4, 5]), 2);
/// assert_eq!(nim_sum([1, 2, 3]), 0);
/// ```
pub fn nim_sum(values: impl IntoIterator<Item = u32>) -> u32 {
    values.into_iter().fold(0, |acc, v| acc ^ v)
}

/// Grundy value of a single heap of `count` under an optional pickup limit.
#[must_use]
pub fn grundy(count: u32, limit: Option<u32>) -> u32 {
    match limit.and_then(|l| l.checked_add(1)) {
        Some(modulus) => count % modulus,
        None => count,
    }
}

/// Quantity to take from a lone heap of `count` to reach a safe position.
///
/// The remainder to take is `count mod (limit + 1)` under normal play and
/// `(count - 1) mod (limit + 1)` under misère play, with an unlimited heap
/// treated as limited by its own size. A zero remainder means no safe move
/// exists.
///
/// ```
/// use parlour::core::Goal;
/// use parlour::strategy::single_heap_take;
///
/// assert_eq!(single_heap_take(7, Some(3), Goal::NormalPlay), Some(3));
/// assert_eq!(single_heap_take(8, Some(3), Goal::NormalPlay), None);
/// assert_eq!(single_heap_take(7, Some(3), Goal::MiserePlay), Some(2));
/// ```
#[must_use]
pub fn single_heap_take(count: u32, limit: Option<u32>, goal: Goal) -> Option<u32> {
    if count == 0 {
        return None;
    }
    let modulus = u64::from(limit.unwrap_or(count)) + 1;
    let target = match goal {
        Goal::NormalPlay => u64::from(count),
        Goal::MiserePlay => u64::from(count) - 1,
    };
    let take = target % modulus;
    if take == 0 {
        return None;
    }
    u32::try_from(take).ok()
}

/// Every move that leaves the opponent in a losing position.
///
/// Empty when the side to move is already lost against perfect play.
#[must_use]
pub fn winning_moves(heaps: &[u32], limit: Option<u32>, goal: Goal) -> Vec<HeapMove> {
    winning_moves_with(heaps, limit, goal, &mut ExhaustiveSolver::new(limit, goal))
}

/// `winning_moves`, reusing a solver's cache for the cases that need it.
pub(crate) fn winning_moves_with(
    heaps: &[u32],
    limit: Option<u32>,
    goal: Goal,
    solver: &mut ExhaustiveSolver,
) -> Vec<HeapMove> {
    let nonempty: SmallVec<[usize; 8]> = heaps
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > 0)
        .map(|(i, _)| i)
        .collect();

    match (nonempty.as_slice(), goal, limit) {
        ([], _, _) => Vec::new(),
        (&[heap], _, _) => single_heap_take(heaps[heap], limit, goal)
            .map(|quantity| HeapMove::new(heap, quantity))
            .into_iter()
            .collect(),
        (_, Goal::NormalPlay, _) => nim_sum_moves(heaps, limit),
        (_, Goal::MiserePlay, None) => misere_moves(heaps),
        // A limit no heap reaches never restricts a move.
        (_, Goal::MiserePlay, Some(limit)) if heaps.iter().all(|&h| h <= limit) => {
            misere_moves(heaps)
        }
        (_, Goal::MiserePlay, Some(_)) => {
            trace!(?heaps, "no closed form, searching exhaustively");
            solver.winning_moves(heaps)
        }
    }
}

/// True when the side to move loses against perfect play.
///
/// With every heap empty the side to move did not take the last object, so
/// the position is lost under normal play and won under misère play.
#[must_use]
pub fn is_safe_position(heaps: &[u32], limit: Option<u32>, goal: Goal) -> bool {
    if heaps.iter().all(|&h| h == 0) {
        return goal == Goal::NormalPlay;
    }
    winning_moves(heaps, limit, goal).is_empty()
}

/// Normal play: reduce one heap so the nim-sum of Grundy values becomes 0.
fn nim_sum_moves(heaps: &[u32], limit: Option<u32>) -> Vec<HeapMove> {
    let x = nim_sum(heaps.iter().map(|&h| grundy(h, limit)));
    trace!(x, "nim-sum");
    if x == 0 {
        return Vec::new();
    }
    heaps
        .iter()
        .enumerate()
        .filter_map(|(i, &h)| {
            let g = grundy(h, limit);
            let target = g ^ x;
            (target < g).then(|| HeapMove::new(i, g - target))
        })
        .collect()
}

/// Misère play over unlimited heaps.
fn misere_moves(heaps: &[u32]) -> Vec<HeapMove> {
    let large: SmallVec<[usize; 8]> = heaps
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > 1)
        .map(|(i, _)| i)
        .collect();
    let ones = heaps.iter().filter(|&&h| h == 1).count();

    match large.as_slice() {
        // Only 1-heaps: taking one wins iff it leaves an odd count.
        [] if ones % 2 == 0 => heaps
            .iter()
            .enumerate()
            .filter(|(_, &h)| h == 1)
            .map(|(i, _)| HeapMove::new(i, 1))
            .collect(),
        [] => Vec::new(),
        // One large heap: shrink it to 0 or 1 so an odd number of 1-heaps remain.
        &[heap] => {
            let leave = if ones % 2 == 0 { 1 } else { 0 };
            vec![HeapMove::new(heap, heaps[heap] - leave)]
        }
        _ => nim_sum_moves(heaps, None),
    }
}
