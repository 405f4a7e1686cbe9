//! Exact game-tree solver for heap games.
//!
//! Positions are canonicalized (empty heaps dropped, heaps above the pickup
//! limit folded into one period, the rest sorted) and memoized, so each
//! distinct position is solved once. With a limit, cost depends on the limit
//! and the number of heaps rather than on the heap sizes.

use rustc_hash::FxHashMap;

use crate::core::{Goal, HeapMove, Heaps};

/// Memoized win/loss solver for one (pickup limit, goal) rule set.
#[derive(Clone, Debug)]
pub struct ExhaustiveSolver {
    limit: Option<u32>,
    goal: Goal,
    memo: FxHashMap<Heaps, bool>,
}

impl ExhaustiveSolver {
    /// Create a solver with an empty cache.
    #[must_use]
    pub fn new(limit: Option<u32>, goal: Goal) -> Self {
        Self {
            limit,
            goal,
            memo: FxHashMap::default(),
        }
    }

    /// Whether this solver applies to the given rules.
    #[must_use]
    pub fn matches(&self, limit: Option<u32>, goal: Goal) -> bool {
        self.limit == limit && self.goal == goal
    }

    /// True when the side to move can force a win.
    pub fn is_winning(&mut self, heaps: &[u32]) -> bool {
        let position = self.canonical(heaps);
        self.solve(position)
    }

    /// Every move leading to a position the opponent loses.
    pub fn winning_moves(&mut self, heaps: &[u32]) -> Vec<HeapMove> {
        let mut moves = Vec::new();
        let mut next: Heaps = heaps.iter().copied().collect();
        for (heap, &count) in heaps.iter().enumerate() {
            for quantity in 1..=self.max_take(count) {
                next[heap] = count - quantity;
                if !self.is_winning(&next) {
                    moves.push(HeapMove::new(heap, quantity));
                }
            }
            next[heap] = count;
        }
        moves
    }

    /// Number of distinct positions solved so far.
    #[must_use]
    pub fn positions_solved(&self) -> usize {
        self.memo.len()
    }

    fn max_take(&self, count: u32) -> u32 {
        self.limit.map_or(count, |limit| count.min(limit))
    }

    /// Drop empty heaps, fold large heaps, sort.
    ///
    /// With a pickup limit `k`, a heap of `h >= k + 1` objects has the same
    /// outcome as one of `h % (k + 1) + (k + 1)`, so every heap ends up below
    /// `2k + 2` and the number of reachable positions no longer depends on
    /// the heap sizes.
    fn canonical(&self, heaps: &[u32]) -> Heaps {
        let period = self.limit.and_then(|limit| limit.checked_add(1));
        let mut position: Heaps = heaps
            .iter()
            .copied()
            .filter(|&h| h > 0)
            .map(|h| match period {
                Some(p) if h >= p => h % p + p,
                _ => h,
            })
            .collect();
        position.sort_unstable();
        position
    }

    /// Known outcome of a canonical position.
    fn lookup(&self, position: &Heaps) -> Option<bool> {
        if position.is_empty() {
            // The previous mover took the last object.
            return Some(self.goal == Goal::MiserePlay);
        }
        self.memo.get(position).copied()
    }

    /// Distinct canonical successors of a canonical position.
    fn successors(&self, position: &Heaps) -> Vec<Heaps> {
        let mut children = Vec::new();
        for i in 0..position.len() {
            // Equal heaps lead to the same successors.
            if i > 0 && position[i] == position[i - 1] {
                continue;
            }
            for quantity in 1..=self.max_take(position[i]) {
                let mut next = position.clone();
                next[i] -= quantity;
                children.push(self.canonical(&next));
            }
        }
        children
    }

    /// Depth-first search with an explicit stack, so deep games cannot
    /// exhaust the thread stack.
    fn solve(&mut self, root: Heaps) -> bool {
        if let Some(winning) = self.lookup(&root) {
            return winning;
        }

        let children = self.successors(&root);
        let mut stack = vec![Frame::new(root, children)];
        let mut winning = false;

        while let Some(frame) = stack.last_mut() {
            let mut outcome = None;
            let mut pending = None;
            while let Some(child) = frame.children.get(frame.next) {
                match self.lookup(child) {
                    Some(false) => {
                        outcome = Some(true);
                        break;
                    }
                    Some(true) => frame.next += 1,
                    None => {
                        pending = Some(child.clone());
                        break;
                    }
                }
            }

            if let Some(child) = pending {
                let children = self.successors(&child);
                stack.push(Frame::new(child, children));
                continue;
            }

            winning = outcome.unwrap_or(false);
            if let Some(done) = stack.pop() {
                self.memo.insert(done.position, winning);
            }
        }
        winning
    }
}

/// A position being searched and the successors not yet ruled out.
struct Frame {
    position: Heaps,
    children: Vec<Heaps>,
    next: usize,
}

impl Frame {
    fn new(position: Heaps, children: Vec<Heaps>) -> Self {
        Self {
            position,
            children,
            next: 0,
        }
    }
}
