//! Heap game session.
//!
//! `HeapGame` owns one running game: its configuration, its state, the
//! random source, and the opponent policy. A presentation layer drives it:
//! - Human moves arrive through `apply_human_move`
//! - The opponent moves when the presentation layer calls
//!   `apply_opponent_move`, after whatever delay it likes
//! - `new_game` discards the state and starts over from the configuration
//!
//! The engine has no timers and gives the same results whenever it is called.

use tracing::{debug, instrument, warn};

use crate::core::{
    ConfigError, Error, GameConfig, GameRng, GameRngState, GameState, HeapMove, IllegalMove,
    MoveRecord, Result, Side,
};
use crate::strategy::{OpponentMove, OpponentPolicy, OptimalPolicy};

/// A heap game against a computer opponent.
///
/// ## Example
///
/// ```
/// use parlour::core::{GameConfig, GameRng, Side};
/// use parlour::rules::HeapGame;
///
/// let mut game = HeapGame::new(GameConfig::matchsticks(7, 3), GameRng::new(1)).unwrap();
///
/// game.apply_human_move(0, 1).unwrap();
/// assert_eq!(game.state().heaps(), &[6]);
/// assert_eq!(game.state().whose_turn(), Side::Opponent);
///
/// // The opponent leaves a multiple of four.
/// let record = game.apply_opponent_move().unwrap();
/// assert_eq!(record.heap_move.quantity, 2);
/// assert!(record.used_optimal_strategy);
/// ```
#[derive(Debug)]
pub struct HeapGame<P: OpponentPolicy = OptimalPolicy> {
    config: GameConfig,
    state: GameState,
    rng: GameRng,
    policy: P,
}

impl HeapGame<OptimalPolicy> {
    /// Start a game against the optimal opponent.
    pub fn new(config: GameConfig, rng: GameRng) -> Result<Self> {
        Self::with_policy(config, rng, OptimalPolicy::new())
    }
}

impl<P: OpponentPolicy> HeapGame<P> {
    /// Start a game against the given policy.
    pub fn with_policy(config: GameConfig, rng: GameRng, policy: P) -> Result<Self> {
        let state = GameState::new(&config)?;
        debug!(heaps = ?config.heaps, goal = ?config.goal, limit = ?config.pickup_limit, "new game");
        Ok(Self {
            config,
            state,
            rng,
            policy,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current RNG position, for checkpointing alongside `GameState::to_bytes`.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Replace the state with a previously saved one.
    ///
    /// Fails, changing nothing, when the saved state's goal or pickup limit
    /// differs from this game's configuration.
    pub fn restore(&mut self, state: GameState, rng: &GameRngState) -> Result<()> {
        if state.goal() != self.config.goal || state.pickup_limit() != self.config.pickup_limit {
            warn!(goal = ?state.goal(), limit = ?state.pickup_limit(), "saved state rules differ");
            return Err(ConfigError::RulesMismatch {
                goal: state.goal(),
                pickup_limit: state.pickup_limit(),
            }
            .into());
        }
        self.state = state;
        self.rng = GameRng::from_state(rng);
        Ok(())
    }

    /// Discard the current game and start again from the configuration.
    pub fn new_game(&mut self) -> Result<()> {
        self.state = GameState::new(&self.config)?;
        debug!(heaps = ?self.config.heaps, "game restarted");
        Ok(())
    }

    /// Remove `quantity` objects from heap `heap_index` on the human's behalf.
    ///
    /// Fails, leaving the state unchanged, when it is not the human's turn,
    /// the game has ended, the heap does not exist, or the quantity is zero,
    /// larger than the heap, or above the pickup limit.
    #[instrument(skip(self))]
    pub fn apply_human_move(&mut self, heap_index: usize, quantity: u32) -> Result<MoveRecord> {
        let record = MoveRecord::human(HeapMove::new(heap_index, quantity));
        if let Err(err) = self.state.apply_move(record) {
            warn!(%err, "human move rejected");
            return Err(err);
        }
        Ok(record)
    }

    /// The move the opponent would play now.
    ///
    /// Returns `None` when it is not the opponent's turn or the game has
    /// ended. Reads the state without changing it; only the random source
    /// advances.
    pub fn compute_opponent_move(&mut self) -> Option<OpponentMove> {
        if self.state.is_ended() || self.state.whose_turn() != Side::Opponent {
            return None;
        }
        self.policy.choose(&self.state, &mut self.rng)
    }

    /// Compute and apply the opponent's move.
    #[instrument(skip(self), fields(heaps = ?self.state.heaps()))]
    pub fn apply_opponent_move(&mut self) -> Result<MoveRecord> {
        if self.state.is_ended() {
            return Err(IllegalMove::GameEnded.into());
        }
        if self.state.whose_turn() != Side::Opponent {
            return Err(IllegalMove::NotYourTurn.into());
        }
        let chosen = self
            .compute_opponent_move()
            .ok_or(Error::IllegalMove(IllegalMove::GameEnded))?;
        let record = MoveRecord::opponent(chosen.heap_move, chosen.used_optimal_strategy);
        self.state.apply_move(record)?;
        Ok(record)
    }

    /// True iff every heap is empty.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// The winner once the game has ended.
    #[must_use]
    pub fn resolve_outcome(&self) -> Option<Side> {
        self.state.resolve_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Goal;
    use crate::strategy::RandomPolicy;

    #[test]
    fn test_human_then_opponent() {
        let config = GameConfig::nim([3, 4, 5]);
        let mut game = HeapGame::new(config, GameRng::new(42)).unwrap();

        game.apply_human_move(2, 5).unwrap();
        assert_eq!(game.state().heaps(), &[3, 4, 0]);

        let record = game.apply_opponent_move().unwrap();
        assert_eq!(record.side, Side::Opponent);
        // [3, 4, 0] has nim-sum 7: only heap 1 (4 -> 3) decreases.
        assert_eq!(record.heap_move, HeapMove::new(1, 1));
        assert!(record.used_optimal_strategy);
        assert_eq!(game.state().whose_turn(), Side::Human);
    }

    #[test]
    fn test_opponent_cannot_move_out_of_turn() {
        let mut game = HeapGame::new(GameConfig::nim([2, 2]), GameRng::new(1)).unwrap();

        assert_eq!(game.compute_opponent_move(), None);
        assert_eq!(
            game.apply_opponent_move(),
            Err(Error::IllegalMove(IllegalMove::NotYourTurn))
        );
    }

    #[test]
    fn test_compute_does_not_mutate_state() {
        let config = GameConfig::builder()
            .heaps([3, 4, 5])
            .first_player(Side::Opponent)
            .build()
            .unwrap();
        let mut game = HeapGame::new(config, GameRng::new(7)).unwrap();
        let before = game.state().clone();

        let chosen = game.compute_opponent_move().unwrap();
        assert_eq!(game.state(), &before);
        assert_eq!(chosen.heap_move, HeapMove::new(0, 2));
    }

    #[test]
    fn test_new_game_resets_state() {
        let mut game = HeapGame::new(GameConfig::matchsticks(10, 3), GameRng::new(2)).unwrap();
        game.apply_human_move(0, 3).unwrap();
        game.apply_opponent_move().unwrap();

        game.new_game().unwrap();
        assert_eq!(game.state().heaps(), &[10]);
        assert_eq!(game.state().whose_turn(), Side::Human);
        assert!(game.state().history().is_empty());
    }

    #[test]
    fn test_misere_outcome() {
        let config = GameConfig::builder()
            .heaps([2])
            .goal(Goal::MiserePlay)
            .build()
            .unwrap();
        let mut game = HeapGame::new(config, GameRng::new(3)).unwrap();

        game.apply_human_move(0, 1).unwrap();
        game.apply_opponent_move().unwrap();

        assert!(game.is_terminal());
        assert_eq!(game.resolve_outcome(), Some(Side::Human));
    }

    #[test]
    fn test_restore_checkpoint() {
        let config = GameConfig::builder()
            .heaps([9, 6])
            .first_player(Side::Opponent)
            .build()
            .unwrap();
        let mut game = HeapGame::with_policy(config, GameRng::new(11), RandomPolicy).unwrap();

        let saved_state = game.state().clone();
        let saved_rng = game.rng_state();
        let first = game.apply_opponent_move().unwrap();

        game.restore(saved_state, &saved_rng).unwrap();
        let replayed = game.apply_opponent_move().unwrap();
        assert_eq!(first, replayed);
    }

    #[test]
    fn test_restore_rejects_other_rules() {
        let mut game = HeapGame::new(GameConfig::matchsticks(10, 3), GameRng::new(2)).unwrap();
        game.apply_human_move(0, 2).unwrap();
        let before = game.state().clone();

        let misere = GameConfig::builder()
            .heaps([10])
            .pickup_limit(3)
            .goal(Goal::MiserePlay)
            .build()
            .unwrap();
        let other_limit = GameConfig::matchsticks(10, 4);
        for config in [misere, other_limit] {
            let foreign = GameState::new(&config).unwrap();
            assert!(matches!(
                game.restore(foreign, &GameRng::new(0).state()),
                Err(Error::InvalidConfiguration(ConfigError::RulesMismatch { .. }))
            ));
            assert_eq!(game.state(), &before);
        }

        game.new_game().unwrap();
        assert_eq!(game.state().goal(), Goal::NormalPlay);
        assert_eq!(game.state().pickup_limit(), Some(3));
    }
}
