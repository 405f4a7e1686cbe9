//! Heap game configuration.
//!
//! A game is configured at construction by providing:
//! - The starting heaps
//! - Who moves first
//! - The `Goal` (normal or misère play)
//! - An optional pickup limit
//!
//! Nothing is read from process-wide state. A presentation layer that keeps
//! its own settings converts them into a `GameConfig` and hands it over.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Result};
use super::player::Side;

/// Total object count above which a configuration is considered large.
///
/// The engine accepts large games; presentation layers use this to decide
/// whether to ask for confirmation before rendering that many objects.
pub const LARGE_GAME_OBJECTS: u64 = 200;

/// What taking the last object means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    /// The player who takes the last object wins.
    #[default]
    NormalPlay,
    /// The player who takes the last object loses.
    MiserePlay,
}

impl Goal {
    /// The winner, given who took the last object.
    ///
    /// ```
    /// use parlour::core::{Goal, Side};
    ///
    /// assert_eq!(Goal::NormalPlay.winner(Side::Human), Side::Human);
    /// assert_eq!(Goal::MiserePlay.winner(Side::Human), Side::Opponent);
    /// ```
    #[must_use]
    pub const fn winner(self, took_last: Side) -> Side {
        match self {
            Goal::NormalPlay => took_last,
            Goal::MiserePlay => took_last.other(),
        }
    }
}

/// Complete heap game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Starting object count of each heap.
    pub heaps: Vec<u32>,

    /// Side that moves first.
    pub first_player: Side,

    /// Normal or misère play.
    pub goal: Goal,

    /// Maximum objects removable in one move. `None` for unlimited.
    pub pickup_limit: Option<u32>,
}

impl GameConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::default()
    }

    /// Single heap of matchsticks with a pickup limit.
    #[must_use]
    pub fn matchsticks(count: u32, pickup_limit: u32) -> Self {
        Self {
            heaps: vec![count],
            first_player: Side::Human,
            goal: Goal::NormalPlay,
            pickup_limit: Some(pickup_limit),
        }
    }

    /// Several unlimited heaps.
    #[must_use]
    pub fn nim(heaps: impl IntoIterator<Item = u32>) -> Self {
        Self {
            heaps: heaps.into_iter().collect(),
            first_player: Side::Human,
            goal: Goal::NormalPlay,
            pickup_limit: None,
        }
    }

    /// Build from unchecked presentation-layer numbers.
    ///
    /// Rejects negative heaps, heaps that do not fit in `u32`, and a
    /// non-positive pickup limit.
    pub fn from_raw(
        heaps: &[i64],
        first_player: Side,
        goal: Goal,
        pickup_limit: Option<i64>,
    ) -> Result<Self> {
        let heaps = heaps
            .iter()
            .enumerate()
            .map(|(index, &count)| {
                if count < 0 {
                    return Err(ConfigError::NegativeHeap { index, count });
                }
                u32::try_from(count).map_err(|_| ConfigError::HeapTooLarge { index, count })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let pickup_limit = match pickup_limit {
            None => None,
            Some(limit) if limit <= 0 => return Err(ConfigError::NonPositivePickupLimit(limit).into()),
            // Any limit past u32::MAX is effectively unlimited.
            Some(limit) => Some(u32::try_from(limit).unwrap_or(u32::MAX)),
        };

        let config = Self {
            heaps,
            first_player,
            goal,
            pickup_limit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.pickup_limit == Some(0) {
            return Err(ConfigError::NonPositivePickupLimit(0).into());
        }
        Ok(())
    }

    /// Total number of objects at the start.
    #[must_use]
    pub fn total_objects(&self) -> u64 {
        self.heaps.iter().map(|&h| u64::from(h)).sum()
    }

    /// True when the game has more objects than `LARGE_GAME_OBJECTS`.
    #[must_use]
    pub fn is_large(&self) -> bool {
        self.total_objects() > LARGE_GAME_OBJECTS
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::nim([3, 4, 5])
    }
}

/// Builder for `GameConfig`.
///
/// ```
/// use parlour::core::{GameConfig, Goal, Side};
///
/// let config = GameConfig::builder()
///     .heaps([21])
///     .pickup_limit(3)
///     .goal(Goal::MiserePlay)
///     .first_player(Side::Opponent)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.heaps, vec![21]);
/// assert_eq!(config.pickup_limit, Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct GameConfigBuilder {
    config: GameConfig,
}

impl Default for GameConfigBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig {
                heaps: Vec::new(),
                first_player: Side::Human,
                goal: Goal::NormalPlay,
                pickup_limit: None,
            },
        }
    }
}

impl GameConfigBuilder {
    #[must_use]
    pub fn heaps(mut self, heaps: impl IntoIterator<Item = u32>) -> Self {
        self.config.heaps = heaps.into_iter().collect();
        self
    }

    #[must_use]
    pub fn first_player(mut self, side: Side) -> Self {
        self.config.first_player = side;
        self
    }

    #[must_use]
    pub fn goal(mut self, goal: Goal) -> Self {
        self.config.goal = goal;
        self
    }

    #[must_use]
    pub fn pickup_limit(mut self, limit: u32) -> Self {
        self.config.pickup_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn unlimited(mut self) -> Self {
        self.config.pickup_limit = None;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<GameConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
