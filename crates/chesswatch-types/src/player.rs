use serde::{Deserialize, Serialize};

use crate::game::Game;

/// Maximum number of games kept for display on a summary.
pub const RECENT_GAMES_LIMIT: usize = 5;

/// Puzzle ratings read from the `tactics` section of player stats.
///
/// Every field is independent; `None` means upstream had no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TacticsSnapshot {
    pub current_rating: Option<i64>,
    pub highest_rating: Option<i64>,
    pub lowest_rating: Option<i64>,
}

impl TacticsSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.current_rating.is_none()
            && self.highest_rating.is_none()
            && self.lowest_rating.is_none()
    }
}

/// Which part of a player's analysis a failed request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchConcern {
    RecentGames,
    Tactics,
}

/// Whether a sub-fetch failed on the wire or on the payload it got back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    Request,
    Data,
}

/// A sub-fetch that failed and was degraded to an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub concern: FetchConcern,
    pub cause: FailureCause,
    pub reason: String,
}

/// Per-player result of one run.
///
/// Renderers show a player whose requests all failed exactly like an
/// inactive player without tactics history; `fetch_failures` is the only
/// place the difference is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub username: String,
    pub is_active: bool,
    pub games_count: usize,
    pub recent_games: Vec<Game>,
    pub tactics: TacticsSnapshot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fetch_failures: Vec<FetchFailure>,
}

impl PlayerSummary {
    /// Build a summary from every game found in the window, newest first.
    pub fn new(
        username: impl Into<String>,
        mut games: Vec<Game>,
        tactics: TacticsSnapshot,
        fetch_failures: Vec<FetchFailure>,
    ) -> Self {
        let games_count = games.len();
        games.truncate(RECENT_GAMES_LIMIT);
        Self {
            username: username.into(),
            is_active: games_count > 0,
            games_count,
            recent_games: games,
            tactics,
            fetch_failures,
        }
    }
}
