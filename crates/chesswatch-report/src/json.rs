use chesswatch_types::{game::Game, player::PlayerSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level document written to the stats artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub last_update_utc: DateTime<Utc>,
    pub days: u32,
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub username: String,
    pub active_last_days: bool,
    pub days_window: u32,
    pub games_count: usize,
    pub games_recent: Vec<GameRecord>,
    pub tactics_current: Option<i64>,
    pub tactics_highest: Option<i64>,
    pub tactics_lowest: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub url: String,
    pub end_time: DateTime<Utc>,
    pub time_class: String,
    pub rated: bool,
    pub white: Option<String>,
    pub black: Option<String>,
}

impl From<&Game> for GameRecord {
    fn from(game: &Game) -> Self {
        Self {
            url: game.url.clone(),
            end_time: game.end_time,
            time_class: game.time_class.to_string(),
            rated: game.rated,
            white: game.white_username.clone(),
            black: game.black_username.clone(),
        }
    }
}

impl PlayerRecord {
    fn from_summary(summary: &PlayerSummary, days_window: u32) -> Self {
        Self {
            username: summary.username.clone(),
            active_last_days: summary.is_active,
            days_window,
            games_count: summary.games_count,
            games_recent: summary.recent_games.iter().map(GameRecord::from).collect(),
            tactics_current: summary.tactics.current_rating,
            tactics_highest: summary.tactics.highest_rating,
            tactics_lowest: summary.tactics.lowest_rating,
        }
    }
}

pub fn build_snapshot(
    summaries: &[PlayerSummary],
    window_days: u32,
    generated_at: DateTime<Utc>,
) -> StatsSnapshot {
    StatsSnapshot {
        last_update_utc: generated_at,
        days: window_days,
        players: summaries
            .iter()
            .map(|summary| PlayerRecord::from_summary(summary, window_days))
            .collect(),
    }
}
