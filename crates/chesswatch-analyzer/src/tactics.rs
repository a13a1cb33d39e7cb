use chesswatch_client::JsonFetcher;
use chesswatch_types::{player::TacticsSnapshot, ChesswatchError, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::PlayerAnalyzer;

#[derive(Debug, Deserialize)]
struct PlayerStats {
    tactics: Option<TacticsStats>,
}

#[derive(Debug, Deserialize)]
struct TacticsStats {
    last: Option<RatingPoint>,
    highest: Option<RatingPoint>,
    lowest: Option<RatingPoint>,
}

#[derive(Debug, Deserialize)]
struct RatingPoint {
    rating: Option<i64>,
}

fn rating(point: &Option<RatingPoint>) -> Option<i64> {
    point.as_ref().and_then(|p| p.rating)
}

/// Extract puzzle ratings from a player stats document.
///
/// The current rating is the last recorded one, falling back to the
/// highest when upstream has no "last" entry.
pub fn snapshot_from_stats(stats: Value) -> Result<TacticsSnapshot> {
    let stats: PlayerStats = serde_json::from_value(stats)
        .map_err(|err| ChesswatchError::DataShape(format!("player stats: {err}")))?;
    let Some(tactics) = stats.tactics else {
        return Ok(TacticsSnapshot::empty());
    };

    let highest = rating(&tactics.highest);
    Ok(TacticsSnapshot {
        current_rating: rating(&tactics.last).or(highest),
        highest_rating: highest,
        lowest_rating: rating(&tactics.lowest),
    })
}

impl<F> PlayerAnalyzer<F>
where
    F: JsonFetcher,
{
    pub async fn tactics_info(&self, username: &str) -> Result<TacticsSnapshot> {
        let stats = self
            .fetcher
            .fetch_json(&self.endpoints.stats(username))
            .await?;
        snapshot_from_stats(stats)
    }
}
