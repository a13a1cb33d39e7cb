//! Per-player activity and tactics analysis over the chess.com API.

mod archives;
mod compare;
mod games;
mod tactics;

#[cfg(test)]
mod testing;

use chesswatch_client::{Endpoints, JsonFetcher};
use chesswatch_types::{
    config::{WatchConfig, WatchSettings},
    player::{FailureCause, FetchConcern, FetchFailure, PlayerSummary, TacticsSnapshot},
    ChesswatchError,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub use compare::top_by_tactics;
pub use tactics::snapshot_from_stats;

/// Composes archive, game and tactics lookups into one summary per player.
pub struct PlayerAnalyzer<F>
where
    F: JsonFetcher,
{
    fetcher: F,
    endpoints: Endpoints,
    archive_lookback: usize,
}

impl<F> PlayerAnalyzer<F>
where
    F: JsonFetcher,
{
    pub fn new(fetcher: F, endpoints: Endpoints, archive_lookback: usize) -> Self {
        Self {
            fetcher,
            endpoints,
            archive_lookback: archive_lookback.max(1),
        }
    }

    pub fn from_config(fetcher: F, config: &WatchConfig) -> Self {
        Self::new(
            fetcher,
            Endpoints::new(config.api.base_url.as_str()),
            config.watch.archive_lookback,
        )
    }

    pub async fn analyze(&self, username: &str, window_days: u32) -> PlayerSummary {
        self.analyze_at(username, window_days, Utc::now()).await
    }

    /// Analyze one player against an explicit clock.
    ///
    /// A failed sub-fetch degrades to "no games" or "no tactics" and is
    /// recorded in `fetch_failures`; it never aborts the player.
    pub async fn analyze_at(
        &self,
        username: &str,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> PlayerSummary {
        let api_name = username.to_lowercase();
        let mut failures = Vec::new();

        let games = match self.recent_games_at(&api_name, window_days, now).await {
            Ok(games) => games,
            Err(err) => {
                degrade(username, FetchConcern::RecentGames, &err, &mut failures);
                Vec::new()
            }
        };

        let tactics = match self.tactics_info(&api_name).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                degrade(username, FetchConcern::Tactics, &err, &mut failures);
                TacticsSnapshot::empty()
            }
        };

        let summary = PlayerSummary::new(username, games, tactics, failures);
        info!(
            "{}: {} game(s) in the last {} day(s), tactics {:?}",
            summary.username, summary.games_count, window_days, summary.tactics.current_rating
        );
        summary
    }

    /// Analyze every configured player in order, one at a time, against a
    /// single clock reading.
    pub async fn analyze_all(&self, watch: &WatchSettings) -> Vec<PlayerSummary> {
        let now = Utc::now();
        let mut summaries = Vec::with_capacity(watch.players.len());
        for player in &watch.players {
            summaries.push(self.analyze_at(player, watch.window_days, now).await);
        }
        summaries
    }
}

fn degrade(
    username: &str,
    concern: FetchConcern,
    err: &ChesswatchError,
    failures: &mut Vec<FetchFailure>,
) {
    let cause = if err.is_fetch_failure() {
        FailureCause::Request
    } else {
        FailureCause::Data
    };
    warn!(
        "{}: {:?} lookup failed ({:?}), treating as empty: {}",
        username, concern, cause, err
    );
    failures.push(FetchFailure {
        concern,
        cause,
        reason: err.to_string(),
    });
}
