use chesswatch_client::JsonFetcher;
use chesswatch_types::{
    game::{Game, TimeClass},
    ChesswatchError, Result,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::PlayerAnalyzer;

#[derive(Debug, Deserialize)]
struct ArchiveGames {
    games: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ArchiveGame {
    url: Option<String>,
    end_time: Option<i64>,
    time_class: Option<TimeClass>,
    rated: Option<bool>,
    white: Option<GameSide>,
    black: Option<GameSide>,
}

#[derive(Debug, Deserialize)]
struct GameSide {
    username: Option<String>,
}

impl ArchiveGame {
    /// Games without a url or a positive end time are unfinished or malformed.
    fn into_game(self) -> Option<Game> {
        let end_time = self
            .end_time
            .filter(|ts| *ts > 0)
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))?;
        Some(Game {
            url: self.url?,
            end_time,
            time_class: self.time_class.unwrap_or_default(),
            rated: self.rated.unwrap_or(false),
            white_username: self.white.and_then(|side| side.username),
            black_username: self.black.and_then(|side| side.username),
        })
    }
}

impl<F> PlayerAnalyzer<F>
where
    F: JsonFetcher,
{
    pub async fn recent_games(&self, username: &str, window_days: u32) -> Result<Vec<Game>> {
        self.recent_games_at(username, window_days, Utc::now()).await
    }

    /// Games finished within `window_days` of `now`, newest first.
    ///
    /// Only the last `archive_lookback` monthly archives are scanned. An
    /// archive that cannot be fetched is skipped and the rest still count.
    pub async fn recent_games_at(
        &self,
        username: &str,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<Game>> {
        let threshold = window_start(now, window_days);

        let archives = self.list_archives(username).await?;
        if archives.is_empty() {
            return Ok(Vec::new());
        }

        let start = archives.len().saturating_sub(self.archive_lookback);
        let mut recent = Vec::new();
        for archive_url in &archives[start..] {
            let games = match self.archive_games(archive_url).await {
                Ok(games) => games,
                Err(err) => {
                    warn!("{}: skipping archive {}: {}", username, archive_url, err);
                    continue;
                }
            };
            recent.extend(games.into_iter().filter(|game| game.end_time >= threshold));
        }

        recent.sort_by(|a, b| b.end_time.cmp(&a.end_time));
        debug!(
            "{}: {} game(s) since {}",
            username,
            recent.len(),
            threshold.to_rfc3339()
        );
        Ok(recent)
    }

    async fn archive_games(&self, archive_url: &str) -> Result<Vec<Game>> {
        let body = self.fetcher.fetch_json(archive_url).await?;
        parse_archive_games(body)
    }
}

/// Start of the window. Windows reaching past the earliest representable
/// instant start there instead.
fn window_start(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(window_days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn parse_archive_games(body: Value) -> Result<Vec<Game>> {
    let archive: ArchiveGames = serde_json::from_value(body)
        .map_err(|err| ChesswatchError::DataShape(format!("archive games: {err}")))?;
    Ok(archive
        .games
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<ArchiveGame>(raw) {
            Ok(game) => game.into_game(),
            Err(err) => {
                debug!("dropping malformed game: {}", err);
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use chesswatch_client::Endpoints;
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::testing::{game_json, ScriptedFetcher, BASE};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn archive(month: u32) -> String {
        format!("{BASE}/player/err_daemon/games/2024/{month:02}")
    }

    fn with_archives(months: &[u32]) -> ScriptedFetcher {
        let urls: Vec<String> = months.iter().map(|m| archive(*m)).collect();
        ScriptedFetcher::new().json(
            &format!("{BASE}/player/err_daemon/games/archives"),
            json!({ "archives": urls }),
        )
    }

    #[test]
    fn games_without_end_time_or_url_are_dropped() {
        let body = json!({"games": [
            {"url": "https://www.chess.com/game/daily/1", "time_class": "daily"},
            {"url": "https://www.chess.com/game/daily/2", "end_time": 0},
            {"end_time": 1715335200, "time_class": "blitz"},
            {"url": "https://www.chess.com/game/live/3", "end_time": 1715335200,
             "time_class": "bullet", "rated": false,
             "white": {"username": "err_daemon"}, "black": null},
        ]});
        let games = parse_archive_games(body).expect("games");
        assert_eq!(games.len(), 1);
        let game = &games[0];
        assert_eq!(game.url, "https://www.chess.com/game/live/3");
        assert_eq!(game.time_class, TimeClass::Bullet);
        assert!(!game.rated);
        assert_eq!(game.white_username.as_deref(), Some("err_daemon"));
        assert_eq!(game.black_username, None);
        assert_eq!(game.end_time.timestamp(), 1715335200);
    }

    #[test]
    fn malformed_game_entries_do_not_spoil_the_archive() {
        let body = json!({"games": [
            "not a game",
            {"url": "https://www.chess.com/game/live/4", "end_time": "yesterday"},
            {"url": "https://www.chess.com/game/live/5", "end_time": 1715335200},
        ]});
        let games = parse_archive_games(body).expect("games");
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].url, "https://www.chess.com/game/live/5");
        assert_eq!(games[0].time_class, TimeClass::Unknown);
    }

    #[tokio::test]
    async fn no_archives_means_no_games() {
        let fetcher = with_archives(&[]);
        let analyzer = PlayerAnalyzer::new(fetcher, Endpoints::new(BASE), 3);
        let games = analyzer
            .recent_games_at("err_daemon", 2, now())
            .await
            .expect("games");
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn only_games_inside_the_window_are_kept() {
        let threshold = now() - Duration::days(2);
        let fetcher = with_archives(&[5]).json(
            &archive(5),
            json!({"games": [
                game_json(1, threshold - Duration::seconds(1)),
                game_json(2, threshold),
                game_json(3, now() - Duration::hours(1)),
                game_json(4, now() - Duration::days(9)),
            ]}),
        );
        let analyzer = PlayerAnalyzer::new(fetcher, Endpoints::new(BASE), 3);
        let games = analyzer
            .recent_games_at("err_daemon", 2, now())
            .await
            .expect("games");
        let urls: Vec<&str> = games.iter().map(|g| g.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.chess.com/game/live/3",
                "https://www.chess.com/game/live/2",
            ]
        );
        assert!(games.iter().all(|g| g.end_time >= threshold));
    }

    #[test]
    fn oversized_window_starts_at_earliest_instant() {
        assert_eq!(window_start(now(), 2), now() - Duration::days(2));
        assert_eq!(window_start(now(), u32::MAX), DateTime::<Utc>::MIN_UTC);
    }

    #[tokio::test]
    async fn oversized_window_keeps_every_finished_game() {
        let fetcher = with_archives(&[5]).json(
            &archive(5),
            json!({"games": [
                game_json(1, now() - Duration::days(400)),
                game_json(2, now() - Duration::hours(1)),
            ]}),
        );
        let analyzer = PlayerAnalyzer::new(fetcher, Endpoints::new(BASE), 3);
        let games = analyzer
            .recent_games_at("err_daemon", 100_000_000, now())
            .await
            .expect("games");
        let urls: Vec<&str> = games.iter().map(|g| g.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.chess.com/game/live/2",
                "https://www.chess.com/game/live/1",
            ]
        );
    }

    #[tokio::test]
    async fn failed_archive_is_skipped_and_rest_sorted() {
        let fetcher = with_archives(&[3, 4, 5])
            .json(
                &archive(3),
                json!({"games": [game_json(31, now() - Duration::hours(30))]}),
            )
            .json(
                &archive(5),
                json!({"games": [
                    game_json(51, now() - Duration::hours(40)),
                    game_json(52, now() - Duration::hours(2)),
                ]}),
            );
        let analyzer = PlayerAnalyzer::new(fetcher, Endpoints::new(BASE), 3);
        let games = analyzer
            .recent_games_at("err_daemon", 3, now())
            .await
            .expect("games");
        let urls: Vec<&str> = games.iter().map(|g| g.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.chess.com/game/live/52",
                "https://www.chess.com/game/live/31",
                "https://www.chess.com/game/live/51",
            ]
        );
        assert!(games
            .windows(2)
            .all(|pair| pair[0].end_time >= pair[1].end_time));
    }

    #[tokio::test]
    async fn only_the_most_recent_archives_are_fetched() {
        let fetcher = with_archives(&[1, 2, 3, 4]);
        let analyzer = PlayerAnalyzer::new(fetcher, Endpoints::new(BASE), 3);
        let games = analyzer
            .recent_games_at("err_daemon", 2, now())
            .await
            .expect("games");
        assert!(games.is_empty());

        let requested = analyzer.fetcher.requested();
        assert!(!requested.contains(&archive(1)));
        assert_eq!(&requested[1..], &[archive(2), archive(3), archive(4)]);
    }

    #[tokio::test]
    async fn failed_archive_list_is_an_error() {
        let analyzer = PlayerAnalyzer::new(ScriptedFetcher::new(), Endpoints::new(BASE), 3);
        let err = analyzer
            .recent_games_at("err_daemon", 2, now())
            .await
            .unwrap_err();
        assert!(matches!(err, ChesswatchError::Transport { .. }));
    }
}
