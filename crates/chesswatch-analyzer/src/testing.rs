use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use chesswatch_client::JsonFetcher;
use chesswatch_types::{ChesswatchError, Result};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

pub const BASE: &str = "https://api.test/pub";

enum Canned {
    Json(Value),
    Status(u16),
}

/// In-memory fetcher. Urls without a canned response fail as unreachable.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: HashMap<String, Canned>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: &str, body: Value) -> Self {
        self.responses.insert(url.to_string(), Canned::Json(body));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Canned::Status(status));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl JsonFetcher for ScriptedFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }
        match self.responses.get(url) {
            Some(Canned::Json(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(ChesswatchError::Http {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(ChesswatchError::Transport {
                url: url.to_string(),
                message: "connection refused".into(),
            }),
        }
    }
}

/// A finished archive game in the upstream wire shape.
pub fn game_json(id: u32, end_time: DateTime<Utc>) -> Value {
    json!({
        "url": format!("https://www.chess.com/game/live/{id}"),
        "end_time": end_time.timestamp(),
        "time_class": "blitz",
        "rated": true,
        "white": {"username": "err_daemon", "rating": 1400},
        "black": {"username": "m41k", "rating": 1350},
    })
}
