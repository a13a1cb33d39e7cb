//! HTTP facade for the chess.com public API.

use async_trait::async_trait;
use chesswatch_types::{config::ApiConfig, ChesswatchError, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// GET `url` and decode the body as JSON. No retries.
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// Builds the account-level endpoint urls under a configured base.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn archives(&self, username: &str) -> String {
        format!("{}/player/{}/games/archives", self.base_url, username)
    }

    pub fn stats(&self, username: &str) -> String {
        format!("{}/player/{}/stats", self.base_url, username)
    }
}

/// reqwest-backed fetcher sending the identifying User-Agent and a fixed timeout.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()
            .map_err(|err| {
                ChesswatchError::Configuration(format!("failed to build http client: {err}"))
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error(url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChesswatchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<Value>().await.map_err(|err| {
            if err.is_decode() {
                ChesswatchError::DataShape(format!("body of {url} is not json: {err}"))
            } else {
                transport_error(url, err)
            }
        })
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> ChesswatchError {
    ChesswatchError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}
