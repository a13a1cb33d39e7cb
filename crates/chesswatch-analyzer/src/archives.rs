use chesswatch_client::JsonFetcher;
use chesswatch_types::{ChesswatchError, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::PlayerAnalyzer;

#[derive(Debug, Deserialize)]
struct ArchiveList {
    archives: Option<Vec<String>>,
}

impl<F> PlayerAnalyzer<F>
where
    F: JsonFetcher,
{
    /// Monthly archive urls for `username`, oldest first as upstream lists them.
    pub async fn list_archives(&self, username: &str) -> Result<Vec<String>> {
        let body = self
            .fetcher
            .fetch_json(&self.endpoints.archives(username))
            .await?;
        let archives = parse_archive_list(body)?;
        debug!("{}: {} archive(s) available", username, archives.len());
        Ok(archives)
    }
}

fn parse_archive_list(body: Value) -> Result<Vec<String>> {
    let list: ArchiveList = serde_json::from_value(body)
        .map_err(|err| ChesswatchError::DataShape(format!("archive list: {err}")))?;
    Ok(list.archives.unwrap_or_default())
}
