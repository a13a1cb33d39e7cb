//! Operational helpers: logging setup and output artifact persistence.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chesswatch_types::{config::OpsConfig, ChesswatchError, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Logs go to stderr so stdout stays free for reports.
pub fn init_tracing(config: &OpsConfig) -> Result<()> {
    let filter = EnvFilter::try_new(config.log_level.clone())
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|err| ChesswatchError::Ops(format!("failed to create log filter: {err}")))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ChesswatchError::Ops(format!("tracing init error: {err}")))?;
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            ChesswatchError::Output(format!(
                "failed to create output dir {}: {err}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Write `document` as pretty-printed JSON, creating parent directories.
pub fn write_json_artifact<T: Serialize>(path: impl AsRef<Path>, document: &T) -> Result<PathBuf> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let body = serde_json::to_string_pretty(document)
        .map_err(|err| ChesswatchError::Output(format!("failed to encode snapshot: {err}")))?;
    fs::write(path, body).map_err(|err| {
        ChesswatchError::Output(format!("failed to write {}: {err}", path.display()))
    })?;
    info!("Snapshot written to {:?}", path);
    Ok(path.to_path_buf())
}
