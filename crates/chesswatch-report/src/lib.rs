//! Renderers turning player summaries into a JSON snapshot or a console report.

mod console;
mod json;

pub use console::render_console;
pub use json::{build_snapshot, GameRecord, PlayerRecord, StatsSnapshot};
