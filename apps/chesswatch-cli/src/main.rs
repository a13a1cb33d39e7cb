use std::{env, path::PathBuf};

use anyhow::Result;
use chesswatch_analyzer::PlayerAnalyzer;
use chesswatch_client::HttpFetcher;
use chesswatch_ops::{init_tracing, write_json_artifact};
use chesswatch_report::{build_snapshot, render_console};
use chesswatch_types::config::WatchConfig;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "configs/chesswatch.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Console,
    Both,
}

impl OutputFormat {
    fn writes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    fn prints_console(self) -> bool {
        matches!(self, OutputFormat::Console | OutputFormat::Both)
    }
}

/// Check recent chess.com activity and tactics ratings for a list of players.
#[derive(Debug, Parser)]
#[command(name = "chesswatch", version)]
struct Cli {
    /// Config file (falls back to $CHESSWATCH_CONFIG, then configs/chesswatch.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Both)]
    format: OutputFormat,

    /// Comma-separated usernames, replacing the configured list
    #[arg(long, value_delimiter = ',')]
    players: Vec<String>,

    /// Activity window in days
    #[arg(long)]
    days: Option<u32>,

    /// Where to write the JSON snapshot
    #[arg(short, long)]
    output: Option<String>,

    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = apply_overrides(load_config(cli.config.clone()), &cli)?;
    init_tracing(&config.ops)?;

    let fetcher = HttpFetcher::new(&config.api)?;
    let analyzer = PlayerAnalyzer::from_config(fetcher, &config);
    info!(
        "Checking {} player(s) over the last {} day(s)",
        config.watch.players.len(),
        config.watch.window_days
    );
    let summaries = analyzer.analyze_all(&config.watch).await;
    let generated_at = Utc::now();

    if cli.format.writes_json() {
        let snapshot = build_snapshot(&summaries, config.watch.window_days, generated_at);
        write_json_artifact(&config.output.json_path, &snapshot)?;
    }
    if cli.format.prints_console() {
        print!(
            "{}",
            render_console(
                &summaries,
                config.watch.window_days,
                generated_at,
                !cli.no_color
            )
        );
    }
    Ok(())
}

fn load_config(from_args: Option<PathBuf>) -> WatchConfig {
    let from_env = env::var("CHESSWATCH_CONFIG").ok().map(PathBuf::from);
    let path = from_args
        .or(from_env)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    match WatchConfig::from_file(&path) {
        Ok(cfg) => {
            if let Err(err) = cfg.validate() {
                eprintln!(
                    "Invalid config in '{}': {err}. Falling back to internal defaults.",
                    path.display()
                );
                WatchConfig::default()
            } else {
                cfg
            }
        }
        Err(err) => {
            eprintln!(
                "Failed to load config from '{}': {err}. Falling back to internal defaults.",
                path.display()
            );
            WatchConfig::default()
        }
    }
}

fn apply_overrides(mut config: WatchConfig, cli: &Cli) -> Result<WatchConfig> {
    if !cli.players.is_empty() {
        config.watch.players = cli.players.iter().map(|p| p.trim().to_string()).collect();
    }
    if let Some(days) = cli.days {
        config.watch.window_days = days;
    }
    if let Some(output) = &cli.output {
        config.output.json_path = output.clone();
    }
    config.validate()?;
    Ok(config)
}
