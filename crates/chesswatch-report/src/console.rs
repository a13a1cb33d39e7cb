use std::fmt::Write;

use chesswatch_analyzer::top_by_tactics;
use chesswatch_types::{
    game::Game,
    player::{PlayerSummary, TacticsSnapshot},
};
use chrono::{DateTime, Utc};
use crossterm::style::{style, Color, Stylize};

const RULE_WIDTH: usize = 60;

struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn strong(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Render a human-readable comparison report.
///
/// With `colored` unset the output carries no escape sequences.
pub fn render_console(
    summaries: &[PlayerSummary],
    window_days: u32,
    generated_at: DateTime<Utc>,
    colored: bool,
) -> String {
    let palette = Palette { enabled: colored };
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    let _ = writeln!(out, "{}", palette.paint(&rule, Color::DarkGrey));
    let _ = writeln!(
        out,
        "{}  last {} day(s), as of {}",
        palette.strong("Chess activity report", Color::Cyan),
        window_days,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "{}", palette.paint(&rule, Color::DarkGrey));

    for summary in summaries {
        render_player(&mut out, &palette, summary);
    }

    let active = summaries.iter().filter(|s| s.is_active).count();
    let _ = writeln!(out, "{}", palette.paint(&"-".repeat(RULE_WIDTH), Color::DarkGrey));
    let _ = writeln!(out, "Active players: {}/{}", active, summaries.len());
    match top_by_tactics(summaries) {
        Some(top) => {
            let rating = top
                .tactics
                .current_rating
                .map(|r| r.to_string())
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "Top tactics among active players: {} ({})",
                palette.strong(&top.username, Color::Yellow),
                rating
            );
        }
        None => {
            let _ = writeln!(out, "Top tactics among active players: none");
        }
    }
    out
}

fn render_player(out: &mut String, palette: &Palette, summary: &PlayerSummary) {
    let status = if summary.is_active {
        palette.strong("ACTIVE", Color::Green)
    } else {
        palette.paint("inactive", Color::Red)
    };
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}  {}  {} game(s)",
        palette.strong(&summary.username, Color::White),
        status,
        summary.games_count
    );

    for game in &summary.recent_games {
        let _ = writeln!(out, "  {}", format_game(game));
    }
    if summary.games_count > summary.recent_games.len() {
        let _ = writeln!(
            out,
            "  ... and {} more",
            summary.games_count - summary.recent_games.len()
        );
    }

    let _ = writeln!(out, "  Tactics: {}", format_tactics(&summary.tactics));
}

fn format_game(game: &Game) -> String {
    let white = game.white_username.as_deref().unwrap_or("?");
    let black = game.black_username.as_deref().unwrap_or("?");
    format!(
        "{}  {:<6} {:<7} {} vs {}  {}",
        game.end_time.format("%Y-%m-%d %H:%M"),
        game.time_class.as_str(),
        if game.rated { "rated" } else { "casual" },
        white,
        black,
        game.url
    )
}

fn format_tactics(tactics: &TacticsSnapshot) -> String {
    if tactics.is_empty() {
        return "n/a".into();
    }
    let show = |rating: Option<i64>| {
        rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "n/a".into())
    };
    format!(
        "current {} | highest {} | lowest {}",
        show(tactics.current_rating),
        show(tactics.highest_rating),
        show(tactics.lowest_rating)
    )
}
