mod play_table;
mod summary;

use anyhow::{bail, Result};
use log::{info, warn};
use std::fs;

use crate::config::AppConfig;
use crate::output::{EnhancedPlayRecord, OutputWriter};
use crate::services::analysis::GameAnalysis;

pub use play_table::{clean_lineup, render_compact, render_full, viewable_plays, TeamLabels};
pub use summary::render_summary;

pub fn print_summary(analysis: &GameAnalysis) {
    print!("{}", render_summary(analysis));
}

/// Print the play-by-play table from a previous run's output directory
pub fn show_play_table(config: &AppConfig, compact: bool) -> Result<()> {
    let files = &config.output;
    let writer = OutputWriter::new(files.dir);
    let path = writer.path(files.enhanced_play_by_play);
    if !path.exists() {
        bail!(
            "File '{}' not found; run the analyze command first",
            path.display()
        );
    }

    let rows: Vec<EnhancedPlayRecord> = writer.read_csv(files.enhanced_play_by_play)?;
    if rows.is_empty() {
        println!("No play-by-play data found.");
        return Ok(());
    }

    let total = rows.len();
    let plays = viewable_plays(rows, config.game.lineup_size);
    let labels = team_labels(&writer, files.game_info);
    info!("Showing {} of {} plays", plays.len(), total);

    let text = if compact {
        render_compact(&plays, total, &labels)
    } else {
        render_full(&plays, total, &labels)
    };
    print!("{}", text);
    Ok(())
}

fn team_labels(writer: &OutputWriter, game_info: &str) -> TeamLabels {
    let path = writer.path(game_info);
    let parsed = fs::read_to_string(&path)
        .ok()
        .and_then(|json| serde_json::from_str::<serde_json::Value>(&json).ok());
    let Some(info) = parsed else {
        warn!("No readable {}; using generic team labels", path.display());
        return TeamLabels::default();
    };

    let name = |side: &str| info[side]["name"].as_str().map(str::to_string);
    let fallback = TeamLabels::default();
    TeamLabels {
        home: name("home").unwrap_or(fallback.home),
        away: name("away").unwrap_or(fallback.away),
    }
}
