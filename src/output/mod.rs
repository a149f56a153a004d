mod records;
mod writer;

use anyhow::Result;
use std::path::PathBuf;

use crate::adapters::GameMetadata;
use crate::config::OutputSettings;
use crate::domain::Side;
use crate::services::analysis::GameAnalysis;
use crate::stats::GameStats;

pub use records::{
    BoxScoreRecord, DiagnosticsRecord, EnhancedPlayRecord, GameInfoRecord, LineupRecord,
    PlayRecord, PlayerStatRecord, TeamStatRecord, TeamSummary,
};
pub use writer::OutputWriter;

const TOTALS_LABEL: &str = "TEAM TOTALS";

/// Write every output table of one analysis; returns the written paths
pub fn write_all(
    writer: &OutputWriter,
    files: &OutputSettings,
    analysis: &GameAnalysis,
) -> Result<Vec<PathBuf>> {
    let plays = &analysis.plays;
    let stats = &analysis.stats;

    let enhanced: Vec<_> = plays.iter().map(EnhancedPlayRecord::from_play).collect();
    let canonical: Vec<_> = plays.iter().map(PlayRecord::from_play).collect();
    let players: Vec<_> = stats.players.values().map(PlayerStatRecord::from_stat).collect();
    let teams: Vec<_> = stats.teams.values().map(TeamStatRecord::from_stat).collect();
    let lineups: Vec<_> = stats.lineups.values().map(LineupRecord::from_stat).collect();
    let box_score = box_score_rows(&analysis.metadata, stats);

    Ok(vec![
        writer.write_csv(files.enhanced_play_by_play, &enhanced)?,
        writer.write_csv(files.plays, &canonical)?,
        writer.write_csv(files.player_stats, &players)?,
        writer.write_csv(files.team_stats, &teams)?,
        writer.write_csv(files.lineups, &lineups)?,
        writer.write_csv(files.box_score, &box_score)?,
        writer.write_json(
            files.game_info,
            &GameInfoRecord::new(&analysis.metadata, plays),
        )?,
        writer.write_json(
            files.diagnostics,
            &DiagnosticsRecord::new(&analysis.diagnostics),
        )?,
    ])
}

/// Box score grouped by team, home first: starters in lineup order, then the
/// bench by player ID, then a totals line.
pub fn box_score_rows(metadata: &GameMetadata, stats: &GameStats) -> Vec<BoxScoreRecord> {
    let mut rows = Vec::new();
    for side in [Side::Home, Side::Away] {
        let team = metadata.team(side);
        let mut players: Vec<_> = stats.players_for_team(&team.id).collect();
        players.sort_by_key(|p| {
            let starter_rank = team
                .starters
                .iter()
                .position(|id| *id == p.player_id)
                .unwrap_or(usize::MAX);
            (starter_rank, p.player_id.clone())
        });

        for player in players {
            rows.push(BoxScoreRecord::new(
                &team.name,
                &player.name,
                Some(player.seconds_on_court),
                &player.counters,
            ));
        }
        if let Some(totals) = stats.teams.get(&team.id) {
            rows.push(BoxScoreRecord::new(&team.name, TOTALS_LABEL, None, &totals.counters));
        }
    }
    rows
}
