use colored::Colorize;
use std::fmt::Write as _;

use crate::adapters::TeamInfo;
use crate::domain::{Roster, Side};
use crate::output::box_score_rows;
use crate::services::analysis::GameAnalysis;

const RULE_WIDTH: usize = 80;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", "=".repeat(50));
    let _ = writeln!(out, "{}", title.bold());
    let _ = writeln!(out, "{}", "=".repeat(50));
}

/// Console report of one analysis
pub fn render_summary(analysis: &GameAnalysis) -> String {
    let mut out = String::new();
    let metadata = &analysis.metadata;

    heading(&mut out, "PARSING RESULTS");
    let _ = writeln!(out, "\n{}", "Game Information:".bold());
    let _ = writeln!(out, "  format: {}", metadata.dialect.as_str());
    let fields = [
        ("game_id", metadata.game_id.as_deref()),
        ("date", metadata.date_text.as_deref()),
        ("venue", metadata.venue.as_deref()),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "  {}: {}", key, value);
        }
    }

    let _ = writeln!(out, "\n{}", "Teams:".bold());
    for side in [Side::Home, Side::Away] {
        let team = metadata.team(side);
        let _ = writeln!(
            out,
            "  {}: {} ({}) - {}",
            side.as_str(),
            team.name,
            team.code.as_deref().unwrap_or(&team.id),
            analysis.final_score(side)
        );
    }

    let _ = writeln!(out, "\n{}", "Starting Lineups:".bold());
    starters(&mut out, &metadata.home, "Home", &metadata.roster);
    starters(&mut out, &metadata.away, "Away", &metadata.roster);

    box_score(&mut out, analysis);
    diagnostics(&mut out, analysis);
    out
}

fn starters(out: &mut String, team: &TeamInfo, label: &str, roster: &Roster) {
    let _ = writeln!(out, "  {} ({}):", team.name, label);
    if team.starters.is_empty() {
        let _ = writeln!(out, "    (not listed)");
    }
    for id in &team.starters {
        match roster.get(id) {
            Some(player) => {
                let _ = writeln!(
                    out,
                    "    #{} {} - {}",
                    player.jersey.as_deref().unwrap_or("N/A"),
                    player.name,
                    player.position.as_deref().unwrap_or("N/A")
                );
            }
            None => {
                let _ = writeln!(out, "    {}", id);
            }
        }
    }
}

fn box_score(out: &mut String, analysis: &GameAnalysis) {
    heading(out, "BOX SCORE");
    let rows = box_score_rows(&analysis.metadata, &analysis.stats);
    let mut current_team: Option<&str> = None;

    for row in &rows {
        if current_team != Some(row.team.as_str()) {
            current_team = Some(row.team.as_str());
            let _ = writeln!(out, "\n{}", row.team.bold());
            let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
            let _ = writeln!(
                out,
                "{:<20} {:<5} {:<6} {:<6} {:<6} {:<4} {:<4} {:<4} {:<4} {:<4}",
                "Player", "Min", "FG", "3PT", "FT", "PTS", "REB", "AST", "STL", "TO"
            );
            let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        }
        let _ = writeln!(
            out,
            "{:<20} {:<5} {:<6} {:<6} {:<6} {:<4} {:<4} {:<4} {:<4} {:<4}",
            row.player, row.min, row.fg, row.three, row.ft, row.pts, row.reb, row.ast, row.stl, row.turnovers
        );
    }
}

fn diagnostics(out: &mut String, analysis: &GameAnalysis) {
    heading(out, "DIAGNOSTICS");
    if analysis.diagnostics.is_empty() {
        let _ = writeln!(out, "  {}", "No warnings".green());
        return;
    }
    let _ = writeln!(
        out,
        "  {} warnings",
        analysis.diagnostics.len().to_string().yellow()
    );
    for (kind, count) in analysis.diagnostics.counts_by_kind() {
        let _ = writeln!(out, "    {}: {}", kind, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameSettings;
    use crate::services::analysis::analyze;

    const GAME: &str = r#"<bbgame>
  <venue gameid="G9" date="01/05/2025" location="Field House" homeid="H" visid="V"/>
  <team vh="H" id="H" name="Hosts" code="HST"><player uni="4" name="SMITH,JOHN" pos="G" gs="1"/></team>
  <team vh="V" id="V" name="Guests"><player uni="8" name="DOE,JANE" gs="1"/></team>
  <plays><period number="1">
    <play time="19:00" uni="4" team="H" checkname="SMITH,JOHN" action="GOOD" type="LAYUP" hscore="2" vscore="0"/>
    <play time="18:30" uni="8" team="V" checkname="DOE,JANE" action="JUMP"/>
  </period></plays>
</bbgame>"#;

    #[test]
    fn test_summary_sections() {
        let analysis = analyze(GAME, &GameSettings::default()).unwrap();
        let text = render_summary(&analysis);

        assert!(text.contains("game_id: G9"));
        assert!(text.contains("home: Hosts (HST) - 2"));
        assert!(text.contains("#4 John Smith - G"));
        assert!(text.contains("TEAM TOTALS"));
        assert!(text.contains("unrecognized_event: 1"));
    }
}
