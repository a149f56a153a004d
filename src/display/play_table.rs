use colored::Colorize;
use std::fmt::Write as _;

use crate::output::EnhancedPlayRecord;

const FULL_WIDTH: usize = 120;
const COMPACT_WIDTH: usize = 140;
const COMPACT_LINEUP_CHARS: usize = 50;

/// Team names shown next to the lineups
#[derive(Debug, Clone)]
pub struct TeamLabels {
    pub home: String,
    pub away: String,
}

impl Default for TeamLabels {
    fn default() -> Self {
        Self {
            home: "Home".to_string(),
            away: "Away".to_string(),
        }
    }
}

/// Keep the first `size` distinct names of a comma-separated lineup
pub fn clean_lineup(text: &str, size: usize) -> String {
    let mut names: Vec<&str> = Vec::with_capacity(size);
    for name in text.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if names.len() == size {
            break;
        }
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names.join(", ")
}

/// Drop substitutions and clean both lineups of every remaining play
pub fn viewable_plays(rows: Vec<EnhancedPlayRecord>, lineup_size: usize) -> Vec<EnhancedPlayRecord> {
    rows.into_iter()
        .filter(|row| row.event_type != "substitution")
        .map(|mut row| {
            row.home_lineup = clean_lineup(&row.home_lineup, lineup_size);
            row.away_lineup = clean_lineup(&row.away_lineup, lineup_size);
            row
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn banner(out: &mut String, title: &str, width: usize, shown: usize, total: usize) {
    let rule = "=".repeat(width);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", title.bold());
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Total Plays: {} (filtered from {} total plays)", shown, total);
    let _ = writeln!(out, "{}", rule);
}

fn footer(out: &mut String, width: usize, shown: usize) {
    let _ = writeln!(
        out,
        "\nEnd of Play-by-Play Data ({} plays, substitutions excluded)",
        shown
    );
    let _ = writeln!(out, "{}", "=".repeat(width));
}

/// One block per play with lineups and extra details
pub fn render_full(plays: &[EnhancedPlayRecord], total: usize, labels: &TeamLabels) -> String {
    let mut out = String::new();
    let rule = "-".repeat(FULL_WIDTH);
    banner(
        &mut out,
        "ENHANCED PLAY-BY-PLAY TABLE (EXCLUDING SUBSTITUTIONS)",
        FULL_WIDTH,
        plays.len(),
        total,
    );

    for (index, play) in plays.iter().enumerate() {
        let _ = writeln!(out, "\nPlay #{:3} | {}", index + 1, play.game_clock.cyan());
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Event: {}", play.event_description);
        let _ = writeln!(out, "Team: {} | Player: {}", play.team, play.player);
        if play.points > 0 {
            let _ = writeln!(out, "Points: {}", play.points);
        }
        let _ = writeln!(out, "Score: {} - {}", play.away_score, play.home_score);
        let _ = writeln!(out, "\n{} (Home): {}", labels.home, play.home_lineup);
        let _ = writeln!(out, "{} (Away): {}", labels.away, play.away_lineup);

        let details = details(play);
        if !details.is_empty() {
            let _ = writeln!(out, "Additional Details: {}", details.join(" | "));
        }
        let _ = writeln!(out, "{}", rule);
    }

    footer(&mut out, FULL_WIDTH, plays.len());
    out
}

fn details(play: &EnhancedPlayRecord) -> Vec<String> {
    let mut details = Vec::new();
    if !play.assist_player.is_empty() {
        details.push(format!("Assist: {}", play.assist_player));
    }
    if !play.rebound_type.is_empty() && play.rebound_type != "none" {
        details.push(format!("Rebound Type: {}", play.rebound_type));
    }
    if !play.foul_type.is_empty() {
        details.push(format!("Foul Type: {}", play.foul_type));
    }
    if !play.foul_player.is_empty() {
        details.push(format!("Foul Player: {}", play.foul_player));
    }
    details
}

/// One line per play; lineups only for the first ten plays and every 50th
pub fn render_compact(plays: &[EnhancedPlayRecord], total: usize, labels: &TeamLabels) -> String {
    let mut out = String::new();
    banner(
        &mut out,
        "COMPACT PLAY-BY-PLAY TABLE (EXCLUDING SUBSTITUTIONS)",
        COMPACT_WIDTH,
        plays.len(),
        total,
    );

    for (index, play) in plays.iter().enumerate() {
        let score = format!("({}-{})", play.away_score, play.home_score);
        let _ = writeln!(
            out,
            "{:3} | {:25} | {:10} | {:12} | {:20} | {}",
            index + 1,
            play.game_clock,
            score,
            play.team,
            play.player,
            play.event_description
        );
        if index < 10 || index % 50 == 0 {
            let _ = writeln!(
                out,
                "     | {}: {}",
                labels.home,
                truncate(&play.home_lineup, COMPACT_LINEUP_CHARS)
            );
            let _ = writeln!(
                out,
                "     | {}: {}",
                labels.away,
                truncate(&play.away_lineup, COMPACT_LINEUP_CHARS)
            );
            let _ = writeln!(out, "{}", "-".repeat(COMPACT_WIDTH));
        }
    }

    footer(&mut out, COMPACT_WIDTH, plays.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(play_id: usize, event_type: &str, home_lineup: &str) -> EnhancedPlayRecord {
        EnhancedPlayRecord {
            play_id,
            half: "1st Half".to_string(),
            period: 1,
            game_clock: "10:00".to_string(),
            event_description: format!("play {}", play_id),
            team: "Team A".to_string(),
            player: "John Smith".to_string(),
            points: 0,
            home_score: 0,
            away_score: 0,
            home_lineup: home_lineup.to_string(),
            away_lineup: String::new(),
            event_type: event_type.to_string(),
            shot_type: "none".to_string(),
            assist_player: String::new(),
            rebound_type: "none".to_string(),
            foul_type: String::new(),
            foul_player: String::new(),
            time_seconds: Some(600),
        }
    }

    #[test]
    fn test_clean_lineup_dedupes_and_caps() {
        let text = "A, B, A, C, D, E, F";
        assert_eq!(clean_lineup(text, 5), "A, B, C, D, E");
        assert_eq!(clean_lineup(" , A,, B ", 5), "A, B");
    }

    #[test]
    fn test_substitutions_are_excluded() {
        let rows = vec![
            record(1, "shot", "A, B"),
            record(2, "substitution", "A, B, C"),
            record(3, "rebound", "A, A, B, C, D, E, F"),
        ];

        let plays = viewable_plays(rows, 5);
        assert_eq!(plays.len(), 2);
        assert_eq!(plays[1].play_id, 3);
        assert_eq!(plays[1].home_lineup, "A, B, C, D, E");
    }

    #[test]
    fn test_full_table_shows_details() {
        let mut play = record(1, "shot", "A, B, C, D, E");
        play.points = 3;
        play.assist_player = "Mike Johnson".to_string();
        let labels = TeamLabels {
            home: "Team A".to_string(),
            away: "Team B".to_string(),
        };

        let text = render_full(&[play], 2, &labels);
        assert!(text.contains("Total Plays: 1 (filtered from 2 total plays)"));
        assert!(text.contains("Points: 3"));
        assert!(text.contains("Team A (Home): A, B, C, D, E"));
        assert!(text.contains("Additional Details: Assist: Mike Johnson"));
    }

    #[test]
    fn test_compact_table_truncates_lineups() {
        let long = "Alexander Longname, Bartholomew Longname, Christopher Longname";
        let play = record(1, "shot", long);

        let text = render_compact(&[play], 1, &TeamLabels::default());
        assert!(text.contains("  1 | 10:00"));
        assert!(text.contains("     | Home: Alexander Longname, Bartholomew Longname, Christop..."));
    }
}
