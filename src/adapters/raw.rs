use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{Roster, Side, Warning};

/// Supported XML schema variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    GeniusSports,
    Nba,
    Generic,
}

impl Dialect {
    pub fn as_str(&self) -> &str {
        match self {
            Dialect::GeniusSports => "genius_sports",
            Dialect::Nba => "nba_pbp",
            Dialect::Generic => "generic",
        }
    }
}

/// One play record as found in the source document.
///
/// Field names are already dialect-neutral, but the values (event codes,
/// qualifiers, player IDs) keep the source's vocabulary; the normalizer owns
/// their interpretation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEvent {
    pub index: usize,
    pub tag: String,
    pub period: Option<u32>,
    pub clock: Option<String>,
    pub team_id: Option<String>,
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    pub code: Option<String>,
    pub qualifier: Option<String>,
    pub points: Option<u32>,
    pub shot_type: Option<String>,
    pub rebound_type: Option<String>,
    pub assist_player_id: Option<String>,
    pub assist_player_name: Option<String>,
    pub foul_type: Option<String>,
    pub foul_player_id: Option<String>,
    pub substitution_in: Option<String>,
    pub substitution_out: Option<String>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub description: Option<String>,
}

impl RawEvent {
    pub fn new(index: usize, tag: &str) -> Self {
        Self {
            index,
            tag: tag.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
    pub side: Side,
    pub record: Option<String>,
    /// Starting five, as player IDs in document order
    pub starters: Vec<String>,
}

impl TeamInfo {
    pub fn unknown(side: Side) -> Self {
        let name = match side {
            Side::Home => "Home Team",
            Side::Away => "Away Team",
        };
        Self {
            id: String::new(),
            name: name.to_string(),
            code: None,
            side,
            record: None,
            starters: Vec::new(),
        }
    }
}

/// Game-level information shared by every event of the document
#[derive(Debug, Clone, Serialize)]
pub struct GameMetadata {
    pub dialect: Dialect,
    pub game_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub date_text: Option<String>,
    pub venue: Option<String>,
    pub home: TeamInfo,
    pub away: TeamInfo,
    pub roster: Roster,
    pub extra: BTreeMap<String, String>,
}

impl GameMetadata {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            game_id: None,
            date: None,
            date_text: None,
            venue: None,
            home: TeamInfo::unknown(Side::Home),
            away: TeamInfo::unknown(Side::Away),
            roster: Roster::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn team(&self, side: Side) -> &TeamInfo {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn side_of(&self, team_id: &str) -> Option<Side> {
        if team_id.is_empty() {
            None
        } else if self.home.id == team_id {
            Some(Side::Home)
        } else if self.away.id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn team_name(&self, team_id: &str) -> Option<&str> {
        self.side_of(team_id).map(|side| self.team(side).name.as_str())
    }

    /// Record a starter for the team with `team_id`; unknown teams are ignored
    pub fn add_starter(&mut self, team_id: &str, player_id: &str) -> bool {
        let team = match self.side_of(team_id) {
            Some(Side::Home) => &mut self.home,
            Some(Side::Away) => &mut self.away,
            None => return false,
        };
        if team.starters.iter().any(|id| id == player_id) {
            return false;
        }
        team.starters.push(player_id.to_string());
        true
    }

    pub fn set_date(&mut self, text: Option<String>) {
        self.date = text.as_deref().and_then(super::xml::parse_game_date);
        self.date_text = text;
    }
}

/// Everything an adapter extracts from one document
#[derive(Debug, Clone)]
pub struct ParsedGame {
    pub metadata: GameMetadata,
    pub events: Vec<RawEvent>,
    pub warnings: Vec<Warning>,
}

/// A team element before home/away sides are settled
#[derive(Debug, Clone)]
pub struct TeamCandidate {
    pub id: String,
    pub name: Option<String>,
    pub code: Option<String>,
    pub record: Option<String>,
    pub side: Option<Side>,
}

/// Home/away hints from game-level attributes
#[derive(Debug, Clone, Default)]
pub struct SideHints {
    pub home_id: Option<String>,
    pub home_name: Option<String>,
    pub away_id: Option<String>,
    pub away_name: Option<String>,
}

/// Settle which team is home and which is away.
///
/// Explicit side markers win, then game-level IDs; teams still unassigned
/// fill the open slots in document order (home first) with a warning.
pub fn resolve_sides(
    candidates: Vec<TeamCandidate>,
    hints: &SideHints,
    warnings: &mut Vec<Warning>,
) -> (TeamInfo, TeamInfo) {
    let mut candidates = dedupe_candidates(candidates);
    for candidate in candidates.iter_mut().filter(|c| c.side.is_none()) {
        if hints.home_id.as_deref() == Some(candidate.id.as_str()) {
            candidate.side = Some(Side::Home);
        } else if hints.away_id.as_deref() == Some(candidate.id.as_str()) {
            candidate.side = Some(Side::Away);
        }
    }

    let mut home = take_side(&mut candidates, Side::Home);
    let mut away = take_side(&mut candidates, Side::Away);

    for side in [Side::Home, Side::Away] {
        let slot = match side {
            Side::Home => &mut home,
            Side::Away => &mut away,
        };
        if slot.is_some() {
            continue;
        }
        if let Some(pos) = candidates.iter().position(|c| c.side.is_none()) {
            let candidate = candidates.remove(pos);
            warnings.push(Warning::missing_field(
                None,
                format!("side of team {} (assumed {})", candidate.id, side.as_str()),
            ));
            *slot = Some(into_team_info(candidate, side));
        }
    }

    let home = home.unwrap_or_else(|| team_from_hints(Side::Home, hints, warnings));
    let away = away.unwrap_or_else(|| team_from_hints(Side::Away, hints, warnings));
    (home, away)
}

fn dedupe_candidates(candidates: Vec<TeamCandidate>) -> Vec<TeamCandidate> {
    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.id.clone()))
        .collect()
}

fn take_side(candidates: &mut Vec<TeamCandidate>, side: Side) -> Option<TeamInfo> {
    let pos = candidates.iter().position(|c| c.side == Some(side))?;
    Some(into_team_info(candidates.remove(pos), side))
}

fn into_team_info(candidate: TeamCandidate, side: Side) -> TeamInfo {
    let name = candidate.name.unwrap_or_else(|| candidate.id.clone());
    TeamInfo {
        id: candidate.id,
        name,
        code: candidate.code,
        side,
        record: candidate.record,
        starters: Vec::new(),
    }
}

fn team_from_hints(side: Side, hints: &SideHints, warnings: &mut Vec<Warning>) -> TeamInfo {
    let (id, name) = match side {
        Side::Home => (&hints.home_id, &hints.home_name),
        Side::Away => (&hints.away_id, &hints.away_name),
    };
    let mut team = TeamInfo::unknown(side);
    match (id, name) {
        (None, None) => {
            warnings.push(Warning::missing_field(None, format!("{} team", side.as_str())));
        }
        _ => {
            team.id = id.clone().unwrap_or_default();
            team.name = name.clone().or_else(|| id.clone()).unwrap_or(team.name);
        }
    }
    team
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, side: Option<Side>) -> TeamCandidate {
        TeamCandidate {
            id: id.to_string(),
            name: Some(format!("Team {}", id)),
            code: None,
            record: None,
            side,
        }
    }

    #[test]
    fn test_explicit_sides_win() {
        let mut warnings = Vec::new();
        let (home, away) = resolve_sides(
            vec![candidate("A", Some(Side::Away)), candidate("B", Some(Side::Home))],
            &SideHints::default(),
            &mut warnings,
        );

        assert_eq!(home.id, "B");
        assert_eq!(away.id, "A");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_hints_then_document_order() {
        let mut warnings = Vec::new();
        let hints = SideHints {
            away_id: Some("A".to_string()),
            ..Default::default()
        };
        let (home, away) = resolve_sides(
            vec![candidate("A", None), candidate("B", None)],
            &hints,
            &mut warnings,
        );

        assert_eq!(away.id, "A");
        assert_eq!(home.id, "B");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_teams_fall_back_to_placeholders() {
        let mut warnings = Vec::new();
        let (home, away) = resolve_sides(Vec::new(), &SideHints::default(), &mut warnings);

        assert_eq!(home.name, "Home Team");
        assert_eq!(away.name, "Away Team");
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_side_of_ignores_empty_ids() {
        let metadata = GameMetadata::new(Dialect::Generic);
        assert_eq!(metadata.side_of(""), None);
    }
}
