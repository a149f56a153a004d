use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::adapters::{GameMetadata, TeamInfo};
use crate::domain::{Diagnostics, PlayerRef, Side, Warning};
use crate::normalizer::format_clock;
use crate::stats::{Counters, LineupStat, PlayerStat, TeamStat};
use crate::tracker::EnhancedPlay;

// --- Play Tables ---

/// One row of `enhanced_play_by_play.csv`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancedPlayRecord {
    pub play_id: usize,
    pub half: String,
    pub period: u32,
    pub game_clock: String,
    pub event_description: String,
    pub team: String,
    pub player: String,
    pub points: u8,
    pub home_score: u32,
    pub away_score: u32,
    pub home_lineup: String,
    pub away_lineup: String,
    pub event_type: String,
    pub shot_type: String,
    pub assist_player: String,
    pub rebound_type: String,
    pub foul_type: String,
    pub foul_player: String,
    pub time_seconds: Option<u32>,
}

impl EnhancedPlayRecord {
    pub fn from_play(play: &EnhancedPlay) -> Self {
        let event = &play.event;
        Self {
            play_id: play.play_id,
            half: play.state.half.clone(),
            period: play.state.period,
            game_clock: event.game_clock_text.clone(),
            event_description: event.description.clone(),
            team: event
                .team_name
                .clone()
                .or_else(|| event.team_id.clone())
                .unwrap_or_default(),
            player: event.player_name().unwrap_or_default().to_string(),
            points: event.points,
            home_score: play.state.home_score,
            away_score: play.state.away_score,
            home_lineup: play.lineup_text(Side::Home),
            away_lineup: play.lineup_text(Side::Away),
            event_type: event.event_type.as_str().to_string(),
            shot_type: event.shot_type.as_str().to_string(),
            assist_player: name_of(event.assist_player()),
            rebound_type: event.rebound_type.as_str().to_string(),
            foul_type: event.foul_type.clone().unwrap_or_default(),
            foul_player: name_of(event.fouled_player()),
            time_seconds: event.time_seconds,
        }
    }
}

fn name_of(player: Option<&PlayerRef>) -> String {
    player.map(|p| p.name.clone()).unwrap_or_default()
}

/// One row of `plays.csv`: the canonical event without game state
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayRecord {
    pub play_id: usize,
    pub sequence: usize,
    pub period: u32,
    pub game_clock: String,
    pub time_seconds: Option<u32>,
    pub event_type: String,
    pub substitution: String,
    pub team_id: String,
    pub player_id: String,
    pub player: String,
    pub secondary_player_id: String,
    pub secondary_player: String,
    pub points: u8,
    pub raw_code: String,
    pub description: String,
}

impl PlayRecord {
    pub fn from_play(play: &EnhancedPlay) -> Self {
        let event = &play.event;
        let primary = event.primary_player.as_ref();
        let secondary = event.secondary_player.as_ref();
        Self {
            play_id: play.play_id,
            sequence: event.sequence,
            period: event.period,
            game_clock: event.game_clock_text.clone(),
            time_seconds: event.time_seconds,
            event_type: event.event_type.as_str().to_string(),
            substitution: event
                .substitution
                .map(|kind| format!("{:?}", kind).to_lowercase())
                .unwrap_or_default(),
            team_id: event.team_id.clone().unwrap_or_default(),
            player_id: primary.map(|p| p.id.clone()).unwrap_or_default(),
            player: name_of(primary),
            secondary_player_id: secondary.map(|p| p.id.clone()).unwrap_or_default(),
            secondary_player: name_of(secondary),
            points: event.points,
            raw_code: event.raw_code.clone(),
            description: event.description.clone(),
        }
    }
}

// --- Stat Tables ---

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerStatRecord {
    pub player_id: String,
    pub player: String,
    pub team_id: String,
    pub minutes: String,
    pub points: u32,
    pub fgm: u32,
    pub fga: u32,
    pub fg_pct: f64,
    pub three_pm: u32,
    pub three_pa: u32,
    pub three_pct: f64,
    pub ftm: u32,
    pub fta: u32,
    pub ft_pct: f64,
    pub rebounds: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub plays_on_court: u32,
    pub possessions: u32,
}

impl PlayerStatRecord {
    pub fn from_stat(stat: &PlayerStat) -> Self {
        let c = &stat.counters;
        Self {
            player_id: stat.player_id.clone(),
            player: stat.name.clone(),
            team_id: stat.team_id.clone(),
            minutes: format_clock(stat.seconds_on_court),
            points: c.points,
            fgm: c.fgm,
            fga: c.fga,
            fg_pct: one_decimal(c.fg_pct()),
            three_pm: c.three_pm,
            three_pa: c.three_pa,
            three_pct: one_decimal(c.three_pct()),
            ftm: c.ftm,
            fta: c.fta,
            ft_pct: one_decimal(c.ft_pct()),
            rebounds: c.rebounds,
            offensive_rebounds: c.offensive_rebounds,
            defensive_rebounds: c.defensive_rebounds,
            assists: c.assists,
            steals: c.steals,
            blocks: c.blocks,
            turnovers: c.turnovers,
            fouls: c.fouls,
            plays_on_court: stat.plays_on_court,
            possessions: stat.possessions,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamStatRecord {
    pub team_id: String,
    pub team: String,
    pub side: String,
    pub points: u32,
    pub fgm: u32,
    pub fga: u32,
    pub fg_pct: f64,
    pub three_pm: u32,
    pub three_pa: u32,
    pub three_pct: f64,
    pub ftm: u32,
    pub fta: u32,
    pub ft_pct: f64,
    pub rebounds: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub timeouts: u32,
    pub possessions: u32,
}

impl TeamStatRecord {
    pub fn from_stat(stat: &TeamStat) -> Self {
        let c = &stat.counters;
        Self {
            team_id: stat.team_id.clone(),
            team: stat.name.clone(),
            side: stat.side.map(|s| s.as_str().to_string()).unwrap_or_default(),
            points: c.points,
            fgm: c.fgm,
            fga: c.fga,
            fg_pct: one_decimal(c.fg_pct()),
            three_pm: c.three_pm,
            three_pa: c.three_pa,
            three_pct: one_decimal(c.three_pct()),
            ftm: c.ftm,
            fta: c.fta,
            ft_pct: one_decimal(c.ft_pct()),
            rebounds: c.rebounds,
            offensive_rebounds: c.offensive_rebounds,
            defensive_rebounds: c.defensive_rebounds,
            assists: c.assists,
            steals: c.steals,
            blocks: c.blocks,
            turnovers: c.turnovers,
            fouls: c.fouls,
            timeouts: stat.timeouts,
            possessions: stat.possessions,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LineupRecord {
    pub team_id: String,
    pub side: String,
    pub players: String,
    pub player_ids: String,
    pub minutes: String,
    pub plays: u32,
    pub possessions: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub plus_minus: i64,
}

impl LineupRecord {
    pub fn from_stat(stat: &LineupStat) -> Self {
        Self {
            team_id: stat.key.team_id.clone(),
            side: stat.side.as_str().to_string(),
            players: stat.player_names.join(", "),
            player_ids: stat.key.player_ids.join(" "),
            minutes: format_clock(stat.seconds),
            plays: stat.plays,
            possessions: stat.possessions,
            points_for: stat.points_for,
            points_against: stat.points_against,
            plus_minus: stat.plus_minus(),
        }
    }
}

/// Traditional box-score line; made-attempted pairs as "M-A"
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoxScoreRecord {
    pub team: String,
    pub player: String,
    pub min: String,
    pub pts: u32,
    pub fg: String,
    #[serde(rename = "3pt")]
    pub three: String,
    pub ft: String,
    pub reb: u32,
    pub oreb: u32,
    pub dreb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    #[serde(rename = "to")]
    pub turnovers: u32,
    pub pf: u32,
}

impl BoxScoreRecord {
    pub fn new(team: &str, player: &str, seconds: Option<u32>, c: &Counters) -> Self {
        Self {
            team: team.to_string(),
            player: player.to_string(),
            min: seconds.map(format_clock).unwrap_or_default(),
            pts: c.points,
            fg: format!("{}-{}", c.fgm, c.fga),
            three: format!("{}-{}", c.three_pm, c.three_pa),
            ft: format!("{}-{}", c.ftm, c.fta),
            reb: c.rebounds,
            oreb: c.offensive_rebounds,
            dreb: c.defensive_rebounds,
            ast: c.assists,
            stl: c.steals,
            blk: c.blocks,
            turnovers: c.turnovers,
            pf: c.fouls,
        }
    }
}

// --- JSON Documents ---

#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
    pub record: Option<String>,
    pub final_score: u32,
    pub starters: Vec<String>,
}

/// Contents of `game_info.json`
#[derive(Debug, Clone, Serialize)]
pub struct GameInfoRecord {
    pub dialect: String,
    pub game_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub date_text: Option<String>,
    pub venue: Option<String>,
    pub periods: u32,
    pub total_plays: usize,
    pub home: TeamSummary,
    pub away: TeamSummary,
    pub extra: BTreeMap<String, String>,
}

impl GameInfoRecord {
    pub fn new(metadata: &GameMetadata, plays: &[EnhancedPlay]) -> Self {
        let last = plays.last().map(|p| &p.state);
        let summary = |team: &TeamInfo, score: u32| TeamSummary {
            id: team.id.clone(),
            name: team.name.clone(),
            code: team.code.clone(),
            record: team.record.clone(),
            final_score: score,
            starters: team
                .starters
                .iter()
                .map(|id| {
                    metadata
                        .roster
                        .get(id)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| id.clone())
                })
                .collect(),
        };
        Self {
            dialect: metadata.dialect.as_str().to_string(),
            game_id: metadata.game_id.clone(),
            date: metadata.date,
            date_text: metadata.date_text.clone(),
            venue: metadata.venue.clone(),
            periods: last.map(|s| s.period).unwrap_or(0),
            total_plays: plays.len(),
            home: summary(&metadata.home, last.map(|s| s.home_score).unwrap_or(0)),
            away: summary(&metadata.away, last.map(|s| s.away_score).unwrap_or(0)),
            extra: metadata.extra.clone(),
        }
    }
}

/// Contents of `diagnostics.json`
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsRecord<'a> {
    pub total: usize,
    pub counts: BTreeMap<String, usize>,
    pub warnings: &'a [Warning],
}

impl<'a> DiagnosticsRecord<'a> {
    pub fn new(diagnostics: &'a Diagnostics) -> Self {
        Self {
            total: diagnostics.len(),
            counts: diagnostics.counts_by_kind(),
            warnings: diagnostics.warnings(),
        }
    }
}
