use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{ReboundType, Side};
use crate::tracker::LineupKey;

/// Box-score counters shared by players and teams
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub points: u32,
    pub fgm: u32,
    pub fga: u32,
    pub three_pm: u32,
    pub three_pa: u32,
    pub ftm: u32,
    pub fta: u32,
    pub rebounds: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
}

impl Counters {
    pub fn add_rebound(&mut self, kind: ReboundType) {
        self.rebounds += 1;
        match kind {
            ReboundType::Offensive => self.offensive_rebounds += 1,
            ReboundType::Defensive => self.defensive_rebounds += 1,
            ReboundType::None => {}
        }
    }

    pub fn fg_pct(&self) -> f64 {
        percentage(self.fgm, self.fga)
    }

    pub fn three_pct(&self) -> f64 {
        percentage(self.three_pm, self.three_pa)
    }

    pub fn ft_pct(&self) -> f64 {
        percentage(self.ftm, self.fta)
    }
}

pub fn percentage(made: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        0.0
    } else {
        f64::from(made) / f64::from(attempted) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStat {
    pub player_id: String,
    pub name: String,
    pub team_id: String,
    pub counters: Counters,
    pub plays_on_court: u32,
    pub possessions: u32,
    pub seconds_on_court: u32,
}

impl PlayerStat {
    pub fn new(player_id: &str, name: &str, team_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            name: name.to_string(),
            team_id: team_id.to_string(),
            counters: Counters::default(),
            plays_on_court: 0,
            possessions: 0,
            seconds_on_court: 0,
        }
    }

    pub fn minutes(&self) -> f64 {
        f64::from(self.seconds_on_court) / 60.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStat {
    pub team_id: String,
    pub name: String,
    pub side: Option<Side>,
    pub counters: Counters,
    pub timeouts: u32,
    /// Possessions this team ended on offense
    pub possessions: u32,
}

impl TeamStat {
    pub fn new(team_id: &str, name: &str, side: Option<Side>) -> Self {
        Self {
            team_id: team_id.to_string(),
            name: name.to_string(),
            side,
            counters: Counters::default(),
            timeouts: 0,
            possessions: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupStat {
    pub key: LineupKey,
    pub side: Side,
    /// Display names in the same order as `key.player_ids`
    pub player_names: Vec<String>,
    pub plays: u32,
    pub possessions: u32,
    pub points_for: u32,
    pub points_against: u32,
    pub seconds: u32,
}

impl LineupStat {
    pub fn plus_minus(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }
}

/// Everything the aggregator produces for one game
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameStats {
    pub players: BTreeMap<String, PlayerStat>,
    pub teams: BTreeMap<String, TeamStat>,
    pub lineups: BTreeMap<LineupKey, LineupStat>,
}

impl GameStats {
    pub fn players_for_team<'a>(&'a self, team_id: &'a str) -> impl Iterator<Item = &'a PlayerStat> + 'a {
        self.players.values().filter(move |p| p.team_id == team_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentages() {
        let counters = Counters {
            fgm: 3,
            fga: 8,
            ftm: 0,
            fta: 0,
            ..Default::default()
        };
        assert_eq!(counters.fg_pct(), 37.5);
        assert_eq!(counters.ft_pct(), 0.0);
    }

    #[test]
    fn test_rebound_split() {
        let mut counters = Counters::default();
        counters.add_rebound(ReboundType::Offensive);
        counters.add_rebound(ReboundType::None);

        assert_eq!(counters.rebounds, 2);
        assert_eq!(counters.offensive_rebounds, 1);
        assert_eq!(counters.defensive_rebounds, 0);
    }
}
