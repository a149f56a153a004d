//! Per-player, per-team and per-lineup counters from the enhanced play stream.

mod types;

use std::collections::BTreeSet;

pub use types::{percentage, Counters, GameStats, LineupStat, PlayerStat, TeamStat};

use crate::adapters::GameMetadata;
use crate::domain::{EventType, PlayerRef, ReboundType, ShotType, Side};
use crate::tracker::{EnhancedPlay, LineupState};

/// (period, clock, team, assisting player)
type AssistKey = (u32, String, String, String);

/// Single forward pass over the plays. Deterministic: the same plays always
/// give the same maps.
pub fn aggregate(plays: &[EnhancedPlay], metadata: &GameMetadata) -> GameStats {
    let mut aggregator = Aggregator::new(metadata);
    for (index, play) in plays.iter().enumerate() {
        aggregator.record_event(play);
        aggregator.record_on_court(play);
        if let Some(next) = plays.get(index + 1) {
            aggregator.record_elapsed(play, next);
        }
    }
    aggregator.stats
}

struct Aggregator<'a> {
    metadata: &'a GameMetadata,
    stats: GameStats,
    credited_assists: BTreeSet<AssistKey>,
}

impl<'a> Aggregator<'a> {
    fn new(metadata: &'a GameMetadata) -> Self {
        let mut stats = GameStats::default();
        for side in [Side::Home, Side::Away] {
            let team = metadata.team(side);
            stats
                .teams
                .insert(team.id.clone(), TeamStat::new(&team.id, &team.name, Some(side)));
        }
        Self {
            metadata,
            stats,
            credited_assists: BTreeSet::new(),
        }
    }

    // --- Entry Lookup ---

    fn team(&mut self, team_id: &str, name: Option<&str>) -> &mut TeamStat {
        self.stats
            .teams
            .entry(team_id.to_string())
            .or_insert_with(|| TeamStat::new(team_id, name.unwrap_or(team_id), None))
    }

    fn player(&mut self, player: &PlayerRef, team_id: &str) -> &mut PlayerStat {
        self.stats
            .players
            .entry(player.id.clone())
            .or_insert_with(|| PlayerStat::new(&player.id, &player.name, team_id))
    }

    fn team_id(&self, side: Side) -> &'a str {
        self.metadata.team(side).id.as_str()
    }

    // --- Box Score ---

    fn record_event(&mut self, play: &EnhancedPlay) {
        let event = &play.event;
        let Some(team_id) = event.team_id.clone() else {
            return;
        };
        let team_name = event.team_name.clone();

        match event.event_type {
            EventType::Shot => {
                let made = event.is_made_shot();
                let points = u32::from(event.points);
                let shot_type = event.shot_type;
                let count_shot = |c: &mut Counters| {
                    match shot_type {
                        ShotType::FreeThrow => {
                            c.fta += 1;
                            c.ftm += u32::from(made);
                        }
                        ShotType::TwoPoint | ShotType::ThreePoint | ShotType::None => {
                            c.fga += 1;
                            c.fgm += u32::from(made);
                            if shot_type == ShotType::ThreePoint {
                                c.three_pa += 1;
                                c.three_pm += u32::from(made);
                            }
                        }
                    }
                    c.points += points;
                };
                self.apply(play, &team_id, team_name.as_deref(), count_shot);
                if event.is_made_field_goal() {
                    if let Some(assister) = event.assist_player() {
                        self.credit_assist(play, assister, &team_id);
                    }
                    if let Some(side) = play.team_side {
                        self.team(&team_id, None).possessions += 1;
                        self.credit_points(play, side, points);
                    }
                } else if made {
                    if let Some(side) = play.team_side {
                        self.credit_points(play, side, points);
                    }
                }
            }
            EventType::Rebound => {
                let kind = event.rebound_type;
                self.apply(play, &team_id, team_name.as_deref(), |c| c.add_rebound(kind));
                if kind == ReboundType::Defensive {
                    if let Some(side) = play.team_side {
                        let offense = self.team_id(side.opponent());
                        self.team(offense, None).possessions += 1;
                    }
                }
            }
            EventType::Assist => {
                if let Some(assister) = &event.primary_player {
                    self.credit_assist(play, assister, &team_id);
                }
            }
            EventType::Steal => self.apply(play, &team_id, team_name.as_deref(), |c| c.steals += 1),
            EventType::Block => self.apply(play, &team_id, team_name.as_deref(), |c| c.blocks += 1),
            EventType::Turnover => {
                self.apply(play, &team_id, team_name.as_deref(), |c| c.turnovers += 1);
                self.team(&team_id, None).possessions += 1;
            }
            EventType::Foul => self.apply(play, &team_id, team_name.as_deref(), |c| c.fouls += 1),
            EventType::Timeout => self.team(&team_id, team_name.as_deref()).timeouts += 1,
            EventType::Substitution | EventType::Other => {}
        }
    }

    /// Apply the same counter change to the acting player and their team
    fn apply(
        &mut self,
        play: &EnhancedPlay,
        team_id: &str,
        team_name: Option<&str>,
        change: impl Fn(&mut Counters),
    ) {
        change(&mut self.team(team_id, team_name).counters);
        if let Some(player) = &play.event.primary_player {
            change(&mut self.player(player, team_id).counters);
        }
    }

    fn credit_assist(&mut self, play: &EnhancedPlay, assister: &PlayerRef, team_id: &str) {
        let key = (
            play.event.period,
            play.event.game_clock_text.clone(),
            team_id.to_string(),
            assister.id.clone(),
        );
        if self.credited_assists.insert(key) {
            self.player(assister, team_id).counters.assists += 1;
            self.team(team_id, None).counters.assists += 1;
        }
    }

    fn credit_points(&mut self, play: &EnhancedPlay, side: Side, points: u32) {
        if let Some(lineup) = self.lineup_stat(play.lineup(side), side) {
            lineup.points_for += points;
        }
        let other = side.opponent();
        if let Some(lineup) = self.lineup_stat(play.lineup(other), other) {
            lineup.points_against += points;
        }
    }

    // --- On-Court Credit ---

    fn lineup_stat(&mut self, lineup: &LineupState, side: Side) -> Option<&mut LineupStat> {
        if lineup.is_empty() {
            return None;
        }
        let key = lineup.key(self.team_id(side));
        let entry = self.stats.lineups.entry(key.clone()).or_insert_with(|| {
            let mut players: Vec<&PlayerRef> = lineup.players().iter().collect();
            players.sort_by(|a, b| a.id.cmp(&b.id));
            LineupStat {
                key,
                side,
                player_names: players.iter().map(|p| p.name.clone()).collect(),
                plays: 0,
                possessions: 0,
                points_for: 0,
                points_against: 0,
                seconds: 0,
            }
        });
        Some(entry)
    }

    fn record_on_court(&mut self, play: &EnhancedPlay) {
        let ends_possession = play.event.is_made_field_goal()
            || play.event.event_type == EventType::Turnover
            || (play.event.event_type == EventType::Rebound
                && play.event.rebound_type == ReboundType::Defensive);

        for side in [Side::Home, Side::Away] {
            let team_id = self.team_id(side);
            if let Some(lineup) = self.lineup_stat(play.lineup(side), side) {
                lineup.plays += 1;
                lineup.possessions += u32::from(ends_possession);
            }
            for player in play.lineup(side).players() {
                let stat = self.player(player, team_id);
                stat.plays_on_court += 1;
                stat.possessions += u32::from(ends_possession);
            }
        }
    }

    /// Clock run between two plays of the same period, credited to whoever
    /// was on court after the first one
    fn record_elapsed(&mut self, play: &EnhancedPlay, next: &EnhancedPlay) {
        if play.event.period != next.event.period {
            return;
        }
        let (Some(from), Some(to)) = (play.event.time_seconds, next.event.time_seconds) else {
            return;
        };
        let elapsed = from.saturating_sub(to);
        if elapsed == 0 {
            return;
        }

        for side in [Side::Home, Side::Away] {
            let team_id = self.team_id(side);
            if let Some(lineup) = self.lineup_stat(play.lineup(side), side) {
                lineup.seconds += elapsed;
            }
            for player in play.lineup(side).players() {
                self.player(player, team_id).seconds_on_court += elapsed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Dialect, TeamInfo};
    use crate::config::GameSettings;
    use crate::domain::{CanonicalEvent, SubstitutionKind};
    use crate::tracker::track;

    fn metadata() -> GameMetadata {
        let mut meta = GameMetadata::new(Dialect::Generic);
        meta.home = TeamInfo {
            id: "A".to_string(),
            name: "Team A".to_string(),
            starters: (1..=5).map(|n| format!("A_{}", n)).collect(),
            ..TeamInfo::unknown(Side::Home)
        };
        meta.away = TeamInfo {
            id: "B".to_string(),
            name: "Team B".to_string(),
            starters: (1..=5).map(|n| format!("B_{}", n)).collect(),
            ..TeamInfo::unknown(Side::Away)
        };
        meta
    }

    fn event(sequence: usize, event_type: EventType, team: &str, player: &str, clock: u32) -> CanonicalEvent {
        CanonicalEvent {
            sequence,
            event_type,
            period: 1,
            game_clock_text: crate::normalizer::format_clock(clock),
            time_seconds: Some(clock),
            team_id: Some(team.to_string()),
            team_name: None,
            primary_player: Some(PlayerRef::new(player, player)),
            secondary_player: None,
            shot_type: ShotType::None,
            rebound_type: ReboundType::None,
            points: 0,
            substitution: None,
            foul_type: None,
            raw_code: String::new(),
            description: String::new(),
            source_score: None,
        }
    }

    fn game() -> Vec<EnhancedPlay> {
        let assisted_three = CanonicalEvent {
            shot_type: ShotType::ThreePoint,
            points: 3,
            secondary_player: Some(PlayerRef::new("A_2", "A_2")),
            ..event(0, EventType::Shot, "A", "A_1", 1100)
        };
        let assist = event(1, EventType::Assist, "A", "A_2", 1100);
        let missed_two = CanonicalEvent {
            shot_type: ShotType::TwoPoint,
            ..event(2, EventType::Shot, "B", "B_1", 1080)
        };
        let rebound = CanonicalEvent {
            rebound_type: ReboundType::Defensive,
            ..event(3, EventType::Rebound, "A", "A_3", 1078)
        };
        let sub_out = CanonicalEvent {
            substitution: Some(SubstitutionKind::Exit),
            ..event(4, EventType::Substitution, "A", "A_1", 1070)
        };
        let sub_in = CanonicalEvent {
            substitution: Some(SubstitutionKind::Enter),
            ..event(5, EventType::Substitution, "A", "A_6", 1070)
        };
        let free_throw = CanonicalEvent {
            shot_type: ShotType::FreeThrow,
            points: 1,
            ..event(6, EventType::Shot, "B", "B_2", 1050)
        };
        let events = vec![assisted_three, assist, missed_two, rebound, sub_out, sub_in, free_throw];
        track(&metadata(), events, &GameSettings::default()).value
    }

    #[test]
    fn test_shooting_and_assists() {
        let stats = aggregate(&game(), &metadata());
        let shooter = &stats.players["A_1"].counters;
        let passer = &stats.players["A_2"].counters;

        assert_eq!(shooter.points, 3);
        assert_eq!((shooter.fgm, shooter.fga, shooter.three_pm, shooter.three_pa), (1, 1, 1, 1));
        assert_eq!(passer.assists, 1);
        assert_eq!(stats.teams["A"].counters.assists, 1);
        assert_eq!(stats.teams["B"].counters.ftm, 1);
        assert_eq!(stats.teams["A"].counters.defensive_rebounds, 1);
    }

    #[test]
    fn test_lineups_and_possessions() {
        let stats = aggregate(&game(), &metadata());
        let starters = &stats.lineups[&play_key("A", 1..=5)];
        let second_unit = &stats.lineups[&play_key("A", 2..=6)];

        assert_eq!(starters.points_for, 3);
        assert_eq!(starters.possessions, 2);
        assert_eq!(second_unit.points_against, 1);
        assert_eq!(second_unit.plus_minus(), -1);
        assert_eq!(stats.teams["A"].possessions, 1);
        assert_eq!(stats.teams["B"].possessions, 1);
    }

    #[test]
    fn test_seconds_on_court() {
        let stats = aggregate(&game(), &metadata());

        assert_eq!(stats.players["A_1"].seconds_on_court, 30);
        assert_eq!(stats.players["A_6"].seconds_on_court, 20);
        assert_eq!(stats.players["B_1"].seconds_on_court, 50);
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let plays = game();
        let meta = metadata();

        assert_eq!(aggregate(&plays, &meta), aggregate(&plays, &meta));
    }

    fn play_key(team: &str, range: std::ops::RangeInclusive<u32>) -> crate::tracker::LineupKey {
        let mut player_ids: Vec<String> = range.map(|n| format!("{}_{}", team, n)).collect();
        player_ids.sort();
        crate::tracker::LineupKey {
            team_id: team.to_string(),
            player_ids,
        }
    }
}
