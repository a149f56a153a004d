//! Sequential game state: score, period, clock and lineups.
//!
//! The tracker is the only stateful stage. It consumes canonical events in
//! document order, never rolls back, and never aborts; every inconsistency in
//! the source becomes a warning next to the play it was found on.

mod lineup;
mod play;
mod state;

use log::debug;
use std::collections::BTreeSet;

pub use lineup::{LineupKey, LineupState};
pub use play::EnhancedPlay;
pub use state::{half_label, GameState, GameStateSnapshot};

use crate::adapters::GameMetadata;
use crate::config::GameSettings;
use crate::domain::{CanonicalEvent, EventType, Outcome, PlayerRef, Side, SubstitutionKind, Warning};

/// Adjacent substitutions at one period and clock
#[derive(Debug, Clone, PartialEq)]
struct SubstitutionBatch {
    period: u32,
    clock: String,
    sides: BTreeSet<Side>,
}

impl SubstitutionBatch {
    fn continues_with(&self, event: &CanonicalEvent) -> bool {
        event.event_type == EventType::Substitution
            && event.period == self.period
            && event.game_clock_text == self.clock
    }
}

pub struct GameStateTracker {
    settings: GameSettings,
    home_id: String,
    away_id: String,
    state: GameState,
    next_play_id: usize,
    last_sequence: usize,
    batch: Option<SubstitutionBatch>,
    /// Found at construction, reported with the first outcome
    pending: Vec<Warning>,
}

impl GameStateTracker {
    pub fn new(metadata: &GameMetadata, settings: &GameSettings) -> Self {
        let mut pending = Vec::new();
        let home = starting_lineup(metadata, Side::Home, settings, &mut pending);
        let away = starting_lineup(metadata, Side::Away, settings, &mut pending);

        Self {
            settings: settings.clone(),
            home_id: metadata.home.id.clone(),
            away_id: metadata.away.id.clone(),
            state: GameState::new(home, away, settings),
            next_play_id: 1,
            last_sequence: 0,
            batch: None,
            pending,
        }
    }

    pub fn apply(&mut self, event: CanonicalEvent) -> Outcome<EnhancedPlay> {
        let mut warnings = std::mem::take(&mut self.pending);
        let side = event.team_id.as_deref().and_then(|id| self.side_of(id));
        self.last_sequence = event.sequence;

        if !self.batch.as_ref().is_some_and(|b| b.continues_with(&event)) {
            self.close_batch(event.sequence, &mut warnings);
        }
        self.advance_clock(&event, &mut warnings);

        match event.event_type {
            EventType::Shot => {
                if event.is_made_shot() {
                    self.score(&event, side, &mut warnings);
                    self.check_source_score(&event, &mut warnings);
                }
            }
            EventType::Substitution => self.substitute(&event, side, &mut warnings),
            EventType::Rebound
            | EventType::Assist
            | EventType::Steal
            | EventType::Block
            | EventType::Turnover
            | EventType::Foul
            | EventType::Timeout
            | EventType::Other => {}
        }
        if event.event_type != EventType::Substitution {
            self.fill_lineup(&event, side);
        }

        let play = EnhancedPlay {
            play_id: self.next_play_id,
            event,
            team_side: side,
            state: self.state.snapshot(),
        };
        self.next_play_id += 1;
        Outcome::with_warnings(play, warnings)
    }

    /// Close any open substitution batch and hand back the final state
    pub fn finish(mut self) -> Outcome<GameStateSnapshot> {
        let mut warnings = std::mem::take(&mut self.pending);
        self.close_batch(self.last_sequence, &mut warnings);
        Outcome::with_warnings(self.state.snapshot(), warnings)
    }

    fn side_of(&self, team_id: &str) -> Option<Side> {
        if team_id.is_empty() {
            None
        } else if team_id == self.home_id {
            Some(Side::Home)
        } else if team_id == self.away_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    fn team_id(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_id,
            Side::Away => &self.away_id,
        }
    }

    // --- Transitions ---

    fn score(&mut self, event: &CanonicalEvent, side: Option<Side>, warnings: &mut Vec<Warning>) {
        match side {
            Some(side) => self.state.add_points(side, u32::from(event.points)),
            None => warnings.push(Warning::missing_field(
                Some(event.sequence),
                format!(
                    "scoring side for team '{}' ({} points not counted)",
                    event.team_id.as_deref().unwrap_or(""),
                    event.points
                ),
            )),
        }
    }

    /// The tracked score stays authoritative; a feed that disagrees is reported
    fn check_source_score(&self, event: &CanonicalEvent, warnings: &mut Vec<Warning>) {
        let Some((home, away)) = event.source_score else {
            return;
        };
        let tracked = (self.state.home_score, self.state.away_score);
        if tracked != (home, away) {
            warnings.push(Warning::score_mismatch(
                event.sequence,
                format!(
                    "feed shows {}-{} (home-away), tracked {}-{}",
                    home, away, tracked.0, tracked.1
                ),
            ));
        }
    }

    fn advance_clock(&mut self, event: &CanonicalEvent, warnings: &mut Vec<Warning>) {
        if event.period < self.state.period {
            warnings.push(Warning::out_of_order(
                event.sequence,
                format!("period {} after period {}", event.period, self.state.period),
            ));
            return;
        }
        if event.period > self.state.period {
            self.state.period = event.period;
            self.state.half = half_label(event.period, &self.settings);
            self.state.last_clock = None;
        }

        if let Some(seconds) = event.time_seconds {
            if let Some(last) = self.state.last_clock {
                if seconds > last {
                    warnings.push(Warning::out_of_order(
                        event.sequence,
                        format!(
                            "clock {} after {} in period {}",
                            event.game_clock_text,
                            crate::normalizer::format_clock(last),
                            event.period
                        ),
                    ));
                }
            }
            self.state.last_clock = Some(seconds);
        }
    }

    /// Apply one half (or both halves) of a substitution. Lineup size is only
    /// checked once the batch closes.
    fn substitute(&mut self, event: &CanonicalEvent, side: Option<Side>, warnings: &mut Vec<Warning>) {
        let Some(side) = side else {
            warnings.push(Warning::missing_field(Some(event.sequence), "substitution team"));
            return;
        };
        let Some(player) = event.primary_player.clone() else {
            warnings.push(Warning::missing_field(Some(event.sequence), "substituted player"));
            return;
        };

        let batch = self.batch.get_or_insert_with(|| SubstitutionBatch {
            period: event.period,
            clock: event.game_clock_text.clone(),
            sides: BTreeSet::new(),
        });
        batch.sides.insert(side);

        let team_id = self.team_id(side).to_string();
        let sequence = event.sequence;
        let lineup = self.state.lineup_mut(side);
        match event.substitution.unwrap_or(SubstitutionKind::Enter) {
            SubstitutionKind::Swap => {
                if let Some(outgoing) = &event.secondary_player {
                    if !lineup.remove(&outgoing.id) {
                        warnings.push(Warning::lineup(
                            sequence,
                            &team_id,
                            format!("{} left the game without being on court", outgoing.name),
                        ));
                    }
                }
                enter(lineup, player, sequence, &team_id, warnings);
            }
            SubstitutionKind::Enter => enter(lineup, player, sequence, &team_id, warnings),
            SubstitutionKind::Exit => {
                if !lineup.remove(&player.id) {
                    warnings.push(Warning::lineup(
                        sequence,
                        &team_id,
                        format!("{} left the game without being on court", player.name),
                    ));
                }
            }
        }
    }

    /// Size checks for every lineup the open batch touched
    fn close_batch(&mut self, sequence: usize, warnings: &mut Vec<Warning>) {
        let Some(batch) = self.batch.take() else {
            return;
        };
        let size = self.settings.lineup_size;
        for side in batch.sides {
            let team_id = self.team_id(side).to_string();
            let lineup = self.state.lineup_mut(side);
            if lineup.len() > size {
                let dropped = lineup.trim_to(size);
                let names: Vec<&str> = dropped.iter().map(|p| p.name.as_str()).collect();
                warnings.push(Warning::lineup(
                    sequence,
                    &team_id,
                    format!("{} players after substitutions, removed {}", size + dropped.len(), names.join(", ")),
                ));
            } else if lineup.len() < size {
                warnings.push(Warning::lineup(
                    sequence,
                    &team_id,
                    format!("only {} players after substitutions", lineup.len()),
                ));
            }
        }
    }

    /// Put an acting player on court when the team is short-handed
    fn fill_lineup(&mut self, event: &CanonicalEvent, side: Option<Side>) {
        let (Some(side), Some(player)) = (side, &event.primary_player) else {
            return;
        };
        let size = self.settings.lineup_size;
        let lineup = self.state.lineup_mut(side);
        if lineup.len() < size && !lineup.contains(&player.id) {
            debug!("Adding {} to the {} lineup at event {}", player.name, side.as_str(), event.sequence);
            lineup.insert(player.clone());
        }
    }
}

fn enter(
    lineup: &mut LineupState,
    player: PlayerRef,
    sequence: usize,
    team_id: &str,
    warnings: &mut Vec<Warning>,
) {
    let name = player.name.clone();
    if !lineup.insert(player) {
        warnings.push(Warning::lineup(
            sequence,
            team_id,
            format!("{} entered the game while already on court", name),
        ));
    }
}

fn starting_lineup(
    metadata: &GameMetadata,
    side: Side,
    settings: &GameSettings,
    warnings: &mut Vec<Warning>,
) -> LineupState {
    let team = metadata.team(side);
    if team.starters.is_empty() {
        warnings.push(Warning::missing_field(
            None,
            format!("starting lineup for {}", team.name),
        ));
        return LineupState::new();
    }

    let lineup = LineupState::from_players(team.starters.iter().map(|id| {
        let name = metadata
            .roster
            .get(id)
            .map(|p| p.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| id.clone());
        PlayerRef::new(id.clone(), name)
    }));
    if lineup.len() != settings.lineup_size {
        warnings.push(Warning::lineup(
            0,
            &team.id,
            format!("starting lineup has {} players", lineup.len()),
        ));
    }
    lineup
}

/// Run a whole game through a fresh tracker
pub fn track(
    metadata: &GameMetadata,
    events: Vec<CanonicalEvent>,
    settings: &GameSettings,
) -> Outcome<Vec<EnhancedPlay>> {
    let mut tracker = GameStateTracker::new(metadata, settings);
    let mut warnings = Vec::new();
    let mut plays = Vec::with_capacity(events.len());

    for event in events {
        let outcome = tracker.apply(event);
        warnings.extend(outcome.warnings);
        plays.push(outcome.value);
    }
    warnings.extend(tracker.finish().warnings);

    Outcome::with_warnings(plays, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Dialect, TeamInfo};
    use crate::domain::{ReboundType, RosterEntry, ShotType};

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
        meta.roster.add(RosterEntry {
            id: "A_1".to_string(),
            team_id: "A".to_string(),
            name: "John Smith".to_string(),
            jersey: None,
            position: None,
            starter: true,
        });
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

    fn made_three(sequence: usize, team: &str, player: &str, clock: u32) -> CanonicalEvent {
        CanonicalEvent {
            shot_type: ShotType::ThreePoint,
            points: 3,
            ..event(sequence, EventType::Shot, team, player, clock)
        }
    }

    fn sub(sequence: usize, kind: SubstitutionKind, team: &str, player: &str, clock: u32) -> CanonicalEvent {
        CanonicalEvent {
            substitution: Some(kind),
            ..event(sequence, EventType::Substitution, team, player, clock)
        }
    }

    #[test]
    fn test_made_three_scores_for_team_side() {
        let mut tracker = GameStateTracker::new(&metadata(), &GameSettings::default());

        let play = tracker.apply(made_three(0, "B", "B_1", 323)).value;

        assert_eq!(play.play_id, 1);
        assert_eq!(play.state.away_score, 3);
        assert_eq!(play.state.home_score, 0);
        assert_eq!(play.state.half, "1st Half");
        assert_eq!(play.team_side, Some(Side::Away));
    }

    #[test]
    fn test_substitution_pair_keeps_five() {
        let settings = GameSettings::default();
        let events = vec![
            sub(0, SubstitutionKind::Exit, "A", "A_1", 600),
            sub(1, SubstitutionKind::Enter, "A", "A_9", 600),
            event(2, EventType::Rebound, "B", "B_2", 590),
        ];

        let outcome = track(&metadata(), events, &settings);
        let last = outcome.value.last().unwrap();
        let home = &last.state.home_lineup;

        assert!(outcome.warnings.is_empty());
        assert_eq!(home.len(), 5);
        assert!(home.contains("A_9"));
        assert!(!home.contains("A_1"));
    }

    #[test]
    fn test_swap_replaces_outgoing_player() {
        let mut tracker = GameStateTracker::new(&metadata(), &GameSettings::default());
        let mut swap = sub(0, SubstitutionKind::Swap, "A", "A_9", 600);
        swap.secondary_player = Some(PlayerRef::new("A_1", "John Smith"));

        let outcome = tracker.apply(swap);

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.value.state.home_lineup.len(), 5);
        assert!(outcome.value.state.home_lineup.contains("A_9"));
    }

    #[test]
    fn test_swap_with_outgoing_player_off_court() {
        let mut tracker = GameStateTracker::new(&metadata(), &GameSettings::default());
        let mut swap = sub(0, SubstitutionKind::Swap, "A", "A_9", 600);
        swap.secondary_player = Some(PlayerRef::new("A_7", "Bench Player"));

        let outcome = tracker.apply(swap);
        let home = &outcome.value.state.home_lineup;

        assert!(home.contains("A_9"));
        assert!(!home.contains("A_7"));
        assert_eq!(home.len(), 6);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(
            &outcome.warnings[0],
            Warning::LineupInconsistency { sequence: 0, team_id, detail }
                if team_id == "A" && detail.contains("Bench Player")
        ));
    }

    #[test]
    fn test_feed_score_is_checked_after_made_shots() {
        let mut tracker = GameStateTracker::new(&metadata(), &GameSettings::default());
        let agreeing = CanonicalEvent {
            source_score: Some((3, 0)),
            ..made_three(0, "A", "A_1", 600)
        };
        let disagreeing = CanonicalEvent {
            source_score: Some((3, 2)),
            ..made_three(1, "B", "B_1", 590)
        };

        assert!(tracker.apply(agreeing).warnings.is_empty());
        let outcome = tracker.apply(disagreeing);

        assert_eq!(outcome.value.state.away_score, 3);
        assert_eq!(
            outcome.warnings,
            vec![Warning::score_mismatch(1, "feed shows 3-2 (home-away), tracked 3-3")]
        );
        assert_eq!(outcome.warnings[0].kind(), "score_mismatch");
    }

    #[test]
    fn test_unbalanced_batch_is_trimmed() {
        let events = vec![
            sub(0, SubstitutionKind::Enter, "A", "A_9", 600),
            sub(1, SubstitutionKind::Exit, "A", "A_7", 600),
            event(2, EventType::Foul, "A", "A_9", 590),
        ];

        let outcome = track(&metadata(), events, &GameSettings::default());
        let plays = outcome.value;

        assert_eq!(plays[0].state.home_lineup.len(), 6);
        assert_eq!(plays[2].state.home_lineup.len(), 5);
        assert!(!plays[2].state.home_lineup.contains("A_1"));
        let kinds: Vec<&str> = outcome.warnings.iter().map(Warning::kind).collect();
        assert_eq!(kinds, vec!["lineup_inconsistency", "lineup_inconsistency"]);
    }

    #[test]
    fn test_missing_starters_are_filled_from_play() {
        let mut meta = metadata();
        meta.home.starters.clear();
        let mut tracker = GameStateTracker::new(&meta, &GameSettings::default());

        let outcome = tracker.apply(event(0, EventType::Steal, "A", "A_3", 1100));

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].kind(), "missing_field");
        assert_eq!(outcome.value.state.home_lineup.names(), vec!["A_3"]);
    }

    #[test]
    fn test_scores_never_decrease_and_ids_increase() {
        let events = vec![
            made_three(0, "A", "A_1", 700),
            event(1, EventType::Other, "A", "A_1", 690),
            made_three(2, "B", "B_1", 680),
            made_three(3, "X", "X_1", 670),
        ];

        let outcome = track(&metadata(), events, &GameSettings::default());
        let plays = outcome.value;

        for pair in plays.windows(2) {
            assert_eq!(pair[1].play_id, pair[0].play_id + 1);
            assert!(pair[1].state.home_score >= pair[0].state.home_score);
            assert!(pair[1].state.away_score >= pair[0].state.away_score);
        }
        assert_eq!(plays[3].state.home_score, 3);
        assert_eq!(plays[3].state.away_score, 3);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_out_of_order_clock_and_period() {
        let mut late = event(1, EventType::Rebound, "A", "A_1", 500);
        late.period = 3;
        let mut early = event(2, EventType::Rebound, "A", "A_1", 400);
        early.period = 2;
        let mut resumed = event(3, EventType::Rebound, "A", "A_1", 450);
        resumed.period = 3;
        let events = vec![event(0, EventType::Rebound, "A", "A_1", 100), late, early, resumed];

        let outcome = track(&metadata(), events, &GameSettings::default());
        let plays = outcome.value;

        assert_eq!(plays[1].state.half, "2nd Half");
        assert_eq!(plays[2].state.period, 3);
        let kinds: Vec<&str> = outcome.warnings.iter().map(Warning::kind).collect();
        assert_eq!(kinds, vec!["out_of_order"]);
    }
}
