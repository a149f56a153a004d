//! Raw records to canonical events.
//!
//! Everything dialect-specific ends here: after normalization an event only
//! speaks the crate's own vocabulary (`EventType`, `ShotType`, formatted
//! names, clock seconds).

pub mod classify;
mod clock;
mod description;
mod names;

use anyhow::Result;

pub use clock::{format_clock, ClockParser};
pub use description::describe;
pub use names::NameFormatter;

use crate::adapters::{GameMetadata, ParsedGame, RawEvent};
use crate::domain::{
    CanonicalEvent, EventType, Outcome, PlayerRef, ReboundType, ShotType, SubstitutionKind, Warning,
};
use classify::{classify, parse_rebound_type, parse_shot_type, Classification};

pub struct EventNormalizer {
    names: NameFormatter,
    clock: ClockParser,
}

impl EventNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            names: NameFormatter::new()?,
            clock: ClockParser::new()?,
        })
    }

    /// Rewrite roster names into display form so lineups built from the
    /// roster read the same as event players
    pub fn format_roster(&self, metadata: &mut GameMetadata) {
        for entry in metadata.roster.iter_mut() {
            entry.name = self.names.format(&entry.name);
        }
    }

    pub fn normalize_all(&self, parsed: &ParsedGame) -> Outcome<Vec<CanonicalEvent>> {
        let mut warnings = Vec::new();
        let events = parsed
            .events
            .iter()
            .map(|raw| {
                let outcome = self.normalize(raw, &parsed.metadata);
                warnings.extend(outcome.warnings);
                outcome.value
            })
            .collect();
        Outcome::with_warnings(events, warnings)
    }

    pub fn normalize(&self, raw: &RawEvent, metadata: &GameMetadata) -> Outcome<CanonicalEvent> {
        let sequence = raw.index;
        let mut warnings = Vec::new();

        let classification = classify(metadata.dialect, raw).unwrap_or_else(|| {
            let code = raw.code.clone().unwrap_or_else(|| "<missing>".to_string());
            warnings.push(Warning::unrecognized_event(sequence, code));
            Classification::unrecognized()
        });
        let event_type = classification.event_type;

        let period = raw.period.unwrap_or_else(|| {
            warnings.push(Warning::missing_field(Some(sequence), "period"));
            1
        });
        let game_clock_text = match &raw.clock {
            Some(text) => text.clone(),
            None => {
                warnings.push(Warning::missing_field(Some(sequence), "game clock"));
                String::new()
            }
        };
        let time_seconds = self.clock.seconds(&game_clock_text);

        let (primary_player, secondary_player, substitution) = match event_type {
            EventType::Substitution => {
                self.substitution_players(raw, metadata, classification.substitution, &mut warnings)
            }
            EventType::Shot => (
                self.event_player(raw, metadata),
                self.resolve_player(
                    metadata,
                    raw.assist_player_id.as_deref(),
                    raw.assist_player_name.as_deref(),
                ),
                None,
            ),
            EventType::Foul => (
                self.event_player(raw, metadata),
                self.resolve_player(metadata, raw.foul_player_id.as_deref(), None),
                None,
            ),
            _ => (self.event_player(raw, metadata), None, None),
        };

        let team_id = raw.team_id.clone().or_else(|| {
            primary_player
                .as_ref()
                .and_then(|p| metadata.roster.team_of(&p.id))
                .map(str::to_string)
        });
        let team_name = team_id
            .as_deref()
            .and_then(|id| metadata.team_name(id))
            .map(str::to_string);

        let (shot_type, points) = match event_type {
            EventType::Shot => shot_result(raw, &classification),
            _ => (ShotType::None, 0),
        };
        let rebound_type = match event_type {
            EventType::Rebound => classification
                .rebound_type
                .or_else(|| raw.rebound_type.as_deref().and_then(parse_rebound_type))
                .unwrap_or(ReboundType::None),
            _ => ReboundType::None,
        };
        let foul_type = match event_type {
            EventType::Foul => raw.foul_type.clone().or_else(|| raw.qualifier.clone()),
            _ => None,
        };

        let mut event = CanonicalEvent {
            sequence,
            event_type,
            period,
            game_clock_text,
            time_seconds,
            team_id,
            team_name,
            primary_player,
            secondary_player,
            shot_type,
            rebound_type,
            points,
            substitution,
            foul_type,
            raw_code: raw_code(raw),
            description: String::new(),
            source_score: raw.home_score.zip(raw.away_score),
        };
        event.description = describe(&event, raw.description.as_deref());

        Outcome::with_warnings(event, warnings)
    }

    // --- Player Resolution ---

    fn event_player(&self, raw: &RawEvent, metadata: &GameMetadata) -> Option<PlayerRef> {
        self.resolve_player(metadata, raw.player_id.as_deref(), raw.player_name.as_deref())
    }

    /// Name from the record, else the roster; players known only by a
    /// `{team}_{uni}` ID are shown by jersey number
    fn resolve_player(
        &self,
        metadata: &GameMetadata,
        id: Option<&str>,
        name: Option<&str>,
    ) -> Option<PlayerRef> {
        let entry = id.and_then(|id| metadata.roster.get(id));
        let source_name = name
            .or_else(|| entry.map(|e| e.name.as_str()))
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let id = id.or(source_name)?.to_string();

        let display = match source_name {
            Some(name) => self.names.format(name),
            None => entry
                .and_then(|e| e.jersey.clone())
                .or_else(|| id.rsplit_once('_').map(|(_, uni)| uni.to_string()))
                .map(|uni| format!("Player #{}", uni))
                .unwrap_or_else(|| self.names.format(&id)),
        };
        Some(PlayerRef::new(id, display))
    }

    /// Substitution players and direction.
    ///
    /// A record naming both players is a swap with the incoming player first.
    fn substitution_players(
        &self,
        raw: &RawEvent,
        metadata: &GameMetadata,
        hint: Option<SubstitutionKind>,
        warnings: &mut Vec<Warning>,
    ) -> (Option<PlayerRef>, Option<PlayerRef>, Option<SubstitutionKind>) {
        let side_player = |id: Option<&str>| {
            id.and_then(|id| {
                let name = raw
                    .player_name
                    .as_deref()
                    .filter(|_| raw.player_id.as_deref() == Some(id));
                self.resolve_player(metadata, Some(id), name)
            })
        };
        let incoming = side_player(raw.substitution_in.as_deref());
        let outgoing = side_player(raw.substitution_out.as_deref());

        match (incoming, outgoing) {
            (Some(incoming), Some(outgoing)) => {
                (Some(incoming), Some(outgoing), Some(SubstitutionKind::Swap))
            }
            (Some(incoming), None) => (Some(incoming), None, Some(SubstitutionKind::Enter)),
            (None, Some(outgoing)) => (Some(outgoing), None, Some(SubstitutionKind::Exit)),
            (None, None) => {
                let kind = hint
                    .filter(|kind| *kind != SubstitutionKind::Swap)
                    .unwrap_or_else(|| {
                        warnings.push(Warning::missing_field(
                            Some(raw.index),
                            "substitution direction",
                        ));
                        SubstitutionKind::Enter
                    });
                (self.event_player(raw, metadata), None, Some(kind))
            }
        }
    }
}

// --- Shot Semantics ---

/// Shot type and points scored. Made/missed comes from the code when it
/// says so, otherwise from positive source points.
fn shot_result(raw: &RawEvent, classification: &Classification) -> (ShotType, u8) {
    let source_points = raw.points.unwrap_or(0);
    let made = classification.made.unwrap_or(source_points > 0);
    let shot_type = classification
        .shot_type
        .or_else(|| raw.shot_type.as_deref().and_then(parse_shot_type))
        .unwrap_or(match source_points {
            3 => ShotType::ThreePoint,
            1 => ShotType::FreeThrow,
            _ => ShotType::TwoPoint,
        });

    let points = match (made, source_points) {
        (false, _) => 0,
        (true, p @ 1..=3) => p as u8,
        (true, _) => shot_type.value(),
    };
    (shot_type, points)
}

fn raw_code(raw: &RawEvent) -> String {
    match (&raw.code, &raw.qualifier) {
        (Some(code), Some(qualifier)) => format!("{} {}", code, qualifier),
        (Some(code), None) => code.clone(),
        (None, _) => String::new(),
    }
}
