use log::debug;
use roxmltree::{Document, Node};

use super::raw::{resolve_sides, Dialect, GameMetadata, ParsedGame, RawEvent, SideHints, TeamCandidate};
use super::xml::{
    attr, attr_u32, attributes_map, descendants_named, enclosing_period, first_named, tag_is,
};
use super::fields::read_side;
use crate::domain::{RosterEntry, Warning};
use crate::errors::MalformedInputError;

/// Game clock at which Genius Sports lists the opening lineups as substitutions
const OPENING_CLOCK: &str = "20:00";

/// Genius Sports / StatCrew `bbgame` documents
pub struct GeniusSportsAdapter;

impl GeniusSportsAdapter {
    pub fn can_handle(doc: &Document) -> bool {
        let root = doc.root_element();
        tag_is(root, "bbgame")
            || attr(root, &["source"]).is_some_and(|s| s.eq_ignore_ascii_case("genius sports"))
            || root
                .tag_name()
                .namespace()
                .is_some_and(|ns| ns.to_ascii_lowercase().contains("geniussports"))
            || (first_named(root, "venue").is_some() && first_named(root, "plays").is_some())
    }

    pub fn parse(doc: &Document) -> Result<ParsedGame, MalformedInputError> {
        let root = doc.root_element();
        let play_nodes: Vec<Node> = descendants_named(root, "play").collect();
        if play_nodes.is_empty() && first_named(root, "plays").is_none() {
            return Err(MalformedInputError::NoEventContainer {
                dialect: Dialect::GeniusSports.as_str().to_string(),
            });
        }

        let mut warnings = Vec::new();
        let mut metadata = read_metadata(root, &mut warnings);

        let mut events = Vec::with_capacity(play_nodes.len());
        let mut opening_entries = Vec::new();
        for (index, node) in play_nodes.into_iter().enumerate() {
            let event = read_play(node, index);
            if is_opening_substitution(&event) {
                if event.substitution_in.is_some() {
                    opening_entries.push(event);
                }
                continue;
            }
            events.push(event);
        }

        if metadata.home.starters.is_empty() && metadata.away.starters.is_empty() {
            seed_starters(&mut metadata, &opening_entries);
        }
        let linked = link_assists(&mut events);
        debug!(
            "Genius Sports: {} plays, {} opening entries, {} assists linked",
            events.len(),
            opening_entries.len(),
            linked
        );

        Ok(ParsedGame {
            metadata,
            events,
            warnings,
        })
    }
}

pub fn player_id(team_id: &str, uni: &str) -> String {
    format!("{}_{}", team_id, uni)
}

// --- Metadata ---

fn read_metadata(root: Node, warnings: &mut Vec<Warning>) -> GameMetadata {
    let mut metadata = GameMetadata::new(Dialect::GeniusSports);

    let hints = match first_named(root, "venue") {
        Some(venue) => {
            metadata.extra = attributes_map(venue);
            metadata.game_id = attr(venue, &["gameid"]);
            metadata.set_date(attr(venue, &["date"]));
            metadata.venue = attr(venue, &["location"]);
            SideHints {
                home_id: attr(venue, &["homeid"]),
                home_name: attr(venue, &["homename"]),
                away_id: attr(venue, &["visid"]),
                away_name: attr(venue, &["visname"]),
            }
        }
        None => {
            warnings.push(Warning::missing_field(None, "venue"));
            SideHints::default()
        }
    };
    for key in ["source", "version", "generated"] {
        if let Some(value) = attr(root, &[key]) {
            metadata.extra.insert(key.to_string(), value);
        }
    }

    let team_nodes: Vec<Node> = descendants_named(root, "team").collect();
    let candidates = team_nodes
        .iter()
        .filter_map(|node| {
            Some(TeamCandidate {
                id: attr(*node, &["id"])?,
                name: attr(*node, &["name"]),
                code: attr(*node, &["code"]),
                record: attr(*node, &["record"]),
                side: read_side(*node),
            })
        })
        .collect();
    let (home, away) = resolve_sides(candidates, &hints, warnings);
    metadata.home = home;
    metadata.away = away;

    for team in team_nodes {
        let Some(team_id) = attr(team, &["id"]) else {
            continue;
        };
        for node in descendants_named(team, "player") {
            let Some(uni) = attr(node, &["uni"]) else {
                continue;
            };
            let entry = RosterEntry {
                id: player_id(&team_id, &uni),
                team_id: team_id.clone(),
                name: attr(node, &["name", "checkname"]).unwrap_or_default(),
                jersey: Some(uni),
                position: attr(node, &["pos"]),
                starter: attr(node, &["gs"]).as_deref() == Some("1"),
            };
            if entry.starter {
                metadata.add_starter(&entry.team_id, &entry.id);
            }
            metadata.roster.add(entry);
        }
    }

    metadata
}

// --- Plays ---

fn read_play(node: Node, index: usize) -> RawEvent {
    let mut event = RawEvent::new(index, node.tag_name().name());
    event.period = enclosing_period(node).or_else(|| attr_u32(node, &["period"]));
    event.clock = attr(node, &["time"]);
    event.team_id = attr(node, &["team"]);
    event.code = attr(node, &["action"]).map(|a| a.to_ascii_uppercase());
    event.qualifier = attr(node, &["type"]).map(|t| t.to_ascii_uppercase());
    event.home_score = attr_u32(node, &["hscore"]);
    event.away_score = attr_u32(node, &["vscore"]);

    let uni = attr(node, &["uni"]).filter(|u| !u.eq_ignore_ascii_case("TM"));
    let checkname = attr(node, &["checkname"]).filter(|n| !n.eq_ignore_ascii_case("TEAM"));
    if checkname.is_some() || uni.is_some() {
        event.player_id = match (&event.team_id, &uni) {
            (Some(team), Some(uni)) => Some(player_id(team, uni)),
            _ => None,
        };
        event.player_name = checkname;
    }

    if event.code.as_deref() == Some("SUB") {
        match event.qualifier.as_deref() {
            Some("IN") => event.substitution_in = event.player_id.clone(),
            Some("OUT") => event.substitution_out = event.player_id.clone(),
            _ => {}
        }
    }
    event
}

fn is_opening_substitution(event: &RawEvent) -> bool {
    event.code.as_deref() == Some("SUB")
        && event.period.unwrap_or(1) == 1
        && event.clock.as_deref() == Some(OPENING_CLOCK)
}

fn seed_starters(metadata: &mut GameMetadata, entries: &[RawEvent]) {
    for event in entries {
        if let (Some(team), Some(player)) = (&event.team_id, &event.substitution_in) {
            metadata.add_starter(team, player);
        }
    }
}

/// Attach each ASSIST record's player to the made field goal it belongs to.
///
/// The shot is the closest same-team made non-free-throw attempt at the same
/// period and clock, looking backward first. Returns the number of links made.
fn link_assists(events: &mut [RawEvent]) -> usize {
    let mut linked = 0;
    for i in 0..events.len() {
        if events[i].code.as_deref() != Some("ASSIST") {
            continue;
        }
        let Some(target) = find_assisted_shot(events, i) else {
            continue;
        };
        let (id, name) = (events[i].player_id.clone(), events[i].player_name.clone());
        let shot = &mut events[target];
        if shot.assist_player_id.is_none() && shot.assist_player_name.is_none() {
            shot.assist_player_id = id;
            shot.assist_player_name = name;
            linked += 1;
        }
    }
    linked
}

fn find_assisted_shot(events: &[RawEvent], assist: usize) -> Option<usize> {
    let anchor = &events[assist];
    let same_moment = |e: &RawEvent| e.period == anchor.period && e.clock == anchor.clock;
    let is_target = |e: &RawEvent| {
        e.team_id == anchor.team_id
            && e.code.as_deref().is_some_and(|c| c.contains("GOOD"))
            && !e.qualifier.as_deref().is_some_and(|q| q.contains("FT"))
    };

    (0..assist)
        .rev()
        .take_while(|&j| same_moment(&events[j]))
        .find(|&j| is_target(&events[j]))
        .or_else(|| {
            (assist + 1..events.len())
                .take_while(|&j| same_moment(&events[j]))
                .find(|&j| is_target(&events[j]))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::xml::parse_document;
    use crate::domain::Side;

    const GAME: &str = r#"<?xml version="1.0"?>
<bbgame source="Genius Sports" version="1.0">
  <venue gameid="G1" date="11/12/2024" location="Main Arena" homeid="HOM" visid="VIS" homename="Home U" visname="Visitors"/>
  <team vh="V" id="VIS" name="Visitors" code="VIS">
    <player uni="10" name="JOHNSON,MIKE" gs="1"/>
    <player uni="12" name="SMITH,JOHN" gs="1"/>
  </team>
  <team vh="H" id="HOM" name="Home U" code="HOM">
    <player uni="3" name="DOE,JANE" gs="1"/>
  </team>
  <plays>
    <period number="1">
      <play vh="V" time="20:00" uni="12" team="VIS" checkname="SMITH,JOHN" action="SUB" type="IN"/>
      <play vh="V" time="14:37" uni="12" team="VIS" checkname="SMITH,JOHN" action="GOOD" type="3PTR" vscore="3" hscore="0"/>
      <play vh="V" time="14:37" uni="10" team="VIS" checkname="JOHNSON,MIKE" action="ASSIST"/>
      <play vh="H" time="14:10" uni="TM" team="HOM" checkname="TEAM" action="TIMEOUT"/>
    </period>
    <period number="2">
      <play vh="H" time="19:40" uni="3" team="HOM" checkname="DOE,JANE" action="MISS" type="LAYUP"/>
    </period>
  </plays>
</bbgame>"#;

    #[test]
    fn test_detects_bbgame() {
        let doc = parse_document(GAME).unwrap();
        assert!(GeniusSportsAdapter::can_handle(&doc));

        let other = parse_document(r#"<game><plays/></game>"#).unwrap();
        assert!(!GeniusSportsAdapter::can_handle(&other));
    }

    #[test]
    fn test_parse_metadata_and_roster() {
        let doc = parse_document(GAME).unwrap();
        let parsed = GeniusSportsAdapter::parse(&doc).unwrap();
        let meta = &parsed.metadata;

        assert_eq!(meta.game_id.as_deref(), Some("G1"));
        assert_eq!(meta.home.id, "HOM");
        assert_eq!(meta.away.id, "VIS");
        assert_eq!(meta.side_of("VIS"), Some(Side::Away));
        assert_eq!(meta.away.starters, vec!["VIS_10", "VIS_12"]);
        assert_eq!(meta.roster.get("VIS_12").map(|p| p.name.as_str()), Some("SMITH,JOHN"));
        assert_eq!(meta.extra.get("source").map(String::as_str), Some("Genius Sports"));
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_opening_substitutions_are_dropped_and_periods_read() {
        let doc = parse_document(GAME).unwrap();
        let parsed = GeniusSportsAdapter::parse(&doc).unwrap();

        assert_eq!(parsed.events.len(), 4);
        assert_eq!(parsed.events[0].code.as_deref(), Some("GOOD"));
        assert_eq!(parsed.events[0].period, Some(1));
        assert_eq!(parsed.events[3].period, Some(2));
    }

    #[test]
    fn test_assist_is_linked_to_shot() {
        let doc = parse_document(GAME).unwrap();
        let parsed = GeniusSportsAdapter::parse(&doc).unwrap();
        let shot = &parsed.events[0];

        assert_eq!(shot.assist_player_id.as_deref(), Some("VIS_10"));
        assert_eq!(shot.assist_player_name.as_deref(), Some("JOHNSON,MIKE"));
    }

    #[test]
    fn test_team_records_have_no_player() {
        let doc = parse_document(GAME).unwrap();
        let parsed = GeniusSportsAdapter::parse(&doc).unwrap();
        let timeout = &parsed.events[2];

        assert_eq!(timeout.code.as_deref(), Some("TIMEOUT"));
        assert_eq!(timeout.player_id, None);
        assert_eq!(timeout.player_name, None);
    }

    #[test]
    fn test_opening_substitutions_seed_missing_starters() {
        let xml = r#"<bbgame>
  <venue homeid="H" visid="V"/>
  <team vh="H" id="H" name="Home"><player uni="1" name="A"/></team>
  <team vh="V" id="V" name="Away"><player uni="2" name="B"/></team>
  <plays><period number="1">
    <play time="20:00" uni="1" team="H" checkname="A" action="SUB" type="IN"/>
    <play time="20:00" uni="2" team="V" checkname="B" action="SUB" type="IN"/>
  </period></plays>
</bbgame>"#;
        let doc = parse_document(xml).unwrap();
        let parsed = GeniusSportsAdapter::parse(&doc).unwrap();

        assert!(parsed.events.is_empty());
        assert_eq!(parsed.metadata.home.starters, vec!["H_1"]);
        assert_eq!(parsed.metadata.away.starters, vec!["V_2"]);
    }

    #[test]
    fn test_missing_event_container_is_an_error() {
        let doc = parse_document(r#"<bbgame><venue gameid="X"/></bbgame>"#).unwrap();
        let err = GeniusSportsAdapter::parse(&doc).unwrap_err();
        assert!(matches!(err, MalformedInputError::NoEventContainer { .. }));
    }
}
