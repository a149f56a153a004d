//! Attribute-table extraction shared by the attribute-per-field dialects.
//!
//! NBA and generic documents both describe a play as one element with one
//! attribute per field; they only differ in the attribute names they use.

use roxmltree::Node;

use super::raw::{resolve_sides, Dialect, GameMetadata, RawEvent, SideHints, TeamCandidate};
use super::xml::{
    attr, attr_u32, attributes_map, descendants_named, enclosing_period, first_named, is_truthy,
    tag_is,
};
use crate::domain::{RosterEntry, Side, Warning};

type Names = &'static [&'static str];

pub struct PlayFields {
    pub period: Names,
    pub clock: Names,
    pub team: Names,
    pub player: Names,
    pub player_name: Names,
    pub code: Names,
    pub qualifier: Names,
    pub description: Names,
    pub points: Names,
    pub shot_type: Names,
    pub rebound_type: Names,
    pub assist_player: Names,
    pub assist_player_name: Names,
    pub foul_type: Names,
    pub foul_player: Names,
    pub substitution_in: Names,
    pub substitution_out: Names,
    pub home_score: Names,
    pub away_score: Names,
}

pub struct RosterFields {
    pub team_id: Names,
    pub team_name: Names,
    pub team_code: Names,
    pub team_record: Names,
    pub player_id: Names,
    pub player_team: Names,
    pub player_name: Names,
    pub jersey: Names,
    pub position: Names,
    pub starter: Names,
}

pub struct GameFields {
    pub game_id: Names,
    pub date: Names,
    pub venue: Names,
    pub home_id: Names,
    pub home_name: Names,
    pub away_id: Names,
    pub away_name: Names,
}

// --- Play Records ---

pub fn read_play(node: Node, index: usize, fields: &PlayFields) -> RawEvent {
    let mut event = RawEvent::new(index, node.tag_name().name());
    event.period = attr_u32(node, fields.period).or_else(|| enclosing_period(node));
    event.clock = attr(node, fields.clock);
    event.team_id = attr(node, fields.team);
    event.player_id = attr(node, fields.player);
    event.player_name = attr(node, fields.player_name);
    event.code = attr(node, fields.code);
    event.qualifier = attr(node, fields.qualifier);
    event.description = attr(node, fields.description).or_else(|| element_text(node));
    event.points = attr_u32(node, fields.points);
    event.shot_type = attr(node, fields.shot_type);
    event.rebound_type = attr(node, fields.rebound_type);
    event.assist_player_id = attr(node, fields.assist_player);
    event.assist_player_name = attr(node, fields.assist_player_name);
    event.foul_type = attr(node, fields.foul_type);
    event.foul_player_id = attr(node, fields.foul_player);
    event.substitution_in = attr(node, fields.substitution_in);
    event.substitution_out = attr(node, fields.substitution_out);
    event.home_score = attr_u32(node, fields.home_score);
    event.away_score = attr_u32(node, fields.away_score);
    read_child_elements(node, &mut event);
    event
}

fn element_text(node: Node) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn read_child_elements(node: Node, event: &mut RawEvent) {
    for child in node.children().filter(|c| c.is_element()) {
        if tag_is(child, "score") || tag_is(child, "scoring") {
            event.home_score = event.home_score.or_else(|| attr_u32(child, &["home"]));
            event.away_score = event.away_score.or_else(|| attr_u32(child, &["away", "visitor"]));
        } else if tag_is(child, "description") && event.description.is_none() {
            event.description = element_text(child);
        }
    }
}

// --- Teams and Players ---

pub fn read_team(node: Node, fields: &RosterFields) -> Option<TeamCandidate> {
    let id = attr(node, fields.team_id)?;
    Some(TeamCandidate {
        id,
        name: attr(node, fields.team_name),
        code: attr(node, fields.team_code),
        record: attr(node, fields.team_record),
        side: read_side(node),
    })
}

/// Side markers used across dialects: `vh="H|V"`, `side="home|away"`,
/// `home="true"`
pub fn read_side(node: Node) -> Option<Side> {
    if let Some(vh) = attr(node, &["vh"]) {
        match vh.to_ascii_uppercase().as_str() {
            "H" => return Some(Side::Home),
            "V" | "A" => return Some(Side::Away),
            _ => {}
        }
    }
    if let Some(side) = attr(node, &["side", "homeaway", "home_away"]) {
        match side.to_ascii_lowercase().as_str() {
            "home" | "h" => return Some(Side::Home),
            "away" | "visitor" | "visiting" | "v" | "a" => return Some(Side::Away),
            _ => {}
        }
    }
    attr(node, &["home", "is_home", "ishome"]).map(|flag| {
        if is_truthy(Some(&flag)) {
            Side::Home
        } else {
            Side::Away
        }
    })
}

pub fn read_player(node: Node, fields: &RosterFields) -> Option<RosterEntry> {
    let id = attr(node, fields.player_id)?;
    let team_id = attr(node, fields.player_team).or_else(|| parent_team_id(node, fields))?;
    Some(RosterEntry {
        id,
        team_id,
        name: attr(node, fields.player_name).unwrap_or_default(),
        jersey: attr(node, fields.jersey),
        position: attr(node, fields.position),
        starter: is_truthy(attr(node, fields.starter).as_deref()),
    })
}

fn parent_team_id(node: Node, fields: &RosterFields) -> Option<String> {
    node.ancestors()
        .skip(1)
        .find(|n| tag_is(*n, "team"))
        .and_then(|team| attr(team, fields.team_id))
}

// --- Game Information ---

pub fn read_side_hints(node: Node, fields: &GameFields) -> SideHints {
    SideHints {
        home_id: attr(node, fields.home_id),
        home_name: attr(node, fields.home_name),
        away_id: attr(node, fields.away_id),
        away_name: attr(node, fields.away_name),
    }
}

/// Metadata for documents that keep game, team and player data in plain
/// attributes
pub fn read_metadata(
    root: Node,
    dialect: Dialect,
    game_tags: &[&'static str],
    game: &GameFields,
    roster: &RosterFields,
    warnings: &mut Vec<Warning>,
) -> GameMetadata {
    let mut metadata = GameMetadata::new(dialect);

    let game_node = game_tags
        .iter()
        .find_map(|tag| if tag_is(root, tag) { Some(root) } else { first_named(root, tag) });
    let hints = match game_node {
        Some(node) => {
            metadata.extra = attributes_map(node);
            metadata.game_id = attr(node, game.game_id);
            metadata.set_date(attr(node, game.date));
            metadata.venue = attr(node, game.venue);
            read_side_hints(node, game)
        }
        None => {
            warnings.push(Warning::missing_field(None, "game information element"));
            SideHints::default()
        }
    };

    let candidates = descendants_named(root, "team")
        .filter_map(|node| read_team(node, roster))
        .collect();
    let (home, away) = resolve_sides(candidates, &hints, warnings);
    metadata.home = home;
    metadata.away = away;

    for entry in descendants_named(root, "player").filter_map(|node| read_player(node, roster)) {
        if entry.starter {
            metadata.add_starter(&entry.team_id, &entry.id);
        }
        metadata.roster.add(entry);
    }

    metadata
}
