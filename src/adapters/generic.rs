use log::debug;
use roxmltree::Document;

use super::fields::{read_metadata, read_play, GameFields, PlayFields, RosterFields};
use super::raw::{Dialect, ParsedGame};
use super::xml::{descendants_any, first_named};
use crate::errors::MalformedInputError;

/// Event element names, in order of preference
const EVENT_TAGS: &[&str] = &["play", "event", "action"];
const CONTAINER_TAGS: &[&str] = &["plays", "events", "actions", "playbyplay"];
const GAME_TAGS: &[&str] = &["game", "match"];

const PLAY: PlayFields = PlayFields {
    period: &["period", "quarter", "qtr"],
    clock: &["time", "clock", "game_clock", "gameclock"],
    team: &["team_id", "team", "teamid"],
    player: &["player_id", "player", "playerid"],
    player_name: &["player_name", "playername", "name"],
    code: &["event_type", "type", "action", "eventtype"],
    qualifier: &["subtype", "action_type", "qualifier"],
    description: &["description", "desc", "text"],
    points: &["points", "pts"],
    shot_type: &["shot_type", "shottype"],
    rebound_type: &["rebound_type", "reboundtype"],
    assist_player: &["assist_player_id", "assist_id", "assist"],
    assist_player_name: &["assist_player_name", "assist_name"],
    foul_type: &["foul_type", "foultype"],
    foul_player: &["foul_player_id", "fouled_player_id", "fouled_player"],
    substitution_in: &["substitution_in", "player_in", "sub_in"],
    substitution_out: &["substitution_out", "player_out", "sub_out"],
    home_score: &["home_score", "score_home", "homescore"],
    away_score: &["away_score", "score_away", "awayscore", "visitor_score"],
};

const ROSTER: RosterFields = RosterFields {
    team_id: &["id", "team_id"],
    team_name: &["name", "team_name"],
    team_code: &["code", "abbreviation"],
    team_record: &["record"],
    player_id: &["id", "player_id"],
    player_team: &["team_id", "team"],
    player_name: &["name", "player_name"],
    jersey: &["jersey", "number", "uni"],
    position: &["position", "pos"],
    starter: &["starter", "starting", "gs"],
};

const GAME: GameFields = GameFields {
    game_id: &["id", "game_id", "gameid"],
    date: &["date", "game_date"],
    venue: &["venue", "location", "arena"],
    home_id: &["home_team_id", "home_id", "homeid"],
    home_name: &["home_team", "home_team_name", "homename"],
    away_id: &["away_team_id", "away_id", "visitor_id", "visid"],
    away_name: &["away_team", "away_team_name", "visname"],
};

/// Best-effort reader for documents that match neither known feed
pub struct GenericAdapter;

impl GenericAdapter {
    pub fn can_handle(_doc: &Document) -> bool {
        true
    }

    pub fn parse(doc: &Document) -> Result<ParsedGame, MalformedInputError> {
        let root = doc.root_element();
        let event_nodes = descendants_any(root, EVENT_TAGS);
        let has_container = CONTAINER_TAGS.iter().any(|tag| first_named(root, tag).is_some());
        if event_nodes.is_empty() && !has_container {
            return Err(MalformedInputError::NoEventContainer {
                dialect: Dialect::Generic.as_str().to_string(),
            });
        }

        let mut warnings = Vec::new();
        let metadata = read_metadata(root, Dialect::Generic, GAME_TAGS, &GAME, &ROSTER, &mut warnings);
        let events: Vec<_> = event_nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| read_play(node, index, &PLAY))
            .collect();
        debug!(
            "Generic: {} <{}> records",
            events.len(),
            events.first().map(|e| e.tag.as_str()).unwrap_or("play")
        );

        Ok(ParsedGame {
            metadata,
            events,
            warnings,
        })
    }
}
