use log::debug;
use roxmltree::Document;

use super::fields::{read_metadata, read_play, GameFields, PlayFields, RosterFields};
use super::raw::{Dialect, ParsedGame};
use super::xml::{attr, descendants_named, first_named};
use crate::errors::MalformedInputError;

const PLAY: PlayFields = PlayFields {
    period: &["period"],
    clock: &["time", "clock"],
    team: &["team_id"],
    player: &["player_id"],
    player_name: &["player_name"],
    code: &["event_type", "eventmsgtype"],
    qualifier: &["event_action", "eventmsgactiontype"],
    description: &["description"],
    points: &["points"],
    shot_type: &["shot_type"],
    rebound_type: &["rebound_type"],
    assist_player: &["assist_player_id"],
    assist_player_name: &["assist_player_name"],
    foul_type: &["foul_type"],
    foul_player: &["foul_player_id"],
    substitution_in: &["substitution_in"],
    substitution_out: &["substitution_out"],
    home_score: &["home_score"],
    away_score: &["away_score"],
};

const ROSTER: RosterFields = RosterFields {
    team_id: &["id"],
    team_name: &["name"],
    team_code: &["abbreviation"],
    team_record: &["record"],
    player_id: &["id"],
    player_team: &["team_id"],
    player_name: &["name"],
    jersey: &["jersey"],
    position: &["position"],
    starter: &["starter"],
};

const GAME: GameFields = GameFields {
    game_id: &["id", "game_id"],
    date: &["date", "game_date"],
    venue: &["arena", "venue"],
    home_id: &["home_team_id"],
    home_name: &["home_team_name"],
    away_id: &["away_team_id"],
    away_name: &["away_team_name"],
};

/// NBA-style play-by-play feeds
pub struct NbaAdapter;

impl NbaAdapter {
    pub fn can_handle(doc: &Document) -> bool {
        let root = doc.root_element();
        let tag = root.tag_name().name().to_ascii_lowercase();
        tag.contains("nba")
            || tag.contains("basketball")
            || root
                .tag_name()
                .namespace()
                .is_some_and(|ns| ns.to_ascii_lowercase().contains("nba"))
            || root
                .descendants()
                .filter_map(|n| attr(n, &["league"]))
                .any(|league| league.to_ascii_lowercase().contains("nba"))
    }

    pub fn parse(doc: &Document) -> Result<ParsedGame, MalformedInputError> {
        let root = doc.root_element();
        let play_nodes: Vec<_> = descendants_named(root, "play").collect();
        if play_nodes.is_empty() && first_named(root, "plays").is_none() {
            return Err(MalformedInputError::NoEventContainer {
                dialect: Dialect::Nba.as_str().to_string(),
            });
        }

        let mut warnings = Vec::new();
        let metadata = read_metadata(root, Dialect::Nba, &["game"], &GAME, &ROSTER, &mut warnings);
        let events: Vec<_> = play_nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| read_play(node, index, &PLAY))
            .collect();
        debug!("NBA: {} plays, {} roster players", events.len(), metadata.roster.len());

        Ok(ParsedGame {
            metadata,
            events,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::xml::parse_document;

    const GAME_XML: &str = r#"<nba_game>
  <game id="0022400001" date="2024-10-22" arena="Crypto.com Arena" home_team_id="LAL" away_team_id="MIN"/>
  <teams>
    <team id="MIN" name="Timberwolves" abbreviation="MIN"/>
    <team id="LAL" name="Lakers" abbreviation="LAL"/>
  </teams>
  <players>
    <player id="2544" team_id="LAL" name="LeBron James" jersey="23" position="F" starter="true"/>
    <player id="1630162" team_id="MIN" name="Anthony Edwards" jersey="5" position="G" starter="1"/>
    <player id="1629675" team_id="MIN" name="Naz Reid" jersey="11" position="C"/>
  </players>
  <plays>
    <play id="1" period="1" time="11:42" team_id="LAL" player_id="2544" event_type="shot_made" points="2" shot_type="2pt" home_score="2" away_score="0"/>
    <play id="2" period="1" clock="PT11M20.00S" team_id="MIN" player_id="1630162" event_type="shot_missed" shot_type="3pt"/>
  </plays>
</nba_game>"#;

    #[test]
    fn test_detection() {
        assert!(NbaAdapter::can_handle(&parse_document(GAME_XML).unwrap()));
        assert!(NbaAdapter::can_handle(
            &parse_document(r#"<feed><game league="NBA"/></feed>"#).unwrap()
        ));
        assert!(!NbaAdapter::can_handle(&parse_document(r#"<feed><play/></feed>"#).unwrap()));
    }

    #[test]
    fn test_parse_teams_from_game_hints() {
        let doc = parse_document(GAME_XML).unwrap();
        let parsed = NbaAdapter::parse(&doc).unwrap();
        let meta = &parsed.metadata;

        assert_eq!(meta.home.id, "LAL");
        assert_eq!(meta.away.id, "MIN");
        assert_eq!(meta.away.name, "Timberwolves");
        assert_eq!(meta.home.starters, vec!["2544"]);
        assert_eq!(meta.away.starters, vec!["1630162"]);
        assert_eq!(meta.roster.len(), 3);
        assert_eq!(meta.venue.as_deref(), Some("Crypto.com Arena"));
        assert!(meta.date.is_some());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_parse_plays() {
        let doc = parse_document(GAME_XML).unwrap();
        let parsed = NbaAdapter::parse(&doc).unwrap();
        let first = &parsed.events[0];
        let second = &parsed.events[1];

        assert_eq!(parsed.events.len(), 2);
        assert_eq!(first.code.as_deref(), Some("shot_made"));
        assert_eq!(first.points, Some(2));
        assert_eq!(first.home_score, Some(2));
        assert_eq!(second.clock.as_deref(), Some("PT11M20.00S"));
        assert_eq!(second.period, Some(1));
    }
}
