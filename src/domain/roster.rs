use serde::Serialize;
use std::collections::BTreeMap;

/// A player as listed in the game's roster section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub id: String,
    pub team_id: String,
    /// Name as written in the source document, until formatted for display
    pub name: String,
    pub jersey: Option<String>,
    pub position: Option<String>,
    pub starter: bool,
}

/// Roster players indexed by player ID
#[derive(Debug, Clone, Default, Serialize)]
pub struct Roster {
    players: BTreeMap<String, RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            players: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, entry: RosterEntry) {
        self.players.insert(entry.id.clone(), entry);
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&RosterEntry> {
        self.players.get(id)
    }

    pub fn team_of(&self, player_id: &str) -> Option<&str> {
        self.get(player_id).map(|p| p.team_id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.players.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RosterEntry> {
        self.players.values_mut()
    }

    pub fn for_team<'a>(&'a self, team_id: &'a str) -> impl Iterator<Item = &'a RosterEntry> + 'a {
        self.players.values().filter(move |p| p.team_id == team_id)
    }
}
