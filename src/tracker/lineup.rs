use serde::Serialize;

use crate::domain::PlayerRef;

/// Players on court for one team, in order of entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineupState {
    players: Vec<PlayerRef>,
}

impl LineupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_players(players: impl IntoIterator<Item = PlayerRef>) -> Self {
        let mut lineup = Self::new();
        for player in players {
            lineup.insert(player);
        }
        lineup
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn players(&self) -> &[PlayerRef] {
        &self.players
    }

    /// Returns false when the player was already on court
    pub fn insert(&mut self, player: PlayerRef) -> bool {
        if self.contains(&player.id) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Returns false when the player was not on court
    pub fn remove(&mut self, player_id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|p| p.id != player_id);
        self.players.len() != before
    }

    /// Drop the longest-tenured players until `size` remain
    pub fn trim_to(&mut self, size: usize) -> Vec<PlayerRef> {
        let excess = self.players.len().saturating_sub(size);
        self.players.drain(..excess).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn key(&self, team_id: &str) -> LineupKey {
        let mut player_ids: Vec<String> = self.players.iter().map(|p| p.id.clone()).collect();
        player_ids.sort();
        LineupKey {
            team_id: team_id.to_string(),
            player_ids,
        }
    }
}

/// Frozen lineup composition, independent of entry order
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LineupKey {
    pub team_id: String,
    pub player_ids: Vec<String>,
}
