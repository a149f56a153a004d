use serde::Serialize;

use super::lineup::LineupState;
use super::state::GameStateSnapshot;
use crate::domain::{CanonicalEvent, Side};

/// One canonical event with the game state right after it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedPlay {
    /// 1-based, strictly increasing
    pub play_id: usize,
    pub event: CanonicalEvent,
    /// Scoreboard side of the event's team, when known
    pub team_side: Option<Side>,
    pub state: GameStateSnapshot,
}

impl EnhancedPlay {
    pub fn lineup(&self, side: Side) -> &LineupState {
        self.state.lineup(side)
    }

    pub fn lineup_text(&self, side: Side) -> String {
        self.lineup(side).names().join(", ")
    }
}
