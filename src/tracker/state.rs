use serde::Serialize;

use super::lineup::LineupState;
use crate::config::GameSettings;
use crate::domain::Side;

/// Live game state, owned by one tracker
#[derive(Debug, Clone)]
pub struct GameState {
    pub home_score: u32,
    pub away_score: u32,
    pub period: u32,
    pub half: String,
    /// Remaining seconds at the last event with a readable clock
    pub last_clock: Option<u32>,
    pub home_lineup: LineupState,
    pub away_lineup: LineupState,
}

impl GameState {
    pub fn new(home_lineup: LineupState, away_lineup: LineupState, settings: &GameSettings) -> Self {
        Self {
            home_score: 0,
            away_score: 0,
            period: 1,
            half: half_label(1, settings),
            last_clock: None,
            home_lineup,
            away_lineup,
        }
    }

    pub fn lineup(&self, side: Side) -> &LineupState {
        match side {
            Side::Home => &self.home_lineup,
            Side::Away => &self.away_lineup,
        }
    }

    pub fn lineup_mut(&mut self, side: Side) -> &mut LineupState {
        match side {
            Side::Home => &mut self.home_lineup,
            Side::Away => &mut self.away_lineup,
        }
    }

    pub fn add_points(&mut self, side: Side, points: u32) {
        match side {
            Side::Home => self.home_score += points,
            Side::Away => self.away_score += points,
        }
    }

    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            home_score: self.home_score,
            away_score: self.away_score,
            period: self.period,
            half: self.half.clone(),
            home_lineup: self.home_lineup.clone(),
            away_lineup: self.away_lineup.clone(),
        }
    }
}

/// State right after an event, detached from the live state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStateSnapshot {
    pub home_score: u32,
    pub away_score: u32,
    pub period: u32,
    pub half: String,
    pub home_lineup: LineupState,
    pub away_lineup: LineupState,
}

impl GameStateSnapshot {
    pub fn lineup(&self, side: Side) -> &LineupState {
        match side {
            Side::Home => &self.home_lineup,
            Side::Away => &self.away_lineup,
        }
    }
}

/// "1st Half", "2nd Half", then "OT1", "OT2", ... past regulation
pub fn half_label(period: u32, settings: &GameSettings) -> String {
    if period > settings.regulation_periods {
        return format!("OT{}", period - settings.regulation_periods);
    }
    let per_half = settings.periods_per_half.max(1);
    match (period.max(1) - 1) / per_half + 1 {
        1 => "1st Half".to_string(),
        2 => "2nd Half".to_string(),
        n => format!("Half {}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_labels_for_quarters() {
        let settings = GameSettings::default();
        assert_eq!(half_label(1, &settings), "1st Half");
        assert_eq!(half_label(2, &settings), "1st Half");
        assert_eq!(half_label(3, &settings), "2nd Half");
        assert_eq!(half_label(4, &settings), "2nd Half");
        assert_eq!(half_label(5, &settings), "OT1");
        assert_eq!(half_label(7, &settings), "OT3");
    }

    #[test]
    fn test_half_labels_for_halves() {
        let settings = GameSettings {
            periods_per_half: 1,
            regulation_periods: 2,
            ..GameSettings::default()
        };
        assert_eq!(half_label(2, &settings), "2nd Half");
        assert_eq!(half_label(3, &settings), "OT1");
    }
}
