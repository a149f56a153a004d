use serde::{Deserialize, Serialize};

/// Which side of the scoreboard a team occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Canonical event kinds, independent of the source dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Shot,
    Rebound,
    Assist,
    Steal,
    Block,
    Turnover,
    Foul,
    Substitution,
    Timeout,
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Shot => "shot",
            EventType::Rebound => "rebound",
            EventType::Assist => "assist",
            EventType::Steal => "steal",
            EventType::Block => "block",
            EventType::Turnover => "turnover",
            EventType::Foul => "foul",
            EventType::Substitution => "substitution",
            EventType::Timeout => "timeout",
            EventType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotType {
    #[serde(rename = "2pt")]
    TwoPoint,
    #[serde(rename = "3pt")]
    ThreePoint,
    #[serde(rename = "free_throw")]
    FreeThrow,
    #[serde(rename = "none")]
    None,
}

impl ShotType {
    pub fn as_str(&self) -> &str {
        match self {
            ShotType::TwoPoint => "2pt",
            ShotType::ThreePoint => "3pt",
            ShotType::FreeThrow => "free_throw",
            ShotType::None => "none",
        }
    }

    /// Points a made attempt of this kind is worth
    pub fn value(&self) -> u8 {
        match self {
            ShotType::TwoPoint => 2,
            ShotType::ThreePoint => 3,
            ShotType::FreeThrow => 1,
            ShotType::None => 0,
        }
    }

    pub fn is_field_goal(&self) -> bool {
        matches!(self, ShotType::TwoPoint | ShotType::ThreePoint)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReboundType {
    Offensive,
    Defensive,
    None,
}

impl ReboundType {
    pub fn as_str(&self) -> &str {
        match self {
            ReboundType::Offensive => "offensive",
            ReboundType::Defensive => "defensive",
            ReboundType::None => "none",
        }
    }
}

/// Direction of a substitution record.
///
/// `Swap` carries both halves in one record: the primary player enters and
/// the secondary player leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionKind {
    Enter,
    Exit,
    Swap,
}

/// A player as referenced by an event or a lineup
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
}

impl PlayerRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Dialect-independent play-by-play record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Position of the source record in document order
    pub sequence: usize,
    pub event_type: EventType,
    pub period: u32,
    pub game_clock_text: String,
    /// Remaining time in the period, unset when the clock text is malformed
    pub time_seconds: Option<u32>,
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub primary_player: Option<PlayerRef>,
    pub secondary_player: Option<PlayerRef>,
    pub shot_type: ShotType,
    pub rebound_type: ReboundType,
    pub points: u8,
    pub substitution: Option<SubstitutionKind>,
    pub foul_type: Option<String>,
    pub raw_code: String,
    pub description: String,
    /// Running score printed by the feed as (home, away)
    pub source_score: Option<(u32, u32)>,
}

impl CanonicalEvent {
    pub fn is_made_shot(&self) -> bool {
        self.event_type == EventType::Shot && self.points > 0
    }

    pub fn is_made_field_goal(&self) -> bool {
        self.is_made_shot() && self.shot_type.is_field_goal()
    }

    /// Assisting player, only meaningful on made field goals
    pub fn assist_player(&self) -> Option<&PlayerRef> {
        if self.event_type == EventType::Shot {
            self.secondary_player.as_ref()
        } else {
            None
        }
    }

    /// Player who drew the foul, only meaningful on fouls
    pub fn fouled_player(&self) -> Option<&PlayerRef> {
        if self.event_type == EventType::Foul {
            self.secondary_player.as_ref()
        } else {
            None
        }
    }

    pub fn player_name(&self) -> Option<&str> {
        self.primary_player.as_ref().map(|p| p.name.as_str())
    }
}
