//! Per-dialect event code tables.

use crate::adapters::{Dialect, RawEvent};
use crate::domain::{EventType, ReboundType, ShotType, SubstitutionKind};

/// What an event code says about a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub event_type: EventType,
    /// Made/missed, when the code itself tells
    pub made: Option<bool>,
    pub shot_type: Option<ShotType>,
    pub rebound_type: Option<ReboundType>,
    pub substitution: Option<SubstitutionKind>,
}

impl Classification {
    /// Fallback for codes no table knows
    pub fn unrecognized() -> Self {
        Self::of(EventType::Other)
    }

    fn of(event_type: EventType) -> Self {
        Self {
            event_type,
            made: None,
            shot_type: None,
            rebound_type: None,
            substitution: None,
        }
    }

    fn shot(made: Option<bool>, shot_type: Option<ShotType>) -> Self {
        Self {
            made,
            shot_type,
            ..Self::of(EventType::Shot)
        }
    }

    fn rebound(rebound_type: Option<ReboundType>) -> Self {
        Self {
            rebound_type,
            ..Self::of(EventType::Rebound)
        }
    }

    fn substitution(kind: Option<SubstitutionKind>) -> Self {
        Self {
            substitution: kind,
            ..Self::of(EventType::Substitution)
        }
    }
}

/// `None` means the code is not in any table for the dialect
pub fn classify(dialect: Dialect, raw: &RawEvent) -> Option<Classification> {
    let code = raw.code.as_deref()?;
    match dialect {
        Dialect::GeniusSports => genius(code, raw.qualifier.as_deref().unwrap_or("")),
        Dialect::Nba => nba(code),
        Dialect::Generic => keyword(code).or_else(|| sniff(code)),
    }
}

// --- Genius Sports ---

fn genius(action: &str, qualifier: &str) -> Option<Classification> {
    let action = action.to_ascii_uppercase();
    let qualifier = qualifier.to_ascii_uppercase();
    let shot_type = || {
        if qualifier.contains("3PTR") {
            ShotType::ThreePoint
        } else if qualifier.contains("FT") {
            ShotType::FreeThrow
        } else {
            ShotType::TwoPoint
        }
    };

    let classification = match action.as_str() {
        a if a.contains("GOOD") => Classification::shot(Some(true), Some(shot_type())),
        a if a.contains("MISS") => Classification::shot(Some(false), Some(shot_type())),
        a if a.contains("REB") => Classification::rebound(Some(if qualifier.contains("OFF") {
            ReboundType::Offensive
        } else if qualifier.contains("DEF") {
            ReboundType::Defensive
        } else {
            ReboundType::None
        })),
        a if a.contains("ASSIST") => Classification::of(EventType::Assist),
        a if a.contains("STEAL") => Classification::of(EventType::Steal),
        a if a.contains("BLOCK") => Classification::of(EventType::Block),
        a if a.contains("TURNOVER") => Classification::of(EventType::Turnover),
        a if a.contains("FOUL") => Classification::of(EventType::Foul),
        a if a.contains("SUB") => Classification::substitution(match qualifier.as_str() {
            "IN" => Some(SubstitutionKind::Enter),
            "OUT" => Some(SubstitutionKind::Exit),
            _ => None,
        }),
        a if a.contains("TIMEOUT") => Classification::of(EventType::Timeout),
        _ => return None,
    };
    Some(classification)
}

// --- NBA ---

fn nba(code: &str) -> Option<Classification> {
    match code.trim().parse::<u32>() {
        Ok(msg_type) => nba_message_type(msg_type),
        Err(_) => keyword(code),
    }
}

/// Numeric `EVENTMSGTYPE` values
fn nba_message_type(msg_type: u32) -> Option<Classification> {
    let classification = match msg_type {
        1 => Classification::shot(Some(true), None),
        2 => Classification::shot(Some(false), None),
        3 => Classification::shot(None, Some(ShotType::FreeThrow)),
        4 => Classification::rebound(None),
        5 => Classification::of(EventType::Turnover),
        6 => Classification::of(EventType::Foul),
        // violation, jump ball, ejection, period start/end, instant replay
        7 | 10 | 11 | 12 | 13 | 18 => Classification::of(EventType::Other),
        8 => Classification::substitution(Some(SubstitutionKind::Swap)),
        9 => Classification::of(EventType::Timeout),
        _ => return None,
    };
    Some(classification)
}

// --- Textual codes (NBA and generic) ---

fn canonical_key(code: &str) -> String {
    code.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

fn keyword(code: &str) -> Option<Classification> {
    use Classification as C;
    use EventType::*;

    let classification = match canonical_key(code).as_str() {
        "shot" | "field_goal" | "fieldgoal" | "fg" => C::shot(None, None),
        "shot_made" | "made_shot" | "field_goal_made" | "fgm" | "made" => C::shot(Some(true), None),
        "shot_missed" | "missed_shot" | "field_goal_missed" | "missed" | "miss" => {
            C::shot(Some(false), None)
        }
        "three_pointer" | "3pt" | "3pt_shot" => C::shot(None, Some(ShotType::ThreePoint)),
        "free_throw" | "freethrow" | "ft" => C::shot(None, Some(ShotType::FreeThrow)),
        "free_throw_made" | "ft_made" | "ftm" => C::shot(Some(true), Some(ShotType::FreeThrow)),
        "free_throw_missed" | "ft_missed" => C::shot(Some(false), Some(ShotType::FreeThrow)),
        "rebound" | "team_rebound" => C::rebound(None),
        "offensive_rebound" | "oreb" => C::rebound(Some(ReboundType::Offensive)),
        "defensive_rebound" | "dreb" => C::rebound(Some(ReboundType::Defensive)),
        "assist" => C::of(Assist),
        "steal" => C::of(Steal),
        "block" | "blocked_shot" => C::of(Block),
        "turnover" => C::of(Turnover),
        "foul" | "personal_foul" | "shooting_foul" | "offensive_foul" | "technical_foul"
        | "flagrant_foul" => C::of(Foul),
        "substitution" | "sub" => C::substitution(None),
        "sub_in" | "substitution_in" => C::substitution(Some(SubstitutionKind::Enter)),
        "sub_out" | "substitution_out" => C::substitution(Some(SubstitutionKind::Exit)),
        "timeout" | "time_out" => C::of(Timeout),
        "jump_ball" | "jumpball" | "violation" | "ejection" | "period_start" | "period_end"
        | "start_period" | "end_period" => C::of(Other),
        _ => return None,
    };
    Some(classification)
}

/// Last resort for free-form generic codes
fn sniff(code: &str) -> Option<Classification> {
    use Classification as C;

    let key = canonical_key(code);
    let made = if key.contains("miss") {
        Some(false)
    } else if key.contains("made") || key.contains("make") || key.contains("good") {
        Some(true)
    } else {
        None
    };

    let classification = if key.contains("free") && key.contains("throw") {
        C::shot(made, Some(ShotType::FreeThrow))
    } else if key.contains("rebound") {
        let kind = if key.contains("off") {
            Some(ReboundType::Offensive)
        } else if key.contains("def") {
            Some(ReboundType::Defensive)
        } else {
            None
        };
        C::rebound(kind)
    } else if key.contains("assist") {
        C::of(EventType::Assist)
    } else if key.contains("steal") {
        C::of(EventType::Steal)
    } else if key.contains("block") {
        C::of(EventType::Block)
    } else if key.contains("turnover") {
        C::of(EventType::Turnover)
    } else if key.contains("foul") {
        C::of(EventType::Foul)
    } else if key.contains("sub") {
        C::substitution(None)
    } else if key.contains("timeout") {
        C::of(EventType::Timeout)
    } else if ["shot", "goal", "basket", "layup", "dunk", "jumper", "3pt", "2pt"]
        .iter()
        .any(|word| key.contains(word))
    {
        let shot_type = if key.contains("3pt") || key.contains("three") {
            Some(ShotType::ThreePoint)
        } else {
            None
        };
        C::shot(made, shot_type)
    } else {
        return None;
    };
    Some(classification)
}

// --- Source hints ---

pub fn parse_shot_type(text: &str) -> Option<ShotType> {
    match canonical_key(text).as_str() {
        "3pt" | "3" | "three" | "3ptr" | "three_point" | "3_point" => Some(ShotType::ThreePoint),
        "2pt" | "2" | "two" | "two_point" | "2_point" | "jumper" | "layup" | "dunk" => {
            Some(ShotType::TwoPoint)
        }
        "ft" | "free_throw" | "freethrow" | "1" => Some(ShotType::FreeThrow),
        _ => None,
    }
}

pub fn parse_rebound_type(text: &str) -> Option<ReboundType> {
    match canonical_key(text).as_str() {
        "offensive" | "off" | "o" | "oreb" => Some(ReboundType::Offensive),
        "defensive" | "def" | "d" | "dreb" => Some(ReboundType::Defensive),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: &str, qualifier: Option<&str>) -> RawEvent {
        RawEvent {
            code: Some(code.to_string()),
            qualifier: qualifier.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_genius_codes() {
        let three = classify(Dialect::GeniusSports, &raw("GOOD", Some("3PTR"))).unwrap();
        assert_eq!(three.event_type, EventType::Shot);
        assert_eq!(three.made, Some(true));
        assert_eq!(three.shot_type, Some(ShotType::ThreePoint));

        let rebound = classify(Dialect::GeniusSports, &raw("REBOUND", Some("DEF"))).unwrap();
        assert_eq!(rebound.rebound_type, Some(ReboundType::Defensive));

        let sub = classify(Dialect::GeniusSports, &raw("SUB", Some("OUT"))).unwrap();
        assert_eq!(sub.substitution, Some(SubstitutionKind::Exit));

        assert!(classify(Dialect::GeniusSports, &raw("JUMPBALLX", None)).is_none());
    }

    #[test]
    fn test_nba_numeric_and_textual_codes() {
        let made = classify(Dialect::Nba, &raw("1", None)).unwrap();
        assert_eq!(made.made, Some(true));

        let period_end = classify(Dialect::Nba, &raw("13", None)).unwrap();
        assert_eq!(period_end.event_type, EventType::Other);

        let sub = classify(Dialect::Nba, &raw("substitution", None)).unwrap();
        assert_eq!(sub.event_type, EventType::Substitution);

        assert!(classify(Dialect::Nba, &raw("42", None)).is_none());
        assert!(classify(Dialect::Nba, &raw("alley-oop dunk", None)).is_none());
    }

    #[test]
    fn test_generic_sniffing() {
        let shot = classify(Dialect::Generic, &raw("Made Layup Shot", None)).unwrap();
        assert_eq!(shot.event_type, EventType::Shot);
        assert_eq!(shot.made, Some(true));

        let ft = classify(Dialect::Generic, &raw("Free Throw Missed", None)).unwrap();
        assert_eq!(ft.shot_type, Some(ShotType::FreeThrow));
        assert_eq!(ft.made, Some(false));

        assert!(classify(Dialect::Generic, &raw("celebration", None)).is_none());
    }

    #[test]
    fn test_missing_code_is_unrecognized() {
        assert!(classify(Dialect::Generic, &RawEvent::default()).is_none());
    }

    #[test]
    fn test_source_hints() {
        assert_eq!(parse_shot_type("3PT"), Some(ShotType::ThreePoint));
        assert_eq!(parse_shot_type("free throw"), Some(ShotType::FreeThrow));
        assert_eq!(parse_rebound_type("Offensive"), Some(ReboundType::Offensive));
        assert_eq!(parse_rebound_type("team"), None);
    }
}
