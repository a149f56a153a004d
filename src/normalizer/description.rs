use crate::domain::{CanonicalEvent, EventType, ReboundType, ShotType, SubstitutionKind};

const NO_PLAYER: &str = "Team";
const NO_TEAM: &str = "Unknown Team";

/// Human-readable line for one event; exactly one template per event type
pub fn describe(event: &CanonicalEvent, source_text: Option<&str>) -> String {
    let player = event.player_name().unwrap_or(NO_PLAYER);
    let team = event
        .team_name
        .as_deref()
        .or(event.team_id.as_deref())
        .unwrap_or(NO_TEAM);

    match event.event_type {
        EventType::Shot => describe_shot(event, player, team),
        EventType::Rebound => match event.rebound_type {
            ReboundType::Offensive => format!("{} Offensive Rebound for {}", player, team),
            ReboundType::Defensive => format!("{} Defensive Rebound for {}", player, team),
            ReboundType::None => format!("{} Rebound for {}", player, team),
        },
        EventType::Assist => format!("Assist by {} for {}", player, team),
        EventType::Steal => format!("{} Steal for {}", player, team),
        EventType::Block => format!("{} Blocked Shot for {}", player, team),
        EventType::Turnover => format!("{} Turnover for {}", player, team),
        EventType::Foul => format!("{} Foul for {}", player, team),
        EventType::Substitution => match event.substitution {
            Some(SubstitutionKind::Exit) => format!("{} exits the game for {}", player, team),
            _ => format!("{} enters the game for {}", player, team),
        },
        EventType::Timeout => format!("{} Timeout", team),
        EventType::Other => match source_text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => text.to_string(),
            None => format!("{} {} for {}", player, event.raw_code, team),
        },
    }
}

fn describe_shot(event: &CanonicalEvent, player: &str, team: &str) -> String {
    let outcome = if event.points > 0 { "Made" } else { "Missed" };
    let attempt = match event.shot_type {
        ShotType::ThreePoint => "3PT FG",
        ShotType::FreeThrow => "Free Throw",
        ShotType::TwoPoint | ShotType::None => "2PT FG",
    };
    let mut text = format!("{} {} by {} for {}", outcome, attempt, player, team);
    if let Some(assist) = event.assist_player().filter(|_| event.points > 0) {
        text.push_str(&format!(" (assisted by {})", assist.name));
    }
    text
}
