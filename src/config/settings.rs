#[derive(Debug, Clone)]
pub struct GameSettings {
    pub lineup_size: usize,
    pub periods_per_half: u32,
    pub regulation_periods: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            lineup_size: 5,
            periods_per_half: 2,
            regulation_periods: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub dir: &'static str,
    pub enhanced_play_by_play: &'static str,
    pub plays: &'static str,
    pub player_stats: &'static str,
    pub team_stats: &'static str,
    pub lineups: &'static str,
    pub box_score: &'static str,
    pub game_info: &'static str,
    pub diagnostics: &'static str,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: "basketball_analysis_output",
            enhanced_play_by_play: "enhanced_play_by_play.csv",
            plays: "plays.csv",
            player_stats: "player_stats.csv",
            team_stats: "team_stats.csv",
            lineups: "lineups.csv",
            box_score: "box_score.csv",
            game_info: "game_info.json",
            diagnostics: "diagnostics.json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub game: GameSettings,
    pub output: OutputSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            game: GameSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

// Config is passed explicitly to each service; there is no global instance.
