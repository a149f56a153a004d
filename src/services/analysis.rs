use anyhow::Result;
use log::info;

use crate::adapters::{self, GameMetadata};
use crate::config::GameSettings;
use crate::domain::{Diagnostics, Side};
use crate::normalizer::EventNormalizer;
use crate::stats::{self, GameStats};
use crate::tracker::{self, EnhancedPlay};

/// Everything derived from one play-by-play document
#[derive(Debug, Clone)]
pub struct GameAnalysis {
    pub metadata: GameMetadata,
    pub plays: Vec<EnhancedPlay>,
    pub stats: GameStats,
    pub diagnostics: Diagnostics,
}

impl GameAnalysis {
    /// Score after the last play, 0-0 for an empty game
    pub fn final_score(&self, side: Side) -> u32 {
        self.plays
            .last()
            .map(|play| match side {
                Side::Home => play.state.home_score,
                Side::Away => play.state.away_score,
            })
            .unwrap_or(0)
    }
}

/// Run the whole pipeline on an XML document.
///
/// Fails only when the document itself is unusable; record-level problems
/// end up in `diagnostics`.
pub fn analyze(xml: &str, settings: &GameSettings) -> Result<GameAnalysis> {
    let normalizer = EventNormalizer::new()?;
    let mut parsed = adapters::load(xml)?;

    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(std::mem::take(&mut parsed.warnings));

    normalizer.format_roster(&mut parsed.metadata);
    let events = normalizer.normalize_all(&parsed).drain_into(&mut diagnostics);
    info!("  → Normalized {} events", events.len());

    let plays = tracker::track(&parsed.metadata, events, settings).drain_into(&mut diagnostics);
    let stats = stats::aggregate(&plays, &parsed.metadata);
    info!(
        "  → Tracked {} plays, {} players, {} lineups",
        plays.len(),
        stats.players.len(),
        stats.lineups.len()
    );

    Ok(GameAnalysis {
        metadata: parsed.metadata,
        plays,
        stats,
        diagnostics,
    })
}
