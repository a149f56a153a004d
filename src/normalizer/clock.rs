use anyhow::{Context, Result};
use regex::Regex;

/// Game clock text to remaining seconds in the period
pub struct ClockParser {
    minutes_seconds: Regex,
    iso_duration: Regex,
}

impl ClockParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            minutes_seconds: Regex::new(r"^\s*(\d{1,2}):(\d{2})(?:\.\d+)?\s*$")
                .context("Failed to compile MM:SS clock pattern")?,
            iso_duration: Regex::new(r"^\s*PT(\d+)M(\d+)(?:\.\d+)?S\s*$")
                .context("Failed to compile ISO-8601 clock pattern")?,
        })
    }

    /// `"05:23"` and `"PT05M23.00S"` both give 323. Fractional seconds are
    /// dropped; anything else is `None`.
    pub fn seconds(&self, text: &str) -> Option<u32> {
        let caps = self
            .minutes_seconds
            .captures(text)
            .or_else(|| self.iso_duration.captures(text))?;
        let minutes: u32 = caps.get(1)?.as_str().parse().ok()?;
        let seconds: u32 = caps.get(2)?.as_str().parse().ok()?;
        if seconds >= 60 {
            return None;
        }
        Some(minutes * 60 + seconds)
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
