use anyhow::{Context, Result};
use regex::Regex;

const ROMAN_SUFFIXES: &[&str] = &["II", "III", "IV", "VI", "VII", "VIII"];

/// Turns roster-style names ("SMITH,JOHN") into display names ("John Smith")
pub struct NameFormatter {
    shape: Regex,
    gaelic: Regex,
}

impl NameFormatter {
    pub fn new() -> Result<Self> {
        let shape = Regex::new(r"^[\p{L}\s.'\-]*(,[\p{L}\s.'\-]*)?$")
            .context("Failed to compile player name pattern")?;
        let gaelic = Regex::new(r"^(Mc|Mac)\p{Lu}\p{Ll}+$")
            .context("Failed to compile Mc/Mac name pattern")?;
        Ok(Self { shape, gaelic })
    }

    /// Names with digits, symbols or several commas come back untouched.
    /// Formatting an already formatted name is a no-op.
    pub fn format(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !self.shape.is_match(trimmed) {
            return raw.to_string();
        }

        let ordered = match trimmed.split_once(',') {
            Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
            None => trimmed.to_string(),
        };

        ordered
            .split_whitespace()
            .map(|word| self.fix_word_case(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Roman suffixes go upper-case and "McDonald"/"MacLeod" keep their
    /// inner capital; every other word is title-cased
    fn fix_word_case(&self, word: &str) -> String {
        let upper = word.to_uppercase();
        if ROMAN_SUFFIXES.contains(&upper.as_str()) {
            return upper;
        }
        if self.gaelic.is_match(word) {
            return word.to_string();
        }
        title_case(word)
    }
}

/// Capitalize the first letter and every letter after `-`, `'` or `.`
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut capitalize = true;
    for c in word.chars() {
        if capitalize && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            capitalize = false;
        } else {
            out.extend(c.to_lowercase());
            capitalize = matches!(c, '-' | '\'' | '.');
        }
    }
    out
}
