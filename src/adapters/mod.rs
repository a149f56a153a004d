//! Dialect detection and extraction of raw play records.
//!
//! Each supported XML schema has one adapter struct; [`FormatAdapter`] is the
//! closed set of them and the only entry point the rest of the crate uses.

mod fields;
pub mod genius;
pub mod generic;
pub mod nba;
pub mod raw;
pub mod xml;

use log::info;
use roxmltree::Document;

pub use genius::GeniusSportsAdapter;
pub use generic::GenericAdapter;
pub use nba::NbaAdapter;
pub use raw::{Dialect, GameMetadata, ParsedGame, RawEvent, TeamInfo};

use crate::errors::MalformedInputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatAdapter {
    GeniusSports,
    Nba,
    Generic,
}

impl FormatAdapter {
    /// Detection order; the first adapter that accepts the document wins
    pub const ALL: [FormatAdapter; 3] = [
        FormatAdapter::GeniusSports,
        FormatAdapter::Nba,
        FormatAdapter::Generic,
    ];

    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::GeniusSports => FormatAdapter::GeniusSports,
            Dialect::Nba => FormatAdapter::Nba,
            Dialect::Generic => FormatAdapter::Generic,
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            FormatAdapter::GeniusSports => Dialect::GeniusSports,
            FormatAdapter::Nba => Dialect::Nba,
            FormatAdapter::Generic => Dialect::Generic,
        }
    }

    pub fn can_handle(&self, doc: &Document) -> bool {
        match self {
            FormatAdapter::GeniusSports => GeniusSportsAdapter::can_handle(doc),
            FormatAdapter::Nba => NbaAdapter::can_handle(doc),
            FormatAdapter::Generic => GenericAdapter::can_handle(doc),
        }
    }

    pub fn parse(&self, doc: &Document) -> Result<ParsedGame, MalformedInputError> {
        match self {
            FormatAdapter::GeniusSports => GeniusSportsAdapter::parse(doc),
            FormatAdapter::Nba => NbaAdapter::parse(doc),
            FormatAdapter::Generic => GenericAdapter::parse(doc),
        }
    }
}

pub fn detect_document(doc: &Document) -> Dialect {
    FormatAdapter::ALL
        .iter()
        .find(|adapter| adapter.can_handle(doc))
        .map(FormatAdapter::dialect)
        .unwrap_or(Dialect::Generic)
}

/// Dialect of `xml`; content that does not parse is reported as generic and
/// left for [`parse`] to reject
pub fn detect(xml: &str) -> Dialect {
    match xml::parse_document(xml) {
        Ok(doc) => detect_document(&doc),
        Err(_) => Dialect::Generic,
    }
}

pub fn parse(xml: &str, dialect: Dialect) -> Result<ParsedGame, MalformedInputError> {
    let doc = xml::parse_document(xml)?;
    FormatAdapter::for_dialect(dialect).parse(&doc)
}

/// Detect the dialect and extract in one step
pub fn load(xml: &str) -> Result<ParsedGame, MalformedInputError> {
    let doc = xml::parse_document(xml)?;
    let dialect = detect_document(&doc);
    info!("Detected {} format", dialect.as_str());
    FormatAdapter::for_dialect(dialect).parse(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_dialects() {
        assert_eq!(detect(r#"<bbgame><plays/></bbgame>"#), Dialect::GeniusSports);
        assert_eq!(detect(r#"<root source="genius sports"/>"#), Dialect::GeniusSports);
        assert_eq!(detect(r#"<NBAGame><plays/></NBAGame>"#), Dialect::Nba);
        assert_eq!(detect(r#"<basketball_game/>"#), Dialect::Nba);
        assert_eq!(detect(r#"<game><play/></game>"#), Dialect::Generic);
    }

    #[test]
    fn test_genius_takes_precedence_over_nba() {
        let xml = r#"<basketball><venue/><plays/></basketball>"#;
        assert_eq!(detect(xml), Dialect::GeniusSports);
    }

    #[test]
    fn test_unparseable_content_detects_as_generic_and_fails_to_parse() {
        let xml = "<game><play></game>";
        assert_eq!(detect(xml), Dialect::Generic);

        let err = parse(xml, Dialect::Generic).unwrap_err();
        assert!(matches!(err, MalformedInputError::NotWellFormed(_)));
    }

    #[test]
    fn test_load_detects_and_parses() {
        let parsed = load(r#"<game><team id="A"/><team id="B"/><play type="timeout" team="A"/></game>"#).unwrap();

        assert_eq!(parsed.metadata.dialect, Dialect::Generic);
        assert_eq!(parsed.events.len(), 1);
    }
}
