use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Recoverable anomaly found while processing a single record.
///
/// Only document-level failures abort a run; everything here is collected and
/// reported next to the outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    UnrecognizedEvent {
        sequence: usize,
        code: String,
    },
    MissingField {
        sequence: Option<usize>,
        field: String,
    },
    LineupInconsistency {
        sequence: usize,
        team_id: String,
        detail: String,
    },
    OutOfOrder {
        sequence: usize,
        detail: String,
    },
    ScoreMismatch {
        sequence: usize,
        detail: String,
    },
}

impl Warning {
    pub fn unrecognized_event(sequence: usize, code: impl Into<String>) -> Self {
        Warning::UnrecognizedEvent {
            sequence,
            code: code.into(),
        }
    }

    pub fn missing_field(sequence: Option<usize>, field: impl Into<String>) -> Self {
        Warning::MissingField {
            sequence,
            field: field.into(),
        }
    }

    pub fn lineup(sequence: usize, team_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Warning::LineupInconsistency {
            sequence,
            team_id: team_id.into(),
            detail: detail.into(),
        }
    }

    pub fn out_of_order(sequence: usize, detail: impl Into<String>) -> Self {
        Warning::OutOfOrder {
            sequence,
            detail: detail.into(),
        }
    }

    pub fn score_mismatch(sequence: usize, detail: impl Into<String>) -> Self {
        Warning::ScoreMismatch {
            sequence,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Warning::UnrecognizedEvent { .. } => "unrecognized_event",
            Warning::MissingField { .. } => "missing_field",
            Warning::LineupInconsistency { .. } => "lineup_inconsistency",
            Warning::OutOfOrder { .. } => "out_of_order",
            Warning::ScoreMismatch { .. } => "score_mismatch",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnrecognizedEvent { sequence, code } => {
                write!(f, "event #{}: unrecognized event code '{}'", sequence, code)
            }
            Warning::MissingField { sequence: Some(seq), field } => {
                write!(f, "event #{}: missing {}", seq, field)
            }
            Warning::MissingField { sequence: None, field } => write!(f, "missing {}", field),
            Warning::LineupInconsistency {
                sequence,
                team_id,
                detail,
            } => write!(f, "event #{}: lineup of {}: {}", sequence, team_id, detail),
            Warning::OutOfOrder { sequence, detail } => {
                write!(f, "event #{}: out of order: {}", sequence, detail)
            }
            Warning::ScoreMismatch { sequence, detail } => {
                write!(f, "event #{}: score mismatch: {}", sequence, detail)
            }
        }
    }
}

/// A value together with the warnings produced while computing it
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(value: T, warnings: Vec<Warning>) -> Self {
        Self { value, warnings }
    }

    /// Move the warnings into `sink` and hand back the value
    pub fn drain_into(self, sink: &mut Diagnostics) -> T {
        sink.extend(self.warnings);
        self.value
    }
}

/// Accumulated warnings of one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        for warning in warnings {
            self.push(warning);
        }
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn counts_by_kind(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for warning in &self.warnings {
            *counts.entry(warning.kind().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_kind() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Warning::unrecognized_event(1, "JUMP"));
        diagnostics.push(Warning::unrecognized_event(4, "DELAY"));
        diagnostics.push(Warning::missing_field(Some(2), "clock"));

        let counts = diagnostics.counts_by_kind();
        assert_eq!(counts.get("unrecognized_event"), Some(&2));
        assert_eq!(counts.get("missing_field"), Some(&1));
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_outcome_drains_warnings() {
        let mut diagnostics = Diagnostics::new();
        let outcome = Outcome::with_warnings(7, vec![Warning::out_of_order(3, "period went back")]);

        let value = outcome.drain_into(&mut diagnostics);
        assert_eq!(value, 7);
        assert_eq!(diagnostics.warnings()[0].kind(), "out_of_order");
    }
}
