use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dimensions::Dimension;

/// Why a single questionnaire item was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    Missing,
    NotNumeric,
    NotIntegral,
    OutOfRange,
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ValidationReason::Missing => "missing",
            ValidationReason::NotNumeric => "not numeric",
            ValidationReason::NotIntegral => "not a whole number",
            ValidationReason::OutOfRange => "outside [-3, 3]",
        };
        write!(f, "{label}")
    }
}

/// The one failure the scorer can report: an item that is absent or unusable.
///
/// `raw` holds the value as received (strings unquoted, everything else as JSON
/// text) and is `None` when the item was absent.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error(
    "invalid answer for item {item}: {reason} (raw: {})",
    .raw.as_deref().unwrap_or("<absent>")
)]
pub struct ValidationError {
    pub item: u8,
    pub raw: Option<String>,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(item: u8, raw: Option<String>, reason: ValidationReason) -> Self {
        Self { item, raw, reason }
    }
}

/// Rejected scorer configuration. Raised once, when a [`crate::Scorer`] is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("dimension {dimension} uses '{letter}' for both poles")]
    IdenticalPoles { dimension: Dimension, letter: char },

    #[error("letter '{letter}' of dimension {dimension} collides with the unresolved marker")]
    UnresolvedCollision { dimension: Dimension, letter: char },

    #[error("family entry ({l3}, {l4}) uses a letter outside the D3/D4 alphabets")]
    UnknownFamilyLetter { l3: char, l4: char },

    #[error("family entry ({l3}, {l4}) is listed more than once")]
    DuplicateFamily { l3: char, l4: char },

    #[error("family table has no entry for ({l3}, {l4})")]
    MissingFamily { l3: char, l4: char },

    #[error("tie-break cannot use letter dimension {0}")]
    LetterDimensionTieBreak(Dimension),

    #[error("tie-break lists dimension {0} more than once")]
    DuplicateTieBreak(Dimension),

    #[error("inverted item {0} is outside 1..=24")]
    InvertedItemOutOfRange(u8),

    #[error("threshold {name} must be finite, got {value}")]
    NonFiniteThreshold { name: &'static str, value: f64 },

    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_item_and_raw_value() {
        let error = ValidationError::new(7, Some("4".to_string()), ValidationReason::OutOfRange);
        assert_eq!(
            error.to_string(),
            "invalid answer for item 7: outside [-3, 3] (raw: 4)"
        );
    }

    #[test]
    fn absent_raw_value_is_rendered_explicitly() {
        let error = ValidationError::new(12, None, ValidationReason::Missing);
        assert_eq!(
            error.to_string(),
            "invalid answer for item 12: missing (raw: <absent>)"
        );
    }
}
