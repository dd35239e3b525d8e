//! Scorer configuration: letter vocabulary, family table, tie-break order,
//! inverted items and quality thresholds.
//!
//! Deployments differ only in these constants; the algorithm is shared.
//! A configuration is validated once and is immutable afterwards.
//!
//! ```toml
//! unresolved = "X"
//! default_family = "Delta"
//! tie_break = ["D6"]
//! inverted_items = [2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24]
//!
//! [thresholds]
//! low_consistency = 0.7
//! low_variability = 0.7
//! atypical_abs_score = 10
//!
//! [[letters]]
//! positive = "E"
//! negative = "F"
//! # ... one entry per letter dimension, D1 to D4
//!
//! [[families]]
//! l3 = "R"
//! l4 = "C"
//! label = "Alpha"
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::answers::ITEM_COUNT;
use crate::dimensions::Dimension;
use crate::error::ConfigError;
use crate::polarity::Pole;

/// Letters for the two poles of one classification dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterPair {
    pub positive: char,
    pub negative: char,
}

impl LetterPair {
    pub const fn new(positive: char, negative: char) -> Self {
        Self { positive, negative }
    }

    pub fn letter(&self, pole: Pole) -> char {
        match pole {
            Pole::Positive => self.positive,
            Pole::Negative => self.negative,
        }
    }

    pub fn contains(&self, letter: char) -> bool {
        self.positive == letter || self.negative == letter
    }
}

/// One row of the family lookup, keyed by the third and fourth letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyEntry {
    pub l3: char,
    pub l4: char,
    pub label: String,
}

impl FamilyEntry {
    fn new(l3: char, l4: char, label: &str) -> Self {
        Self {
            l3,
            l4,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// `low_consistency` fires strictly below this mirror consistency.
    pub low_consistency: f64,
    /// `low_variability` fires strictly below this standard deviation.
    pub low_variability: f64,
    /// `atypical_profile` fires when any |D| is strictly above this.
    pub atypical_abs_score: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_consistency: 0.70,
            low_variability: 0.70,
            atypical_abs_score: 10,
        }
    }
}

/// Built-in vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// E/F, A/I, R/E, C/D with Alpha/Beta/Gamma/Delta families.
    Difa,
    /// L/F, A/I, R/E, C/D with Dynamique/Inspiré/Centré/Réceptif families.
    Dynamics,
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Preset::Difa => "difa",
            Preset::Dynamics => "dynamics",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Marker used in the code for a letter no rule could resolve.
    pub unresolved: char,
    /// Family reported when L3 or L4 is unresolved.
    pub default_family: String,
    /// Dimensions consulted, in order, for a zero-sum letter dimension.
    pub tie_break: Vec<Dimension>,
    /// Items whose sign is flipped before aggregation.
    pub inverted_items: BTreeSet<u8>,
    pub thresholds: Thresholds,
    /// Letter pairs for D1, D2, D3 and D4.
    pub letters: [LetterPair; 4],
    pub families: Vec<FamilyEntry>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self::preset(Preset::Difa)
    }
}

impl ScorerConfig {
    pub fn preset(preset: Preset) -> Self {
        let (d1, families, default_family) = match preset {
            Preset::Difa => (
                LetterPair::new('E', 'F'),
                vec![
                    FamilyEntry::new('R', 'C', "Alpha"),
                    FamilyEntry::new('R', 'D', "Beta"),
                    FamilyEntry::new('E', 'C', "Gamma"),
                    FamilyEntry::new('E', 'D', "Delta"),
                ],
                "Delta",
            ),
            Preset::Dynamics => (
                LetterPair::new('L', 'F'),
                vec![
                    FamilyEntry::new('R', 'C', "Dynamique"),
                    FamilyEntry::new('R', 'D', "Inspiré"),
                    FamilyEntry::new('E', 'C', "Centré"),
                    FamilyEntry::new('E', 'D', "Réceptif"),
                ],
                "Réceptif",
            ),
        };

        Self {
            unresolved: 'X',
            default_family: default_family.to_string(),
            tie_break: vec![Dimension::D6],
            inverted_items: (2..=ITEM_COUNT as u8).step_by(2).collect(),
            thresholds: Thresholds::default(),
            letters: [
                d1,
                LetterPair::new('A', 'I'),
                LetterPair::new('R', 'E'),
                LetterPair::new('C', 'D'),
            ],
            families,
        }
    }

    /// Parses and validates a TOML document. Omitted keys fall back to the
    /// `difa` preset.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: "tpcs_scoring", path = %path.display(), "loaded scorer config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn family_for(&self, l3: char, l4: char) -> Option<&str> {
        self.families
            .iter()
            .find(|entry| entry.l3 == l3 && entry.l4 == l4)
            .map(|entry| entry.label.as_str())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (dimension, pair) in Dimension::LETTERS.into_iter().zip(self.letters.iter()) {
            if pair.positive == pair.negative {
                return Err(ConfigError::IdenticalPoles {
                    dimension,
                    letter: pair.positive,
                });
            }
            if pair.contains(self.unresolved) {
                return Err(ConfigError::UnresolvedCollision {
                    dimension,
                    letter: self.unresolved,
                });
            }
        }

        self.validate_families()?;

        let mut seen = BTreeSet::new();
        for &dimension in &self.tie_break {
            if dimension.is_letter() {
                return Err(ConfigError::LetterDimensionTieBreak(dimension));
            }
            if !seen.insert(dimension) {
                return Err(ConfigError::DuplicateTieBreak(dimension));
            }
        }

        if let Some(&item) = self
            .inverted_items
            .iter()
            .find(|&&item| item == 0 || usize::from(item) > ITEM_COUNT)
        {
            return Err(ConfigError::InvertedItemOutOfRange(item));
        }

        for (name, value) in [
            ("low_consistency", self.thresholds.low_consistency),
            ("low_variability", self.thresholds.low_variability),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteThreshold { name, value });
            }
        }

        Ok(())
    }

    fn validate_families(&self) -> Result<(), ConfigError> {
        let l3 = self.letters[2];
        let l4 = self.letters[3];

        let mut seen = BTreeSet::new();
        for entry in &self.families {
            if !l3.contains(entry.l3) || !l4.contains(entry.l4) {
                return Err(ConfigError::UnknownFamilyLetter {
                    l3: entry.l3,
                    l4: entry.l4,
                });
            }
            if !seen.insert((entry.l3, entry.l4)) {
                return Err(ConfigError::DuplicateFamily {
                    l3: entry.l3,
                    l4: entry.l4,
                });
            }
        }

        for a in [l3.positive, l3.negative] {
            for b in [l4.positive, l4.negative] {
                if !seen.contains(&(a, b)) {
                    return Err(ConfigError::MissingFamily { l3: a, l4: b });
                }
            }
        }

        Ok(())
    }
}
