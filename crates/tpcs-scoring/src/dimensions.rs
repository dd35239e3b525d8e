use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;

pub const DIMENSION_COUNT: usize = 6;
pub const ITEMS_PER_DIMENSION: u8 = 4;

/// The six aggregates of the questionnaire.
///
/// D1..D4 carry classification letters, D5 is informational and D6 is the
/// introspection dimension used to break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
}

impl Dimension {
    pub const ALL: [Dimension; DIMENSION_COUNT] = [
        Dimension::D1,
        Dimension::D2,
        Dimension::D3,
        Dimension::D4,
        Dimension::D5,
        Dimension::D6,
    ];

    pub const LETTERS: [Dimension; 4] = [Dimension::D1, Dimension::D2, Dimension::D3, Dimension::D4];

    /// Zero-based position in [`Dimension::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// The four consecutive items summed into this dimension.
    pub fn items(self) -> RangeInclusive<u8> {
        let first = self.index() as u8 * ITEMS_PER_DIMENSION + 1;
        first..=first + ITEMS_PER_DIMENSION - 1
    }

    pub fn is_letter(self) -> bool {
        self.index() < Self::LETTERS.len()
    }

    /// Keyed name used in reports, e.g. `D1_attention`.
    pub fn label(self) -> String {
        format!("{self}_{}", self.theme())
    }

    pub fn theme(self) -> &'static str {
        match self {
            Dimension::D1 => "attention",
            Dimension::D2 => "reward",
            Dimension::D3 => "emotion",
            Dimension::D4 => "decision",
            Dimension::D5 => "context",
            Dimension::D6 => "introspection",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{}", self.index() + 1)
    }
}

/// Sums of effective item values per dimension, each in `[-12, 12]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionSums([i32; DIMENSION_COUNT]);

impl DimensionSums {
    /// Effective value of an item is its raw answer, negated when the item is
    /// listed in `inverted`.
    pub fn aggregate(answers: &AnswerSet, inverted: &BTreeSet<u8>) -> Self {
        Self(Dimension::ALL.map(|dimension| {
            dimension
                .items()
                .filter_map(|item| {
                    let value = i32::from(answers.get(item)?);
                    Some(if inverted.contains(&item) { -value } else { value })
                })
                .sum()
        }))
    }

    pub fn get(&self, dimension: Dimension) -> i32 {
        self.0[dimension.index()]
    }

    pub fn max_abs(&self) -> i32 {
        self.0.iter().map(|sum| sum.abs()).max().unwrap_or(0)
    }
}

/// How far a letter dimension leans toward its pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    None,
    Light,
    Moderate,
    Marked,
    VeryMarked,
}

impl Intensity {
    pub fn from_score(score: i32) -> Self {
        match score.abs() {
            0 => Intensity::None,
            1..=2 => Intensity::Light,
            3..=5 => Intensity::Moderate,
            6..=8 => Intensity::Marked,
            _ => Intensity::VeryMarked,
        }
    }
}

/// Reading of the D6 sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntrospectionLevel {
    HyperIntrospective,
    Introspective,
    SlightlyIntrospective,
    Balanced,
    Mechanical,
    HyperMechanical,
}

impl IntrospectionLevel {
    pub fn from_score(score: i32) -> Self {
        match score {
            8.. => IntrospectionLevel::HyperIntrospective,
            4..=7 => IntrospectionLevel::Introspective,
            1..=3 => IntrospectionLevel::SlightlyIntrospective,
            -3..=0 => IntrospectionLevel::Balanced,
            -7..=-4 => IntrospectionLevel::Mechanical,
            _ => IntrospectionLevel::HyperMechanical,
        }
    }
}
