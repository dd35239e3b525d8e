use serde::{Deserialize, Serialize};

use crate::dimensions::{Dimension, Intensity, IntrospectionLevel};
use crate::polarity::Resolution;
use crate::quality::QualityAssessment;

/// Letter assigned to one of D1..D4 and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterOutcome {
    pub letter: char,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionReport {
    pub dimension: Dimension,
    /// `D1_attention` .. `D6_introspection`.
    pub label: String,
    pub raw: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<LetterOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introspection: Option<IntrospectionLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// L1 L2 L3 L4; an unresolved letter shows as the configured marker.
    pub code: String,
    pub family: String,
    /// False when `family` is the configured fallback.
    pub family_resolved: bool,
    /// D1..D6 in order.
    pub dimensions: Vec<DimensionReport>,
    pub quality: QualityAssessment,
}

impl ClassificationResult {
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionReport> {
        self.dimensions.iter().find(|report| report.dimension == dimension)
    }

    pub fn letters(&self) -> Vec<char> {
        self.code.chars().collect()
    }

    pub fn unresolved_dimensions(&self) -> Vec<Dimension> {
        self.dimensions
            .iter()
            .filter(|report| {
                matches!(
                    report.polarity,
                    Some(LetterOutcome {
                        resolution: Resolution::Unresolved,
                        ..
                    })
                )
            })
            .map(|report| report.dimension)
            .collect()
    }
}
