use serde::{Deserialize, Serialize};

use crate::answers::{AnswerSet, ITEM_COUNT};
use crate::config::Thresholds;
use crate::dimensions::DimensionSums;

/// Direct/reverse item pairs compared for mirror consistency.
pub const MIRROR_PAIRS: [(u8, u8); 12] = [
    (1, 2),
    (3, 4),
    (5, 6),
    (7, 8),
    (9, 10),
    (11, 12),
    (13, 14),
    (15, 16),
    (17, 18),
    (19, 20),
    (21, 22),
    (23, 24),
];

/// Largest possible `|a + b|` for two answers in `[-3, 3]`.
pub const MAX_PAIR_DIFFERENCE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    LowConsistency,
    LowVariability,
    AtypicalProfile,
    Ok,
}

impl QualityFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityFlag::LowConsistency => "low_consistency",
            QualityFlag::LowVariability => "low_variability",
            QualityFlag::AtypicalProfile => "atypical_profile",
            QualityFlag::Ok => "ok",
        }
    }
}

impl std::fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub mirror_consistency: f64,
    pub response_variability: f64,
    /// Fired flags in declaration order; `ok` appears alone or not at all.
    pub flags: Vec<QualityFlag>,
}

impl QualityAssessment {
    pub fn assess(answers: &AnswerSet, sums: &DimensionSums, thresholds: &Thresholds) -> Self {
        let mirror_consistency = mirror_consistency(answers);
        let response_variability = response_variability(answers);

        let mut flags = Vec::new();
        if mirror_consistency < thresholds.low_consistency {
            flags.push(QualityFlag::LowConsistency);
        }
        if response_variability < thresholds.low_variability {
            flags.push(QualityFlag::LowVariability);
        }
        if sums.max_abs() > thresholds.atypical_abs_score {
            flags.push(QualityFlag::AtypicalProfile);
        }
        if flags.is_empty() {
            flags.push(QualityFlag::Ok);
        }

        Self {
            mirror_consistency,
            response_variability,
            flags,
        }
    }

    pub fn has(&self, flag: QualityFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_ok(&self) -> bool {
        self.has(QualityFlag::Ok)
    }
}

/// `1 - mean(|raw(a) - (-raw(b))|) / 6` over [`MIRROR_PAIRS`]. Not clamped.
pub fn mirror_consistency(answers: &AnswerSet) -> f64 {
    let total: i32 = MIRROR_PAIRS
        .iter()
        .map(|&(direct, reverse)| {
            let direct = i32::from(answers.get(direct).unwrap_or_default());
            let reverse = i32::from(answers.get(reverse).unwrap_or_default());
            (direct - (-reverse)).abs()
        })
        .sum();
    let mean = f64::from(total) / MIRROR_PAIRS.len() as f64;
    1.0 - mean / MAX_PAIR_DIFFERENCE
}

/// Population standard deviation of the raw answers.
pub fn response_variability(answers: &AnswerSet) -> f64 {
    let n = ITEM_COUNT as f64;
    let mean = answers.values().iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let variance = answers
        .values()
        .iter()
        .map(|&v| (f64::from(v) - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}
