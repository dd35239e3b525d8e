use serde::{Deserialize, Serialize};

use crate::config::LetterPair;
use crate::dimensions::{Dimension, DimensionSums};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pole {
    Positive,
    Negative,
}

impl Pole {
    /// Sign of a dimension sum; zero has no pole.
    pub fn of(score: i32) -> Option<Self> {
        match score.signum() {
            1 => Some(Pole::Positive),
            -1 => Some(Pole::Negative),
            _ => None,
        }
    }
}

/// How a letter dimension obtained (or failed to obtain) its pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum Resolution {
    /// The dimension's own sum was non-zero.
    Direct { pole: Pole },
    /// The sum was zero and `by` was the first tie-break dimension with a sign.
    TieBreak { pole: Pole, by: Dimension },
    /// Zero sum and every tie-break dimension was zero as well.
    Unresolved,
}

impl Resolution {
    pub fn pole(&self) -> Option<Pole> {
        match *self {
            Resolution::Direct { pole } | Resolution::TieBreak { pole, .. } => Some(pole),
            Resolution::Unresolved => None,
        }
    }

    pub fn letter(&self, pair: &LetterPair, unresolved: char) -> char {
        self.pole().map_or(unresolved, |pole| pair.letter(pole))
    }
}

/// Resolves one letter dimension, consulting `tie_break` in order when its sum is zero.
pub fn resolve(dimension: Dimension, sums: &DimensionSums, tie_break: &[Dimension]) -> Resolution {
    if let Some(pole) = Pole::of(sums.get(dimension)) {
        return Resolution::Direct { pole };
    }

    tie_break
        .iter()
        .find_map(|&by| Pole::of(sums.get(by)).map(|pole| Resolution::TieBreak { pole, by }))
        .unwrap_or(Resolution::Unresolved)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::answers::AnswerSet;

    /// Builds sums from per-dimension item values with no inversion.
    fn sums(groups: [[i8; 4]; 6]) -> DimensionSums {
        let mut values = [0_i8; 24];
        for (slot, value) in values.iter_mut().zip(groups.iter().flatten()) {
            *slot = *value;
        }
        DimensionSums::aggregate(&AnswerSet::new(values).unwrap(), &BTreeSet::new())
    }

    const ZERO: [i8; 4] = [0, 0, 0, 0];

    #[test]
    fn non_zero_sum_resolves_directly() {
        let sums = sums([[1, 0, 0, 0], [-2, 0, 0, 0], ZERO, ZERO, ZERO, [3, 0, 0, 0]]);
        assert_eq!(
            resolve(Dimension::D1, &sums, &[Dimension::D6]),
            Resolution::Direct { pole: Pole::Positive }
        );
        assert_eq!(
            resolve(Dimension::D2, &sums, &[Dimension::D6]),
            Resolution::Direct { pole: Pole::Negative }
        );
    }

    #[test]
    fn zero_sum_follows_sign_of_tie_breaker() {
        let positive = sums([[1, -1, 0, 0], ZERO, ZERO, ZERO, ZERO, [2, 0, 0, 0]]);
        assert_eq!(
            resolve(Dimension::D1, &positive, &[Dimension::D6]),
            Resolution::TieBreak { pole: Pole::Positive, by: Dimension::D6 }
        );

        let negative = sums([[1, -1, 0, 0], ZERO, ZERO, ZERO, ZERO, [-2, 0, 0, 0]]);
        assert_eq!(
            resolve(Dimension::D1, &negative, &[Dimension::D6]),
            Resolution::TieBreak { pole: Pole::Negative, by: Dimension::D6 }
        );
    }

    #[test]
    fn zero_tie_breaker_leaves_dimension_unresolved() {
        let sums = sums([ZERO, ZERO, ZERO, ZERO, ZERO, [3, -3, 0, 0]]);
        assert_eq!(resolve(Dimension::D1, &sums, &[Dimension::D6]), Resolution::Unresolved);
        assert_eq!(resolve(Dimension::D1, &sums, &[]), Resolution::Unresolved);
    }

    #[test]
    fn tie_break_chain_uses_first_signed_dimension() {
        let d5_signed = sums([ZERO, ZERO, ZERO, ZERO, [-1, 0, 0, 0], [2, 0, 0, 0]]);
        assert_eq!(
            resolve(Dimension::D3, &d5_signed, &[Dimension::D5, Dimension::D6]),
            Resolution::TieBreak { pole: Pole::Negative, by: Dimension::D5 }
        );

        let d5_zero = sums([ZERO, ZERO, ZERO, ZERO, ZERO, [2, 0, 0, 0]]);
        assert_eq!(
            resolve(Dimension::D3, &d5_zero, &[Dimension::D5, Dimension::D6]),
            Resolution::TieBreak { pole: Pole::Positive, by: Dimension::D6 }
        );
    }

    #[test]
    fn unresolved_maps_to_marker_letter() {
        let pair = LetterPair::new('E', 'F');
        assert_eq!(Resolution::Unresolved.letter(&pair, 'X'), 'X');
        assert_eq!(Resolution::Direct { pole: Pole::Negative }.letter(&pair, 'X'), 'F');
    }
}
