use crate::answers::{AnswerSet, RawAnswers};
use crate::config::ScorerConfig;
use crate::dimensions::{Dimension, DimensionSums, Intensity, IntrospectionLevel};
use crate::error::{ConfigError, ValidationError};
use crate::polarity::{self, Resolution};
use crate::quality::QualityAssessment;
use crate::result::{ClassificationResult, DimensionReport, LetterOutcome};

/// Stateless scorer bound to one validated configuration.
///
/// `score` allocates only locals, so a shared `&Scorer` can serve any number
/// of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScorerConfig,
}

impl Scorer {
    pub fn new(config: ScorerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Validates `raw` and scores it. Fails on the first unusable item.
    pub fn score_raw(&self, raw: &RawAnswers) -> Result<ClassificationResult, ValidationError> {
        let answers = AnswerSet::from_raw(raw).inspect_err(|error| {
            tracing::debug!(
                target: "tpcs_scoring",
                item = error.item,
                reason = %error.reason,
                "answer set rejected"
            );
        })?;
        Ok(self.score(&answers))
    }

    pub fn score(&self, answers: &AnswerSet) -> ClassificationResult {
        let config = &self.config;
        let sums = DimensionSums::aggregate(answers, &config.inverted_items);

        let mut code = String::with_capacity(Dimension::LETTERS.len());
        let mut dimensions = Vec::with_capacity(Dimension::ALL.len());
        let mut letters = [config.unresolved; 4];

        for (slot, (dimension, pair)) in Dimension::LETTERS
            .into_iter()
            .zip(config.letters.iter())
            .enumerate()
        {
            let resolution = polarity::resolve(dimension, &sums, &config.tie_break);
            let letter = resolution.letter(pair, config.unresolved);
            letters[slot] = letter;
            code.push(letter);

            dimensions.push(DimensionReport {
                dimension,
                label: dimension.label(),
                raw: sums.get(dimension),
                polarity: Some(LetterOutcome { letter, resolution }),
                intensity: Some(Intensity::from_score(sums.get(dimension))),
                introspection: None,
            });
        }

        dimensions.push(DimensionReport {
            dimension: Dimension::D5,
            label: Dimension::D5.label(),
            raw: sums.get(Dimension::D5),
            polarity: None,
            intensity: None,
            introspection: None,
        });
        dimensions.push(DimensionReport {
            dimension: Dimension::D6,
            label: Dimension::D6.label(),
            raw: sums.get(Dimension::D6),
            polarity: None,
            intensity: None,
            introspection: Some(IntrospectionLevel::from_score(sums.get(Dimension::D6))),
        });

        let (family, family_resolved) = match config.family_for(letters[2], letters[3]) {
            Some(label) => (label.to_string(), true),
            None => (config.default_family.clone(), false),
        };

        let quality = QualityAssessment::assess(answers, &sums, &config.thresholds);

        let unresolved = dimensions
            .iter()
            .filter(|report| {
                report
                    .polarity
                    .is_some_and(|outcome| outcome.resolution == Resolution::Unresolved)
            })
            .count();
        tracing::debug!(
            target: "tpcs_scoring",
            code = %code,
            family = %family,
            unresolved,
            flags = ?quality.flags,
            "scored answer set"
        );

        ClassificationResult {
            code,
            family,
            family_resolved,
            dimensions,
            quality,
        }
    }
}
