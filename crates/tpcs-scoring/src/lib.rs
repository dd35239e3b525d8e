//! Deterministic scoring for the 24-item TPCS questionnaire.
//!
//! The [`Scorer`] turns a validated [`AnswerSet`] into a [`ClassificationResult`]:
//! six dimension sums, four polarity letters, a family label and a response
//! quality assessment. It performs no I/O and holds no mutable state.

pub mod answers;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod polarity;
pub mod quality;
pub mod result;
pub mod scorer;

pub use answers::{AnswerSet, RawAnswers, ITEM_COUNT, MAX_ANSWER, MIN_ANSWER};
pub use config::{FamilyEntry, LetterPair, Preset, ScorerConfig, Thresholds};
pub use dimensions::{Dimension, DimensionSums, Intensity, IntrospectionLevel};
pub use error::{ConfigError, ValidationError, ValidationReason};
pub use polarity::{Pole, Resolution};
pub use quality::{QualityAssessment, QualityFlag};
pub use result::{ClassificationResult, DimensionReport, LetterOutcome};
pub use scorer::Scorer;
