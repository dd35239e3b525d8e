//! Turns questionnaire-platform webhook payloads into the raw answer map the
//! scorer consumes.

pub mod error;
pub mod likert;
pub mod submission;

pub use error::IntakeError;
pub use likert::normalize_answer;
pub use submission::{AnswerDialect, Submission};
