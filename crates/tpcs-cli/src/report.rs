use serde::Serialize;
use tpcs_intake::Submission;
use tpcs_notify::Delivery;
use tpcs_scoring::{ClassificationResult, ValidationError, ValidationReason};

/// Printed on stdout after a successful scoring.
#[derive(Debug, Serialize)]
pub struct ScoreReport<'a> {
    pub ok: bool,
    pub respondent_id: &'a str,
    pub email: &'a str,
    pub result: &'a ClassificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_error: Option<String>,
}

/// Printed on stdout when an answer is unusable.
#[derive(Debug, Serialize)]
pub struct RejectReport<'a> {
    pub ok: bool,
    pub respondent_id: &'a str,
    pub error: String,
    pub item: u8,
    pub raw: Option<&'a str>,
    pub reason: ValidationReason,
}

impl<'a> RejectReport<'a> {
    pub fn new(submission: &'a Submission, error: &'a ValidationError) -> Self {
        Self {
            ok: false,
            respondent_id: &submission.respondent_id,
            error: error.to_string(),
            item: error.item,
            raw: error.raw.as_deref(),
            reason: error.reason,
        }
    }
}

/// Printed by `validate` when every answer is usable.
#[derive(Debug, Serialize)]
pub struct ValidReport<'a> {
    pub ok: bool,
    pub respondent_id: &'a str,
    pub dialect: tpcs_intake::AnswerDialect,
}

pub fn render<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
