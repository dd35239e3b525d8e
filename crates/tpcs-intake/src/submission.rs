use serde::Serialize;
use serde_json::{Map, Value};
use tpcs_scoring::{RawAnswers, ITEM_COUNT};

use crate::error::IntakeError;
use crate::likert::normalize_answer;

const EMAIL_DATA_KEYS: &[&str] = &[
    "email",
    "Email",
    "E-mail",
    "Adresse email",
    "Adresse e-mail",
];

const UNKNOWN_RESPONDENT: &str = "unknown";

/// Where in the payload the answers were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerDialect {
    /// Top-level `answers: [{ key, value }, ...]`.
    KeyValueList,
    /// `data["1"]`..`data["24"]` or `data["Q1"]`..`data["Q24"]`.
    DataFields,
    /// `data.answers` object keyed by item number.
    DataAnswersObject,
    /// No dialect produced any answer.
    Empty,
}

/// A webhook submission reduced to what the scorer and the notifier need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub email: String,
    pub respondent_id: String,
    pub dialect: AnswerDialect,
    /// Label-normalized answers; range and type checks are left to the scorer.
    #[serde(skip)]
    pub answers: RawAnswers,
}

impl Submission {
    pub fn from_slice(body: &[u8]) -> Result<Self, IntakeError> {
        let payload: Value = serde_json::from_slice(body)?;
        Self::from_json(&payload)
    }

    pub fn from_json(payload: &Value) -> Result<Self, IntakeError> {
        let body = payload.as_object().ok_or(IntakeError::NotAnObject)?;
        let empty = Map::new();
        let data = body.get("data").and_then(Value::as_object).unwrap_or(&empty);

        let email = find_email(body, data).ok_or_else(|| {
            let error = IntakeError::MissingEmail {
                top_keys: sorted_keys(body),
                data_keys: sorted_keys(data),
            };
            tracing::warn!(target: "tpcs_intake", %error, "submission rejected");
            error
        })?;

        let (dialect, answers) = extract_answers(body, data);
        let answers = answers
            .into_iter()
            .map(|(item, value)| (item, normalize_answer(&value)))
            .collect();

        let respondent_id = find_respondent_id(body, data).unwrap_or_else(|| UNKNOWN_RESPONDENT.to_string());

        tracing::debug!(
            target: "tpcs_intake",
            respondent_id = %respondent_id,
            dialect = ?dialect,
            "normalized submission"
        );

        Ok(Self {
            email,
            respondent_id,
            dialect,
            answers,
        })
    }
}

fn sorted_keys(map: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn find_email(body: &Map<String, Value>, data: &Map<String, Value>) -> Option<String> {
    EMAIL_DATA_KEYS
        .iter()
        .filter_map(|key| data.get(*key))
        .chain(body.get("user").and_then(|user| user.get("email")))
        .chain(body.get("email"))
        .find_map(non_empty_str)
}

/// First usable id among `data.respondent_id`, `submissionId` and
/// `submission_id`; null or blank values fall through to the next source.
fn find_respondent_id(body: &Map<String, Value>, data: &Map<String, Value>) -> Option<String> {
    [
        data.get("respondent_id"),
        body.get("submissionId"),
        body.get("submission_id"),
    ]
    .into_iter()
    .flatten()
    .find_map(render_id)
}

fn render_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => Some(number.to_string()),
        other => non_empty_str(other),
    }
}

fn extract_answers(body: &Map<String, Value>, data: &Map<String, Value>) -> (AnswerDialect, RawAnswers) {
    let from_list = key_value_list(body);
    if !from_list.is_empty() {
        return (AnswerDialect::KeyValueList, from_list);
    }

    let from_fields = data_fields(data);
    if !from_fields.is_empty() {
        return (AnswerDialect::DataFields, from_fields);
    }

    let from_object = data
        .get("answers")
        .and_then(Value::as_object)
        .map(numbered_keys)
        .unwrap_or_default();
    if !from_object.is_empty() {
        return (AnswerDialect::DataAnswersObject, from_object);
    }

    (AnswerDialect::Empty, RawAnswers::new())
}

fn items() -> impl Iterator<Item = u8> {
    1..=ITEM_COUNT as u8
}

fn key_value_list(body: &Map<String, Value>) -> RawAnswers {
    let Some(entries) = body.get("answers").and_then(Value::as_array) else {
        return RawAnswers::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let item = parse_item(entry.get("key")?)?;
            let value = entry.get("value").cloned().unwrap_or(Value::Null);
            Some((item, value))
        })
        .collect()
}

fn parse_item(key: &Value) -> Option<u8> {
    match key {
        Value::Number(number) => number.as_u64().and_then(|n| u8::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn data_fields(data: &Map<String, Value>) -> RawAnswers {
    items()
        .filter_map(|item| {
            data.get(&item.to_string())
                .or_else(|| data.get(&format!("Q{item}")))
                .map(|value| (item, value.clone()))
        })
        .collect()
}

fn numbered_keys(answers: &Map<String, Value>) -> RawAnswers {
    items()
        .filter_map(|item| answers.get(&item.to_string()).map(|value| (item, value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn email_lookup_prefers_data_fields() {
        let payload = json!({
            "email": "top@example.com",
            "user": { "email": "user@example.com" },
            "data": { "Adresse e-mail": " data@example.com " }
        });
        let data = payload["data"].as_object().unwrap();
        assert_eq!(
            find_email(payload.as_object().unwrap(), data),
            Some("data@example.com".to_string())
        );
    }

    #[test]
    fn email_falls_back_to_user_then_top_level() {
        let user = json!({ "user": { "email": "user@example.com" }, "email": "top@example.com" });
        let empty = Map::new();
        assert_eq!(find_email(user.as_object().unwrap(), &empty), Some("user@example.com".into()));

        let top = json!({ "email": "top@example.com", "data": { "email": "" } });
        let data = top["data"].as_object().unwrap();
        assert_eq!(find_email(top.as_object().unwrap(), data), Some("top@example.com".into()));
    }

    #[test]
    fn missing_email_lists_keys_seen() {
        let payload = json!({ "eventId": "x", "data": { "1": 2 } });
        let error = Submission::from_json(&payload).unwrap_err();
        match error {
            IntakeError::MissingEmail { top_keys, data_keys } => {
                assert_eq!(top_keys, vec!["data".to_string(), "eventId".to_string()]);
                assert_eq!(data_keys, vec!["1".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(matches!(Submission::from_json(&json!([1, 2])), Err(IntakeError::NotAnObject)));
    }

    #[test]
    fn key_value_list_accepts_numeric_and_string_keys() {
        let payload = json!({
            "email": "a@b.c",
            "answers": [
                { "key": "1", "value": "Neutre" },
                { "key": 2, "value": 3 },
                null,
                { "key": "not-an-item", "value": 1 }
            ]
        });
        let submission = Submission::from_json(&payload).unwrap();
        assert_eq!(submission.dialect, AnswerDialect::KeyValueList);
        assert_eq!(submission.answers.get(&1), Some(&json!(0)));
        assert_eq!(submission.answers.get(&2), Some(&json!(3)));
        assert_eq!(submission.answers.len(), 2);
    }

    #[test]
    fn data_fields_accept_bare_and_q_prefixed_keys() {
        let payload = json!({
            "email": "a@b.c",
            "data": { "1": -1, "Q2": "Plutôt d'accord", "Q3": 5 }
        });
        let submission = Submission::from_json(&payload).unwrap();
        assert_eq!(submission.dialect, AnswerDialect::DataFields);
        assert_eq!(submission.answers.get(&2), Some(&json!(1)));
        assert_eq!(submission.answers.get(&3), Some(&json!(5)));
    }

    #[test]
    fn respondent_id_sources_in_order() {
        let payload = json!({ "email": "a@b.c", "submissionId": 981, "data": {} });
        assert_eq!(Submission::from_json(&payload).unwrap().respondent_id, "981");

        let payload = json!({ "email": "a@b.c", "submission_id": "s-1", "data": { "respondent_id": "r-9" } });
        assert_eq!(Submission::from_json(&payload).unwrap().respondent_id, "r-9");

        let payload = json!({ "email": "a@b.c" });
        let submission = Submission::from_json(&payload).unwrap();
        assert_eq!(submission.respondent_id, "unknown");
        assert_eq!(submission.dialect, AnswerDialect::Empty);
    }

    #[test]
    fn null_or_blank_respondent_id_falls_through() {
        for placeholder in [json!(null), json!(""), json!("   ")] {
            let payload = json!({
                "email": "a@b.c",
                "submissionId": "sub-7",
                "data": { "respondent_id": placeholder }
            });
            assert_eq!(Submission::from_json(&payload).unwrap().respondent_id, "sub-7");
        }

        let payload = json!({
            "email": "a@b.c",
            "submissionId": null,
            "submission_id": 12,
            "data": { "respondent_id": "" }
        });
        assert_eq!(Submission::from_json(&payload).unwrap().respondent_id, "12");
    }
}
