use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("missing email (top-level keys: {top_keys:?}, data keys: {data_keys:?})")]
    MissingEmail {
        top_keys: Vec<String>,
        data_keys: Vec<String>,
    },

    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),
}
