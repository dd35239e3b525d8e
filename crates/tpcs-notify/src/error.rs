use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid recipient address {0:?}")]
    InvalidRecipient(String),

    #[error("email provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("email transport failed: {0}")]
    Transport(#[from] reqwest::Error),
}
