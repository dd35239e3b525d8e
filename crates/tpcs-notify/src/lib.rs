//! Delivery of scoring results to the respondent.

pub mod error;
pub mod message;
pub mod notifier;

pub use error::NotifyError;
pub use message::{compose, Message};
pub use notifier::{Delivery, DisabledNotifier, NotifyConfig, Notifier, ResendNotifier};
