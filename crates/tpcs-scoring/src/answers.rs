use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{ValidationError, ValidationReason};

pub const ITEM_COUNT: usize = 24;
pub const MIN_ANSWER: i8 = -3;
pub const MAX_ANSWER: i8 = 3;

/// Answers keyed by item number (1..=24) as a collaborator delivered them.
pub type RawAnswers = BTreeMap<u8, Value>;

/// Exactly 24 Likert answers, each in `[-3, 3]`.
///
/// The only way to obtain one is through validation, so every `AnswerSet` in
/// circulation is complete and in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnswerSet([i8; ITEM_COUNT]);

impl AnswerSet {
    /// Builds a set from typed values; `values[0]` is item 1.
    pub fn new(values: [i8; ITEM_COUNT]) -> Result<Self, ValidationError> {
        for (item, value) in (1_u8..).zip(values.iter()) {
            if !(MIN_ANSWER..=MAX_ANSWER).contains(value) {
                return Err(ValidationError::new(
                    item,
                    Some(value.to_string()),
                    ValidationReason::OutOfRange,
                ));
            }
        }
        Ok(Self(values))
    }

    /// Validates a raw answer map, failing on the lowest offending item.
    ///
    /// Numbers must be integral; numeric strings are accepted after trimming.
    /// Keys outside `1..=24` are ignored.
    pub fn from_raw(raw: &RawAnswers) -> Result<Self, ValidationError> {
        let mut values = [0_i8; ITEM_COUNT];
        for (item, slot) in (1_u8..).zip(values.iter_mut()) {
            *slot = validate_item(item, raw.get(&item))?;
        }
        Ok(Self(values))
    }

    /// Raw answer for a 1-based item number.
    pub fn get(&self, item: u8) -> Option<i8> {
        let index = usize::from(item).checked_sub(1)?;
        self.0.get(index).copied()
    }

    pub fn values(&self) -> &[i8; ITEM_COUNT] {
        &self.0
    }

    /// `(item, value)` pairs in item order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, i8)> + '_ {
        (1_u8..).zip(self.0.iter().copied())
    }
}

fn validate_item(item: u8, raw: Option<&Value>) -> Result<i8, ValidationError> {
    let Some(value) = raw else {
        return Err(ValidationError::new(item, None, ValidationReason::Missing));
    };

    let reject = |reason| ValidationError::new(item, Some(render_raw(value)), reason);

    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    let number = match number {
        Some(number) if number.is_finite() => number,
        _ => return Err(reject(ValidationReason::NotNumeric)),
    };

    if number.fract() != 0.0 {
        return Err(reject(ValidationReason::NotIntegral));
    }
    if number < f64::from(MIN_ANSWER) || number > f64::from(MAX_ANSWER) {
        return Err(reject(ValidationReason::OutOfRange));
    }

    Ok(number as i8)
}

fn render_raw(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
