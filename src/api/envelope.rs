//! Classification of save-failure response bodies.
//!
//! Preferred shapes are `{"errors": {field: message}}` for field rejections
//! and `{"message": "..."}` for everything else. Older backends answer with
//! a bare `{field: message}` object; that shape is still recognised, but only
//! when every key names a known field and every value is a string, so that a
//! generic error object is never mistaken for field errors.

use serde_json::{Map, Value};

use super::error::ApiError;
use crate::model::{Field, FieldErrors};

/// Turns a non-success save response into an [`ApiError`].
///
/// `status` and `reason` build the fallback message used when the body
/// carries nothing usable.
pub(crate) fn classify_save_failure(status: u16, reason: &str, body: &str) -> ApiError {
    let fallback = || ApiError::Submission {
        message: if reason.is_empty() {
            format!("Server error: {status}.")
        } else {
            format!("Server error: {status} {reason}.")
        },
    };

    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };

    if let Some(Value::Object(errors)) = object.get("errors")
        && let Some(fields) = field_errors(errors)
    {
        return ApiError::Validation { fields };
    }

    if let Some(Value::String(message)) = object.get("message")
        && !message.trim().is_empty()
    {
        return ApiError::Submission {
            message: message.clone(),
        };
    }

    match field_errors(&object) {
        Some(fields) => ApiError::Validation { fields },
        None => fallback(),
    }
}

/// Reads a `{field: message}` object, or `None` if it is empty or has any
/// entry that is not a known field with a string message.
fn field_errors(object: &Map<String, Value>) -> Option<FieldErrors> {
    if object.is_empty() {
        return None;
    }
    object
        .iter()
        .map(|(key, value)| match (Field::from_key(key), value) {
            (Some(field), Value::String(message)) => Some((field, message.clone())),
            _ => None,
        })
        .collect()
}
