use std::time::Instant;

use crate::model::{Field, FieldErrors};

/// A success message that disappears once `expires_at` has passed.
///
/// `expires_at` is `None` when the delay is too large to represent as an
/// [`Instant`]; such a notice stays until the next submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessNotice {
    pub message: String,
    pub expires_at: Option<Instant>,
}

impl SuccessNotice {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// Messaging shown while the form is interactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    /// Messages attached to individual inputs.
    pub field_errors: FieldErrors,
    /// A failure not attributable to one field.
    pub general_error: Option<String>,
    pub success: Option<SuccessNotice>,
}

impl Feedback {
    /// Feedback carrying only a general error.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            general_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(field)
    }
}

/// Where the form is in its load/edit/save cycle.
///
/// Errors and messages only exist while [`Ready`](Phase::Ready); the other
/// phases have all controls disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Initial sectors and saved submission are being fetched.
    Loading,
    /// Interactive.
    Ready(Feedback),
    /// A save request is in flight.
    Submitting,
}

impl Phase {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns the feedback when ready.
    pub fn feedback(&self) -> Option<&Feedback> {
        match self {
            Self::Ready(feedback) => Some(feedback),
            _ => None,
        }
    }
}
