use crate::model::FieldErrors;

/// Errors that can occur while talking to the REST backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A read request returned a non-success status.
    #[error("HTTP error! Status: {status}. Details: {}", details(.body))]
    Http {
        /// Numeric HTTP status code.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// The backend rejected a save with per-field messages.
    #[error("the server rejected {} field(s)", .fields.len())]
    Validation {
        /// Messages keyed by the offending field.
        fields: FieldErrors,
    },

    /// A save failed for a reason not tied to a field.
    #[error("{message}")]
    Submission {
        /// Human-readable failure description.
        message: String,
    },

    /// A success response carried a body that is not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

fn details(body: &str) -> &str {
    if body.trim().is_empty() {
        "No additional details."
    } else {
        body
    }
}
