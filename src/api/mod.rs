//! REST client for the sectors and submissions endpoints.

mod client;
mod envelope;
mod error;
#[cfg(test)]
pub(crate) mod fake;

pub use client::{HttpApi, SubmissionApi};
pub use error::ApiError;
