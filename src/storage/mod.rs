//! Durable client state: the id of the last saved submission.
//!
//! Stored as a single plain-text file so an edit can be resumed in a later
//! session.

mod error;
mod store;

pub use error::StorageError;
pub use store::{SubmissionStore, default_data_dir};
