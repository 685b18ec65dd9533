//! In-memory [`SubmissionApi`] for exercising callers without a server.

use std::sync::Mutex;

use async_trait::async_trait;

use super::client::SubmissionApi;
use super::error::ApiError;
use crate::model::{Field, Sector, Submission};

/// A request the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    ListSectors,
    GetSubmission(i64),
    Create(Submission),
    Update(i64, Submission),
}

/// How the fake answers a save.
#[derive(Debug, Clone)]
pub(crate) enum SaveReply {
    /// Echo the request back with this id.
    Echo(i64),
    /// Echo the request back with this id and a different name.
    Rename(i64, &'static str),
    Fields(Vec<(Field, &'static str)>),
    Message(&'static str),
}

pub(crate) struct FakeApi {
    /// Sectors to return, or the HTTP status to fail with.
    pub sectors: Result<Vec<Sector>, u16>,
    pub submission: Result<Submission, u16>,
    pub save: SaveReply,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    /// Serves [`sample_sectors`], has no saved submission, and saves as id 42.
    pub fn new() -> Self {
        Self {
            sectors: Ok(sample_sectors()),
            submission: Err(404),
            save: SaveReply::Echo(42),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub(crate) fn http(status: u16) -> ApiError {
    ApiError::Http {
        status,
        body: String::new(),
    }
}

pub(crate) fn sample_sectors() -> Vec<Sector> {
    vec![
        Sector {
            id: 1,
            name: "A".into(),
            level: 0,
            parent_id: None,
        },
        Sector {
            id: 2,
            name: "B".into(),
            level: 1,
            parent_id: Some(1),
        },
    ]
}

#[async_trait]
impl SubmissionApi for FakeApi {
    async fn list_sectors(&self) -> Result<Vec<Sector>, ApiError> {
        self.record(Call::ListSectors);
        self.sectors.clone().map_err(http)
    }

    async fn get_submission(&self, id: i64) -> Result<Submission, ApiError> {
        self.record(Call::GetSubmission(id));
        self.submission.clone().map_err(http)
    }

    async fn save_submission(
        &self,
        body: &Submission,
        existing_id: Option<i64>,
    ) -> Result<Submission, ApiError> {
        self.record(match existing_id {
            Some(id) => Call::Update(id, body.clone()),
            None => Call::Create(body.clone()),
        });
        match &self.save {
            SaveReply::Echo(id) => Ok(Submission {
                id: Some(*id),
                ..body.clone()
            }),
            SaveReply::Rename(id, name) => Ok(Submission {
                id: Some(*id),
                name: (*name).into(),
                ..body.clone()
            }),
            SaveReply::Fields(fields) => Err(ApiError::Validation {
                fields: fields.iter().map(|(f, m)| (*f, m.to_string())).collect(),
            }),
            SaveReply::Message(message) => Err(ApiError::Submission {
                message: (*message).into(),
            }),
        }
    }
}
