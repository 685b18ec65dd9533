use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::envelope::classify_save_failure;
use super::error::ApiError;
use crate::model::{Sector, Submission};

/// The three backend operations the form needs.
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// Fetches the full, ordered sector list.
    async fn list_sectors(&self) -> Result<Vec<Sector>, ApiError>;

    /// Fetches one submission by id.
    async fn get_submission(&self, id: i64) -> Result<Submission, ApiError>;

    /// Creates a submission when `existing_id` is `None`, otherwise replaces
    /// the submission with that id. Returns the persisted record.
    async fn save_submission(
        &self,
        body: &Submission,
        existing_id: Option<i64>,
    ) -> Result<Submission, ApiError>;
}

/// [`SubmissionApi`] over HTTP/JSON.
///
/// No caching and no retries: each call is exactly one request.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:8080/api`).
    ///
    /// Fails with [`ApiError::Transport`] if the TLS backend cannot be set up.
    pub fn new(base_url: &Url) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client that reuses an existing [`reqwest::Client`].
    ///
    /// Any query or fragment on `base_url` is dropped; endpoint paths are
    /// appended to the path alone.
    pub fn with_client(client: Client, base_url: &Url) -> Self {
        let mut base_url = base_url.clone();
        base_url.set_query(None);
        base_url.set_fragment(None);
        Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the base URL all paths are joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Sends a GET and decodes a success body; any other status is an
    /// [`ApiError::Http`] carrying the body text.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await.inspect_err(|e| {
            tracing::warn!(%url, error = %e, "request failed");
        })?;

        let status = response.status();
        tracing::debug!(%url, %status, "response");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%url, %status, "non-success response");
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }
        decode(response).await
    }
}

#[async_trait]
impl SubmissionApi for HttpApi {
    async fn list_sectors(&self) -> Result<Vec<Sector>, ApiError> {
        self.get_json("sectors").await
    }

    async fn get_submission(&self, id: i64) -> Result<Submission, ApiError> {
        self.get_json(&format!("submissions/{id}")).await
    }

    async fn save_submission(
        &self,
        body: &Submission,
        existing_id: Option<i64>,
    ) -> Result<Submission, ApiError> {
        let request = match existing_id {
            Some(id) => self.client.put(self.endpoint(&format!("submissions/{id}"))),
            None => self.client.post(self.endpoint("submissions")),
        };
        tracing::debug!(?existing_id, "saving submission");

        let response = request.json(body).send().await.inspect_err(|e| {
            tracing::warn!(error = %e, "save request failed");
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = classify_save_failure(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &text,
            );
            tracing::warn!(%status, error = %err, "save rejected");
            return Err(err);
        }

        let saved: Submission = decode(response).await?;
        tracing::info!(id = ?saved.id, "submission saved");
        Ok(saved)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
