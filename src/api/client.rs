//! reqwest client for the automation API.
//!
//! Thin HTTP wrapper for `/run`, `/status/{id}`, and `/finalize/{id}`.
//! Anything other than a 200 is surfaced with its body untouched.

use std::error::Error as _;
use std::fmt::Write as _;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::JobApi;
use super::types::{ApiError, FinalizeResult, JobHandle, JobRequest, JobStatus};
use crate::config::ApiTimeouts;

// =============================================================================
// CLIENT
// =============================================================================

pub struct JobApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeouts: ApiTimeouts,
}

impl JobApiClient {
    /// Build a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is unusable as a base or the HTTP client
    /// fails to build.
    pub fn new(base_url: &str, timeouts: ApiTimeouts) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::ClientBuild(format!("base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::ClientBuild(format!("base URL cannot carry a path: {base_url}")));
        }
        let http = reqwest::Client::builder()
            .connect_timeout(timeouts.connect)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url, timeouts })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so a job id can never escape its slot.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait::async_trait]
impl JobApi for JobApiClient {
    async fn launch(&self, request: &JobRequest) -> Result<JobHandle, ApiError> {
        let url = self.endpoint(&["run"]);
        let builder = self.http.post(url).json(request).timeout(self.timeouts.submit);
        send(builder).await
    }

    async fn status(&self, job_id: &str) -> Result<JobStatus, ApiError> {
        let url = self.endpoint(&["status", job_id]);
        let builder = self.http.get(url).timeout(self.timeouts.status);
        send(builder).await
    }

    async fn finalize(&self, job_id: &str) -> Result<FinalizeResult, ApiError> {
        let url = self.endpoint(&["finalize", job_id]);
        let builder = self.http.post(url).timeout(self.timeouts.finalize);
        send(builder).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await.map_err(transport_error)?;

    let status = response.status().as_u16();
    let text = response.text().await.map_err(transport_error)?;
    if status != 200 {
        return Err(ApiError::Http { status, body: text });
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Transport(format!("invalid response body: {e}")))
}

/// reqwest's top-level message hides the cause ("error sending request for
/// url ..."), so fold the whole source chain into one line.
fn transport_error(err: reqwest::Error) -> ApiError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(message, ": {cause}");
        source = cause.source();
    }
    ApiError::Transport(message)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
