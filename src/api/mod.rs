//! Automation API — the remote service that launches and tracks patch jobs.
//!
//! DESIGN
//! ======
//! Handlers talk to the API through the `JobApi` trait so tests can swap in
//! a scripted mock. `JobApiClient` is the reqwest-backed implementation used
//! by the binary. One attempt per call: no retry, no backoff.

pub mod client;
pub mod types;

pub use client::JobApiClient;
pub use types::{ApiError, FinalizeResult, JobHandle, JobRequest, JobStatus, Operation, Wave};

/// The three endpoints the panel drives.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// `POST /run` — launch a job from a template for one wave.
    async fn launch(&self, request: &JobRequest) -> Result<JobHandle, ApiError>;

    /// `GET /status/{job_id}`.
    async fn status(&self, job_id: &str) -> Result<JobStatus, ApiError>;

    /// `POST /finalize/{job_id}` — collect the success/failure reports.
    async fn finalize(&self, job_id: &str) -> Result<FinalizeResult, ApiError>;
}
