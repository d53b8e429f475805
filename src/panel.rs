//! Job control panel actions.
//!
//! DESIGN
//! ======
//! Each button on the page maps to one function here. A function makes at
//! most one call to the automation API and turns the outcome into notices
//! for the page. Remote failures never propagate: they become error notices
//! and the session is left as it was.
//!
//! Only a successful `submit` writes the session. `check_status` and
//! `finalize` read the stored job id and refuse to run without one.

use crate::api::{ApiError, JobApi, JobRequest};
use crate::session::PanelSession;

// =============================================================================
// NOTICES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
    /// Plain line with no banner styling.
    Text,
}

/// One message rendered on the panel page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: Level::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { level: Level::Info, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: Level::Error, text: text.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self { level: Level::Text, text: text.into() }
    }
}

/// Status or finalize was requested before any job was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No job has been launched in this session yet.")]
pub struct NoActiveJob;

/// Body text for an HTTP error, the message for anything else.
fn error_detail(err: &ApiError) -> String {
    match err {
        ApiError::Http { body, .. } => body.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Launch a job. On success the returned id replaces the session's job id.
pub async fn submit(api: &dyn JobApi, session: &mut PanelSession, request: JobRequest) -> Vec<Notice> {
    let template = request.operation.template_name();
    let wave = request.wave.get();

    match api.launch(&request).await {
        Ok(handle) => {
            tracing::info!(job_id = %handle.job_id, template, wave, "job launched");
            let notice = Notice::success(format!("Job launched successfully! Job ID: {}", handle.job_id));
            session.job_id = Some(handle.job_id);
            vec![notice]
        }
        Err(ApiError::Http { status, body }) => {
            tracing::warn!(status, template, wave, "job launch rejected");
            vec![Notice::error(format!("Error: {body}"))]
        }
        Err(e) => {
            tracing::warn!(error = %e, template, wave, "job launch failed");
            vec![Notice::error(format!("Failed to call API: {e}"))]
        }
    }
}

/// Fetch the status of the session's job.
///
/// # Errors
///
/// Returns [`NoActiveJob`] without calling the API if no job id is stored.
pub async fn check_status(api: &dyn JobApi, session: &PanelSession) -> Result<Vec<Notice>, NoActiveJob> {
    let job_id = session.job_id().ok_or(NoActiveJob)?;

    let notices = match api.status(job_id).await {
        Ok(status) => {
            tracing::info!(job_id, status = %status.status, "job status fetched");
            vec![Notice::info(format!("Status: {}", status.status))]
        }
        Err(e) => {
            tracing::warn!(job_id, error = %e, "job status failed");
            vec![Notice::error(format!("Error: {}", error_detail(&e)))]
        }
    };
    Ok(notices)
}

/// Finalize the session's job and show where its reports were written.
///
/// # Errors
///
/// Returns [`NoActiveJob`] without calling the API if no job id is stored.
pub async fn finalize(api: &dyn JobApi, session: &PanelSession) -> Result<Vec<Notice>, NoActiveJob> {
    let job_id = session.job_id().ok_or(NoActiveJob)?;

    let notices = match api.finalize(job_id).await {
        Ok(result) => {
            tracing::info!(job_id, success_file = %result.success_file, failure_file = %result.failure_file, "job finalized");
            vec![
                Notice::success("Reports generated successfully!"),
                Notice::text(format!("✅ Success File: {}", result.success_file)),
                Notice::text(format!("❌ Failure File: {}", result.failure_file)),
            ]
        }
        Err(e) => {
            tracing::warn!(job_id, error = %e, "job finalize failed");
            vec![Notice::error(format!("Error: {}", error_detail(&e)))]
        }
    };
    Ok(notices)
}

#[cfg(test)]
#[path = "panel_test.rs"]
mod tests;
