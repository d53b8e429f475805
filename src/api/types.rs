//! Automation API types — wire structs, operations, and errors.
//!
//! One typed struct per endpoint. Response bodies are decoded with serde;
//! a 200 body that does not match its struct is reported as a transport
//! error, same as a dropped connection.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by automation API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The API answered with something other than HTTP 200.
    #[error("API response error: status {status}: {body}")]
    Http { status: u16, body: String },

    /// The call did not produce a usable response: connect failure, timeout,
    /// unreadable body, or a body that failed to decode.
    #[error("{0}")]
    Transport(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

/// Errors produced while turning form input into a [`JobRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("wave must be a whole number, got {0:?}")]
    InvalidWave(String),

    #[error("wave {0} is out of range (expected {min}-{max})", min = Wave::MIN, max = Wave::MAX)]
    WaveOutOfRange(i64),
}

// =============================================================================
// OPERATION
// =============================================================================

/// Patching task the automation API knows how to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    #[default]
    PreCheck,
    ApplyReboot,
    PostCheck,
}

impl Operation {
    /// Selector order.
    pub const ALL: [Operation; 3] = [Self::PreCheck, Self::ApplyReboot, Self::PostCheck];

    /// Label shown in the task selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PreCheck => "Pre-check",
            Self::ApplyReboot => "Apply+Reboot",
            Self::PostCheck => "Post-check",
        }
    }

    /// Job template name sent to `POST /run`.
    #[must_use]
    pub fn template_name(self) -> &'static str {
        match self {
            Self::PreCheck => "pre-check",
            Self::ApplyReboot => "apply-reboot",
            Self::PostCheck => "post-check",
        }
    }

    /// Resolve a selector value. Accepts either the template name or the label.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.template_name() == raw || op.label() == raw)
            .ok_or_else(|| InputError::UnknownOperation(raw.to_owned()))
    }
}

// =============================================================================
// WAVE
// =============================================================================

/// Batch of target hosts a job applies to. Always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Wave(u8);

impl Wave {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(value: i64) -> Result<Self, InputError> {
        match u8::try_from(value) {
            Ok(wave) if (Self::MIN..=Self::MAX).contains(&wave) => Ok(Self(wave)),
            _ => Err(InputError::WaveOutOfRange(value)),
        }
    }

    /// Parse the raw text of the wave input.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let raw = raw.trim();
        let value = raw
            .parse::<i64>()
            .map_err(|_| InputError::InvalidWave(raw.to_owned()))?;
        Self::new(value)
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Wave {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of `POST /run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobRequest {
    #[serde(rename = "template_name")]
    pub operation: Operation,
    pub wave: Wave,
}

impl JobRequest {
    #[must_use]
    pub fn new(operation: Operation, wave: Wave) -> Self {
        Self { operation, wave }
    }
}

/// Response of `POST /run`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobHandle {
    pub job_id: String,
}

/// Response of `GET /status/{job_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobStatus {
    pub status: String,
}

/// Response of `POST /finalize/{job_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FinalizeResult {
    pub success_file: String,
    pub failure_file: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
