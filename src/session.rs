//! Browser sessions.
//!
//! DESIGN
//! ======
//! Each browser carries an opaque `panel_session` cookie. The server keeps a
//! `PanelSession` per token, holding the one piece of state the panel needs:
//! the id of the last job launched from that browser.
//!
//! Handlers never hold the store lock across an outbound call. They check a
//! session out by value, run the action against it, and put it back.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;

pub const COOKIE_NAME: &str = "panel_session";

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex session token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Per-browser panel state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSession {
    /// Last job launched from this session. Replaced on every successful submit.
    pub job_id: Option<String>,
}

impl PanelSession {
    #[must_use]
    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }
}

/// Shared map of session token -> panel session.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, PanelSession>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PanelSession>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the session for `token`, or a fresh one if none is stored.
    #[must_use]
    pub fn checkout(&self, token: &str) -> PanelSession {
        self.lock().get(token).cloned().unwrap_or_default()
    }

    /// Store `session` under `token`, replacing whatever was there.
    pub fn put(&self, token: &str, session: PanelSession) {
        self.lock().insert(token.to_owned(), session);
    }

    #[cfg(test)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
