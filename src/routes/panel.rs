//! Panel routes — page render and the three form actions.

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::api::{JobRequest, Operation, Wave};
use crate::panel::{self as actions, Notice};
use crate::session::{self, COOKIE_NAME, PanelSession};
use crate::state::AppState;
use crate::view::{self, Feedback, FormValues};

// =============================================================================
// SESSION COOKIE
// =============================================================================

/// Session token from the cookie jar, minting and setting a new one if absent.
fn session_token(jar: CookieJar) -> (CookieJar, String) {
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value).filter(|t| !t.is_empty()) {
        let token = token.to_owned();
        return (jar, token);
    }

    let token = session::generate_token();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), token)
}

fn respond(jar: CookieJar, status: StatusCode, session: &PanelSession, form: FormValues, feedback: Feedback) -> Response {
    let html = view::render_page(session, form, &feedback);
    (status, jar, Html(html)).into_response()
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /` — render the panel for this browser's session.
pub async fn page(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, token) = session_token(jar);
    let session = state.sessions.checkout(&token);
    respond(jar, StatusCode::OK, &session, FormValues::default(), Feedback::None)
}

/// Fields default to empty so missing input gets the same error page as bad input.
#[derive(Debug, Deserialize)]
pub struct RunForm {
    #[serde(default)]
    operation: String,
    #[serde(default)]
    wave: String,
}

/// `POST /run` — launch a job for the selected operation and wave.
pub async fn run(State(state): State<AppState>, jar: CookieJar, Form(form): Form<RunForm>) -> Response {
    let (jar, token) = session_token(jar);
    let mut session = state.sessions.checkout(&token);

    let operation = Operation::parse(&form.operation);
    let wave = Wave::parse(&form.wave);
    let values = FormValues {
        operation: operation.clone().unwrap_or_default(),
        wave: wave.clone().unwrap_or_default(),
    };

    let (operation, wave) = match (operation, wave) {
        (Ok(operation), Ok(wave)) => (operation, wave),
        (Err(e), _) | (_, Err(e)) => {
            tracing::debug!(error = %e, "run form rejected");
            let feedback = Feedback::Run(vec![Notice::error(format!("Error: {e}"))]);
            return respond(jar, StatusCode::UNPROCESSABLE_ENTITY, &session, values, feedback);
        }
    };

    let before = session.clone();
    let notices = actions::submit(state.api.as_ref(), &mut session, JobRequest::new(operation, wave)).await;
    if session != before {
        state.sessions.put(&token, session.clone());
    }

    respond(jar, StatusCode::OK, &session, values, Feedback::Run(notices))
}

/// `POST /status` — fetch the status of the session's job.
pub async fn status(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, token) = session_token(jar);
    let session = state.sessions.checkout(&token);

    let (code, notices) = match actions::check_status(state.api.as_ref(), &session).await {
        Ok(notices) => (StatusCode::OK, notices),
        Err(e) => (StatusCode::CONFLICT, vec![Notice::error(e.to_string())]),
    };
    respond(jar, code, &session, FormValues::default(), Feedback::Job(notices))
}

/// `POST /finalize` — collect the report files of the session's job.
pub async fn finalize(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, token) = session_token(jar);
    let session = state.sessions.checkout(&token);

    let (code, notices) = match actions::finalize(state.api.as_ref(), &session).await {
        Ok(notices) => (StatusCode::OK, notices),
        Err(e) => (StatusCode::CONFLICT, vec![Notice::error(e.to_string())]),
    };
    respond(jar, code, &session, FormValues::default(), Feedback::Job(notices))
}

#[cfg(test)]
#[path = "panel_test.rs"]
mod tests;
