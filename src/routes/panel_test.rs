use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::api::{ApiError, FinalizeResult, JobHandle, JobStatus};
use crate::routes;
use crate::session::{COOKIE_NAME, PanelSession};
use crate::state::test_helpers::{MockJobApi, test_app_state};

const TOKEN: &str = "test-session-token";

fn cookie() -> String {
    format!("{COOKIE_NAME}={TOKEN}")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.clone().oneshot(request).await.expect("router should respond");
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().expect("set-cookie should be ascii").to_owned());
    let bytes = response.into_body().collect().await.expect("body should collect").to_bytes();
    (status, set_cookie, String::from_utf8(bytes.to_vec()).expect("body should be utf-8"))
}

fn get_page() -> Request<Body> {
    Request::get("/").header(header::COOKIE, cookie()).body(Body::empty()).unwrap()
}

fn post_form(path: &str, body: &str) -> Request<Body> {
    Request::post(path)
        .header(header::COOKIE, cookie())
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn post_empty(path: &str) -> Request<Body> {
    Request::post(path).header(header::COOKIE, cookie()).body(Body::empty()).unwrap()
}

// =============================================================================
// page + session cookie
// =============================================================================

#[tokio::test]
async fn healthz_ok() {
    let (state, _) = test_app_state(MockJobApi::default());
    let app = routes::app(state);
    let (status, _, _) = send(&app, Request::get("/healthz").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn first_visit_sets_session_cookie() {
    let (state, _) = test_app_state(MockJobApi::default());
    let app = routes::app(state);

    let (status, set_cookie, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    let set_cookie = set_cookie.expect("new session should set a cookie");
    assert!(set_cookie.starts_with(&format!("{COOKIE_NAME}=")));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(body.contains("Linux Patching Assistant (POC)"));
    assert!(!body.contains("Check Status"));
}

#[tokio::test]
async fn existing_cookie_is_reused() {
    let (state, _) = test_app_state(MockJobApi::default());
    let app = routes::app(state);

    let (_, set_cookie, _) = send(&app, get_page()).await;

    assert!(set_cookie.is_none());
}

#[tokio::test]
async fn page_shows_job_actions_for_stored_job() {
    let (state, _) = test_app_state(MockJobApi::default());
    state.sessions.put(TOKEN, PanelSession { job_id: Some("abc123".into()) });
    let app = routes::app(state);

    let (_, _, body) = send(&app, get_page()).await;

    assert!(body.contains("Check Status for Job ID abc123"));
    assert!(body.contains("Download Results"));
}

// =============================================================================
// POST /run
// =============================================================================

#[tokio::test]
async fn run_launches_and_stores_job() {
    let (state, api) = test_app_state(MockJobApi::default().with_launch(Ok(JobHandle { job_id: "abc123".into() })));
    let app = routes::app(state.clone());

    let (status, _, body) = send(&app, post_form("/run", "operation=pre-check&wave=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(api.calls(), vec![r#"launch {"template_name":"pre-check","wave":2}"#]);
    assert!(body.contains("Job launched successfully! Job ID: abc123"));
    assert!(body.contains("Check Status for Job ID abc123"));
    assert_eq!(state.sessions.checkout(TOKEN).job_id(), Some("abc123"));
}

#[tokio::test]
async fn run_accepts_label_with_encoded_plus() {
    let (state, api) = test_app_state(MockJobApi::default().with_launch(Ok(JobHandle { job_id: "j".into() })));
    let app = routes::app(state);

    let (status, _, _) = send(&app, post_form("/run", "operation=Apply%2BReboot&wave=4")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(api.calls(), vec![r#"launch {"template_name":"apply-reboot","wave":4}"#]);
}

#[tokio::test]
async fn run_http_error_keeps_previous_job() {
    let (state, _) = test_app_state(MockJobApi::default().with_launch(Err(ApiError::Http {
        status: 500,
        body: "template not found".into(),
    })));
    state.sessions.put(TOKEN, PanelSession { job_id: Some("previous".into()) });
    let app = routes::app(state.clone());

    let (status, _, body) = send(&app, post_form("/run", "operation=post-check&wave=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: template not found"));
    assert_eq!(state.sessions.checkout(TOKEN).job_id(), Some("previous"));
}

#[tokio::test]
async fn run_rejects_out_of_range_wave_without_calling_api() {
    for wave in ["0", "5", "-1", "two", ""] {
        let (state, api) = test_app_state(MockJobApi::default());
        let app = routes::app(state.clone());

        let (status, _, body) = send(&app, post_form("/run", &format!("operation=pre-check&wave={wave}"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "wave {wave:?}");
        assert!(body.contains("notice error"), "wave {wave:?}");
        assert!(api.calls().is_empty(), "wave {wave:?}");
        assert!(state.sessions.is_empty(), "wave {wave:?}");
    }
}

#[tokio::test]
async fn run_rejects_unknown_operation() {
    let (state, api) = test_app_state(MockJobApi::default());
    let app = routes::app(state);

    let (status, _, body) = send(&app, post_form("/run", "operation=wipe-disks&wave=1")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Error: unknown operation: wipe-disks"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn run_missing_fields_is_rejected_as_input_error() {
    let (state, api) = test_app_state(MockJobApi::default());
    let app = routes::app(state);

    let (status, _, _) = send(&app, post_form("/run", "")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(api.calls().is_empty());
}

// =============================================================================
// POST /status, POST /finalize
// =============================================================================

#[tokio::test]
async fn status_without_job_is_conflict() {
    let (state, api) = test_app_state(MockJobApi::default());
    let app = routes::app(state);

    let (status, _, body) = send(&app, post_empty("/status")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("No job has been launched in this session yet."));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn finalize_without_job_is_conflict() {
    let (state, api) = test_app_state(MockJobApi::default());
    let app = routes::app(state);

    let (status, _, _) = send(&app, post_empty("/finalize")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn status_timeout_is_reported_and_panel_stays_usable() {
    let api = MockJobApi::default()
        .with_status(Err(ApiError::Transport("operation timed out".into())))
        .with_status(Ok(JobStatus { status: "running".into() }));
    let (state, _) = test_app_state(api);
    state.sessions.put(TOKEN, PanelSession { job_id: Some("abc123".into()) });
    let app = routes::app(state);

    let (status, _, body) = send(&app, post_empty("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: operation timed out"));
    assert!(body.contains("Check Status for Job ID abc123"));

    let (_, _, body) = send(&app, post_empty("/status")).await;
    assert!(body.contains("Status: running"));
}

#[tokio::test]
async fn full_flow_through_routes() {
    let api = MockJobApi::default()
        .with_launch(Ok(JobHandle { job_id: "abc123".into() }))
        .with_status(Ok(JobStatus { status: "running".into() }))
        .with_finalize(Ok(FinalizeResult {
            success_file: "/out/ok.csv".into(),
            failure_file: "/out/fail.csv".into(),
        }));
    let (state, api) = test_app_state(api);
    let app = routes::app(state);

    send(&app, post_form("/run", "operation=pre-check&wave=2")).await;
    let (_, _, status_body) = send(&app, post_empty("/status")).await;
    let (_, _, finalize_body) = send(&app, post_empty("/finalize")).await;

    assert!(status_body.contains("Status: running"));
    assert!(finalize_body.contains("Reports generated successfully!"));
    assert!(finalize_body.contains("Success File: /out/ok.csv"));
    assert!(finalize_body.contains("Failure File: /out/fail.csv"));
    assert_eq!(api.calls(), vec![
        r#"launch {"template_name":"pre-check","wave":2}"#.to_string(),
        "status abc123".to_string(),
        "finalize abc123".to_string(),
    ]);
}
