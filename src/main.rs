mod api;
mod config;
mod panel;
mod routes;
mod session;
mod state;
mod view;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    // A missing .env is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::PanelConfig::from_env().expect("invalid configuration");
    let client = api::JobApiClient::new(&config.api_base_url, config.timeouts).expect("automation API client init failed");
    tracing::info!(api = %client.base_url(), "automation API client initialized");

    let state = state::AppState::new(Arc::new(client));
    let app = routes::app(state);

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "patch panel listening");
    axum::serve(listener, app).await.expect("server failed");
}
