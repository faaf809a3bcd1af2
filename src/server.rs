//! Dashboard HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};

use crate::dashboard::html::REFRESH_PATH;
use crate::dashboard::Dashboard;

/// Creates the dashboard router with all routes.
pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index))
        .route(REFRESH_PATH, post(refresh))
        .route("/healthz", get(health))
        .with_state(dashboard)
}

async fn index(State(dashboard): State<Arc<Dashboard>>) -> Html<String> {
    Html(dashboard.render_html().await)
}

async fn refresh(State(dashboard): State<Arc<Dashboard>>) -> Redirect {
    dashboard.refresh().await;
    Redirect::to("/")
}

async fn health() -> &'static str {
    "ok"
}

/// Serve the dashboard until Ctrl-C.
///
/// # Errors
/// Returns error if the listener fails to bind or the server stops abnormally.
pub async fn serve(dashboard: Arc<Dashboard>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Dashboard available on http://{}", listener.local_addr()?);

    axum::serve(listener, router(dashboard))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            log::info!("Shutting down");
        })
        .await
}
