//! HTTP surface: the dashboard page and a health check.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use quantdash_core::DashError;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::Dashboard;
use crate::form::{DashboardForm, FormParams};
use crate::render::{render_error_page, render_page};

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The orchestrator every page render goes through.
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    /// Wrap a dashboard for sharing across handlers.
    #[must_use]
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}

/// HTTP status for a failed render.
#[must_use]
pub fn status_for(err: &DashError) -> StatusCode {
    match err {
        DashError::InvalidArg(_) => StatusCode::BAD_REQUEST,
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        e if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dashboard_handler(
    State(state): State<AppState>,
    Query(params): Query<FormParams>,
) -> Response {
    let today = chrono::Local::now().date_naive();
    let form = DashboardForm::from_params(params, state.dashboard.config(), today);

    let result = match form.query() {
        Ok(query) => state.dashboard.report(&query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => Html(render_page(&form, &report)).into_response(),
        Err(err) => {
            let status = status_for(&err);
            tracing::warn!(ticker = %form.ticker, kind = err.kind(), %status, error = %err, "dashboard render failed");
            (status, Html(render_error_page(&form, &err))).into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "connectors": state.dashboard.connector_names(),
        })),
    )
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
/// Returns an I/O error if the listener cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "quantdash listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
            tracing::info!("shutdown signal received");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_statuses() {
        assert_eq!(
            status_for(&DashError::InvalidArg("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DashError::not_found("history for ZZZZ")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DashError::AllProvidersFailed(vec![DashError::not_found("a")])),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DashError::AllProvidersTimedOut {
                capability: "history"
            }),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_for(&DashError::connector("quantdash-yahoo", "server error")),
            StatusCode::BAD_GATEWAY
        );
    }
}
