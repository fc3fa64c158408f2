// Web server — Axum JSON API over the analysis pipeline.
//
// POST /analyze runs the pipeline and stores the result; the GET routes read
// stored analyses back. No auth: the server is meant for local use and binds
// to 127.0.0.1 unless told otherwise.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::Database;
use crate::pipeline::analysis::AnalysisPipeline;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    pub pipeline: Arc<AnalysisPipeline>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    db: Arc<dyn Database>,
    pipeline: AnalysisPipeline,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState {
        db,
        pipeline: Arc::new(pipeline),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Quarry API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Assemble the router. Public so tests can drive it with `oneshot`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api_info))
        .route("/api", get(api_info))
        .route("/health", get(health))
        .route("/analyze", post(handlers::analyze::analyze_text))
        .route("/search", get(handlers::search::search_analyses))
        .route("/analyses", get(handlers::analyses::list_analyses))
        .route("/analysis/{id}", get(handlers::analyses::get_analysis))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Describe the API.
async fn api_info() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "message": "Quarry text analysis API",
        "endpoints": {
            "POST /analyze": "Analyze a text and store the result",
            "GET /search?topic=": "Search stored analyses by topic, keyword, title or summary",
            "GET /analyses?skip=&limit=": "List stored analyses",
            "GET /analysis/{id}": "Fetch one analysis",
            "GET /health": "Health check",
        }
    }))
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// 422 with a machine-stable `error` and a human `detail`.
pub fn invalid_input(detail: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(serde_json::json!({ "error": "Invalid input", "detail": detail })),
    )
        .into_response()
}
