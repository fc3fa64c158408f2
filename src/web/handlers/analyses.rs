// Stored analysis handlers.
//
// GET /analyses?skip=&limit= — page through analyses in insertion order
// GET /analysis/{id}         — single analysis

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::web::{api_error, AppState};

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 100;
/// Largest page a caller may ask for.
pub const MAX_LIMIT: u32 = 1000;

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn list_analyses(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Response {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    match state.db.list_analyses(skip, limit).await {
        Ok(analyses) => Json(analyses).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list analyses");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Internal server error: {e}"),
            )
        }
    }
}

pub async fn get_analysis(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.db.get_analysis(id).await {
        Ok(Some(analysis)) => Json(analysis).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Analysis not found"),
        Err(e) => {
            error!(error = %e, id, "Failed to load analysis");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Internal server error: {e}"),
            )
        }
    }
}
