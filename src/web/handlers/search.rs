// GET /search?topic= — case-insensitive substring search.
//
// The match covers topics, keywords, title and summary. A missing or blank
// topic is rejected with 422 rather than returning everything.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::web::{api_error, invalid_input, AppState};

#[derive(Deserialize, Default)]
pub struct SearchQuery {
    pub topic: Option<String>,
}

pub async fn search_analyses(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let topic = match params.topic {
        Some(topic) if !topic.trim().is_empty() => topic,
        _ => return invalid_input("Search topic cannot be empty"),
    };

    match state.db.search_analyses(&topic).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => {
            error!(error = %e, topic = %topic, "Search failed");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Internal server error: {e}"),
            )
        }
    }
}
