// POST /analyze — run the pipeline on a text and store the result.
//
// Returns the stored analysis. An unreachable or confused LLM still yields
// 200 with placeholder content; only bad input (422) and storage failures
// (500) are errors. Every body rejection (syntax, missing field, wrong
// content type) is reported as 422.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use crate::web::{api_error, invalid_input, AppState};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

pub async fn analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return invalid_input(&rejection.body_text()),
    };

    let output = match state.pipeline.run(&body.text).await {
        Ok(output) => output,
        Err(e) => return invalid_input(&e.to_string()),
    };

    match state.db.insert_analysis(&body.text, &output).await {
        Ok(stored) => {
            info!(id = stored.id, quality = ?output.quality, "Stored analysis");
            Json(stored).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to store analysis");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Internal server error: {e}"),
            )
        }
    }
}
