use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::core::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(rename = "retrievedFAQs")]
    pub retrieved_faqs: usize,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Unparsable bodies carry no message either.
    let Some(message) = payload.ok().and_then(|Json(body)| body.message) else {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    };

    let request_id = Uuid::new_v4();
    let result = state
        .pipeline
        .answer(&message)
        .instrument(tracing::info_span!("chat", %request_id))
        .await?;

    Ok(Json(ChatResponse {
        response: result.answer_text,
        retrieved_faqs: result.matched_count,
    }))
}
