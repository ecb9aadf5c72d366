use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::core::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListFaqsQuery {
    /// Exact category name to keep.
    pub category: Option<String>,
}

pub async fn list_faqs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListFaqsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut entries = state.knowledge.list_all().await.map_err(|err| {
        tracing::error!("Failed to fetch FAQs: {}", err);
        ApiError::Internal("Failed to fetch FAQs".to_string())
    })?;

    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        entries.retain(|entry| entry.category.as_deref() == Some(category));
    }

    Ok(Json(entries))
}
