//! Service category HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::category::CategoryService;
use crate::AppState;

/// List all service categories (public)
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.list_categories().await {
        Ok(categories) => (
            StatusCode::OK,
            Json(serde_json::json!({ "categories": categories })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a single service category (public)
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CategoryService::new(state.db.clone());

    match service.get_category(category_id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => e.into_response(),
    }
}
