//! Business listing HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::business::{
    BusinessFilter, BusinessService, RegisterBusinessInput, UpdateBusinessInput,
};
use crate::AppState;

/// Search the marketplace listings (public)
pub async fn search_businesses(
    State(state): State<AppState>,
    Query(filter): Query<BusinessFilter>,
) -> impl IntoResponse {
    let service = BusinessService::new(state.db.clone());

    match service.search(filter).await {
        Ok(businesses) => (
            StatusCode::OK,
            Json(serde_json::json!({ "businesses": businesses })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<i64>,
}

/// Featured businesses for the home page (public)
pub async fn list_featured(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> impl IntoResponse {
    let service = BusinessService::new(state.db.clone());

    match service.featured(query.limit.unwrap_or(6)).await {
        Ok(businesses) => (
            StatusCode::OK,
            Json(serde_json::json!({ "businesses": businesses })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a single business (public)
pub async fn get_business(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = BusinessService::new(state.db.clone());

    match service.get_business(business_id).await {
        Ok(business) => (StatusCode::OK, Json(business)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Register a business owned by the current user
pub async fn register_business(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Json(input): Json<RegisterBusinessInput>,
) -> impl IntoResponse {
    let service = BusinessService::new(state.db.clone());

    match service.register(current_user.user_id, input).await {
        Ok(business) => (StatusCode::CREATED, Json(business)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a business (owner only)
pub async fn update_business(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(business_id): Path<Uuid>,
    Json(input): Json<UpdateBusinessInput>,
) -> impl IntoResponse {
    let service = BusinessService::new(state.db.clone());

    match service
        .update(current_user.user_id, business_id, input)
        .await
    {
        Ok(business) => (StatusCode::OK, Json(business)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List businesses owned by the current user
pub async fn list_my_businesses(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> impl IntoResponse {
    let service = BusinessService::new(state.db.clone());

    match service.list_owned(current_user.user_id).await {
        Ok(businesses) => (
            StatusCode::OK,
            Json(serde_json::json!({ "businesses": businesses })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
