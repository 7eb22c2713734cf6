//! User profile HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::profile::{ProfileService, UpdateProfileInput};
use crate::AppState;

/// Get the current user's profile
pub async fn get_my_profile(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> impl IntoResponse {
    let service = ProfileService::new(state.db.clone());

    match service.get_profile(current_user.user_id).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create or update the current user's profile
pub async fn update_my_profile(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Json(input): Json<UpdateProfileInput>,
) -> impl IntoResponse {
    let service = ProfileService::new(state.db.clone());

    match service.upsert_profile(current_user.user_id, input).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a profile by user id (display info for reviews and bookings)
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProfileService::new(state.db.clone());

    match service.get_profile(user_id).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => e.into_response(),
    }
}
