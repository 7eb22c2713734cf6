//! Booking HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::booking::{BookingService, CreateBookingInput, UpdateBookingStatusInput};
use crate::AppState;
use shared::models::BookingStatus;

/// Query parameters for the business bookings listing
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
}

/// Create a booking request (any authenticated user)
pub async fn create_booking(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Json(input): Json<CreateBookingInput>,
) -> impl IntoResponse {
    let service = BookingService::new(state.db.clone());

    match service.create_booking(current_user.user_id, input).await {
        Ok(booking) => (StatusCode::CREATED, Json(booking)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a single booking (requester or business owner)
pub async fn get_booking(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(booking_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = BookingService::new(state.db.clone());

    match service.get_booking(current_user.user_id, booking_id).await {
        Ok(booking) => (StatusCode::OK, Json(booking)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Apply a status transition to a booking (business owner only)
pub async fn update_booking_status(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(booking_id): Path<Uuid>,
    Json(input): Json<UpdateBookingStatusInput>,
) -> impl IntoResponse {
    let service = BookingService::new(state.db.clone());

    match service
        .update_status(current_user.user_id, booking_id, input.status)
        .await
    {
        Ok(booking) => (StatusCode::OK, Json(booking)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List booking requests for a business (owner only)
pub async fn list_business_bookings(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(business_id): Path<Uuid>,
    Query(query): Query<BookingListQuery>,
) -> impl IntoResponse {
    let service = BookingService::new(state.db.clone());

    match service
        .list_for_business(current_user.user_id, business_id, query.status)
        .await
    {
        Ok(bookings) => (
            StatusCode::OK,
            Json(serde_json::json!({ "bookings": bookings })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// List the current user's own bookings
pub async fn list_my_bookings(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
) -> impl IntoResponse {
    let service = BookingService::new(state.db.clone());

    match service.list_for_customer(current_user.user_id).await {
        Ok(bookings) => (
            StatusCode::OK,
            Json(serde_json::json!({ "bookings": bookings })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
