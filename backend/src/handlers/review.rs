//! Review HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::services::review::{ReviewService, SubmitReviewInput};
use crate::AppState;
use shared::types::SentimentThresholds;

fn review_service(state: &AppState) -> ReviewService {
    let thresholds = SentimentThresholds {
        positive_min: state.config.reviews.positive_min,
        neutral_min: state.config.reviews.neutral_min,
    };
    ReviewService::new(state.db.clone(), thresholds)
}

/// Submit or resubmit a review for a business
///
/// A first submission answers 201; a resubmission that overwrote an
/// existing review answers 200.
pub async fn submit_review(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Json(input): Json<SubmitReviewInput>,
) -> impl IntoResponse {
    let service = review_service(&state);

    match service.submit_review(current_user.user_id, input).await {
        Ok(submission) => {
            let status = if submission.review.is_first_submission() {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(submission)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Delete the current user's review
pub async fn delete_review(
    State(state): State<AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(review_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = review_service(&state);

    match service.delete_review(current_user.user_id, review_id).await {
        Ok(business_rating) => (
            StatusCode::OK,
            Json(serde_json::json!({ "business_rating": business_rating })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// List a business's reviews with author display info (public)
pub async fn list_business_reviews(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = review_service(&state);

    match service.list_for_business(business_id).await {
        Ok(reviews) => (
            StatusCode::OK,
            Json(serde_json::json!({ "reviews": reviews })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Rating summary for a business (public)
pub async fn get_review_summary(
    State(state): State<AppState>,
    Path(business_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = review_service(&state);

    match service.summary(business_id).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => e.into_response(),
    }
}
