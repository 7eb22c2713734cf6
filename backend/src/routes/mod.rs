//! Route definitions for the Event Services Marketplace

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Public listing routes - marketplace browsing needs no session
        .route("/categories", get(handlers::list_categories))
        .route("/categories/:category_id", get(handlers::get_category))
        .route("/businesses", get(handlers::search_businesses))
        .route("/businesses/featured", get(handlers::list_featured))
        .route("/businesses/:business_id", get(handlers::get_business))
        .route(
            "/businesses/:business_id/reviews",
            get(handlers::list_business_reviews),
        )
        .route(
            "/businesses/:business_id/reviews/summary",
            get(handlers::get_review_summary),
        )
        // Protected routes - business management
        .nest("/my", my_routes())
        // Protected routes - bookings
        .nest("/bookings", booking_routes())
        // Protected routes - reviews
        .nest("/reviews", review_routes())
        // Protected routes - business dashboard
        .nest("/manage", manage_routes())
        // Public profile display info
        .route("/profiles/:user_id", get(handlers::get_profile))
}

/// Current-user routes (protected)
fn my_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::get_my_profile).put(handlers::update_my_profile),
        )
        .route("/businesses", get(handlers::list_my_businesses))
        .route("/bookings", get(handlers::list_my_bookings))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Booking routes (protected)
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_booking))
        .route("/:booking_id", get(handlers::get_booking))
        .route("/:booking_id/status", put(handlers::update_booking_status))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Review routes (protected)
fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::submit_review))
        .route("/:review_id", delete(handlers::delete_review))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Business management routes (protected)
fn manage_routes() -> Router<AppState> {
    Router::new()
        .route("/businesses", post(handlers::register_business))
        .route("/businesses/:business_id", put(handlers::update_business))
        .route(
            "/businesses/:business_id/bookings",
            get(handlers::list_business_bookings),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
