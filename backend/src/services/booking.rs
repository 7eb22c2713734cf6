//! Booking lifecycle service
//!
//! Governs booking creation and the status transitions a business owner
//! may apply to incoming requests. Transition rules live in
//! [`BookingStatus`]; this service enforces them against stored state.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{authorize_transition, Booking, BookingStatus, TransitionDenial};
use shared::validation;

/// Booking service for creating bookings and managing their lifecycle
#[derive(Clone)]
pub struct BookingService {
    db: PgPool,
}

/// Database row for a booking
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    business_id: Uuid,
    user_id: Uuid,
    event_date: NaiveDate,
    event_time: Option<NaiveTime>,
    event_type: String,
    guest_count: i32,
    special_requests: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BookingRow {
    fn into_booking(self) -> AppResult<Booking> {
        let status = BookingStatus::from_str(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown booking status in store: {}", self.status))
        })?;
        Ok(Booking {
            id: self.id,
            business_id: self.business_id,
            user_id: self.user_id,
            event_date: self.event_date,
            event_time: self.event_time,
            event_type: self.event_type,
            guest_count: self.guest_count,
            special_requests: self.special_requests,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for a booking joined with the requester's profile
#[derive(Debug, sqlx::FromRow)]
struct BookingWithRequesterRow {
    id: Uuid,
    business_id: Uuid,
    user_id: Uuid,
    event_date: NaiveDate,
    event_time: Option<NaiveTime>,
    event_type: String,
    guest_count: i32,
    special_requests: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    requester_name: Option<String>,
    requester_email: Option<String>,
}

/// Booking with requester info for the business dashboard
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithRequester {
    #[serde(flatten)]
    pub booking: Booking,
    pub requester_name: Option<String>,
    pub requester_email: Option<String>,
}

/// Database row for a booking joined with the business name
#[derive(Debug, sqlx::FromRow)]
struct BookingWithBusinessRow {
    id: Uuid,
    business_id: Uuid,
    user_id: Uuid,
    event_date: NaiveDate,
    event_time: Option<NaiveTime>,
    event_type: String,
    guest_count: i32,
    special_requests: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    business_name: String,
}

/// Booking with business info for a customer's own bookings view
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithBusiness {
    #[serde(flatten)]
    pub booking: Booking,
    pub business_name: String,
}

/// Input for creating a booking request
#[derive(Debug, Deserialize)]
pub struct CreateBookingInput {
    pub business_id: Uuid,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub event_type: String,
    pub guest_count: i32,
    pub special_requests: Option<String>,
}

/// Input for a booking status transition
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusInput {
    pub status: BookingStatus,
}

impl BookingService {
    /// Create a new BookingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a booking request against a business
    ///
    /// The booking always starts out `pending`. The event date must be
    /// today or later, the guest count positive, and the event type
    /// non-empty.
    pub async fn create_booking(
        &self,
        actor_id: Uuid,
        input: CreateBookingInput,
    ) -> AppResult<Booking> {
        let today = Utc::now().date_naive();
        if let Err(msg) = validation::validate_event_date(input.event_date, today) {
            return Err(AppError::validation("event_date", msg));
        }
        if let Err(msg) = validation::validate_guest_count(input.guest_count) {
            return Err(AppError::validation("guest_count", msg));
        }
        if let Err(msg) = validation::validate_event_type(&input.event_type) {
            return Err(AppError::validation("event_type", msg));
        }

        // Referenced business must exist
        let business = sqlx::query_scalar::<_, Uuid>("SELECT id FROM businesses WHERE id = $1")
            .bind(input.business_id)
            .fetch_optional(&self.db)
            .await?;
        if business.is_none() {
            return Err(AppError::NotFound("Business".to_string()));
        }

        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings
                (business_id, user_id, event_date, event_time, event_type,
                 guest_count, special_requests, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, business_id, user_id, event_date, event_time, event_type,
                      guest_count, special_requests, status, created_at, updated_at
            "#,
        )
        .bind(input.business_id)
        .bind(actor_id)
        .bind(input.event_date)
        .bind(input.event_time)
        .bind(input.event_type.trim())
        .bind(input.guest_count)
        .bind(&input.special_requests)
        .bind(BookingStatus::initial().as_str())
        .fetch_one(&self.db)
        .await?;

        let booking = row.into_booking()?;

        // New bookings are observable by the business owner through the
        // dashboard listing; log for the operations trail.
        tracing::info!(
            booking_id = %booking.id,
            business_id = %booking.business_id,
            "booking created"
        );

        Ok(booking)
    }

    /// Apply a status transition to a booking
    ///
    /// Only the owner of the booked business may transition a booking.
    /// Transitions not in the lifecycle table (including anything out of
    /// a terminal state) are rejected and leave the stored state
    /// unchanged; re-issuing an already-applied transition therefore
    /// fails, which guards against duplicate submissions.
    pub async fn update_status(
        &self,
        actor_id: Uuid,
        booking_id: Uuid,
        new_status: BookingStatus,
    ) -> AppResult<Booking> {
        let current = sqlx::query_as::<_, (String, Uuid)>(
            r#"
            SELECT b.status, biz.owner_id
            FROM bookings b
            JOIN businesses biz ON biz.id = b.business_id
            WHERE b.id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking".to_string()))?;

        let current_status = BookingStatus::from_str(&current.0).ok_or_else(|| {
            AppError::Internal(format!("Unknown booking status in store: {}", current.0))
        })?;

        match authorize_transition(current.1, actor_id, current_status, new_status) {
            Err(TransitionDenial::NotOwner) => return Err(AppError::Forbidden),
            Err(TransitionDenial::IllegalTransition) => {
                return Err(AppError::InvalidStateTransition(format!(
                    "Cannot change booking from {} to {}",
                    current_status.as_str(),
                    new_status.as_str()
                )))
            }
            Ok(()) => {}
        }

        // The write is guarded on the status we read, so of two racing
        // legal requests only one lands; the loser sees zero rows.
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            UPDATE bookings
            SET status = $1, updated_at = NOW()
            WHERE id = $2 AND status = $3
            RETURNING id, business_id, user_id, event_date, event_time, event_type,
                      guest_count, special_requests, status, created_at, updated_at
            "#,
        )
        .bind(new_status.as_str())
        .bind(booking_id)
        .bind(current_status.as_str())
        .fetch_optional(&self.db)
        .await?;

        let row = match row {
            Some(row) => row,
            None => {
                // Re-read so the rejection names the status that won
                let stored = sqlx::query_scalar::<_, String>(
                    "SELECT status FROM bookings WHERE id = $1",
                )
                .bind(booking_id)
                .fetch_one(&self.db)
                .await?;
                return Err(AppError::InvalidStateTransition(format!(
                    "Cannot change booking from {} to {}",
                    stored,
                    new_status.as_str()
                )));
            }
        };

        let booking = row.into_booking()?;

        // Status changes are observable by the customer through their
        // bookings listing.
        tracing::info!(
            booking_id = %booking.id,
            from = current_status.as_str(),
            to = new_status.as_str(),
            "booking status changed"
        );

        Ok(booking)
    }

    /// List booking requests for a business (owner only)
    pub async fn list_for_business(
        &self,
        actor_id: Uuid,
        business_id: Uuid,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingWithRequester>> {
        let owner_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT owner_id FROM businesses WHERE id = $1",
        )
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Business".to_string()))?;

        if owner_id != actor_id {
            return Err(AppError::Forbidden);
        }

        let mut query = QueryBuilder::<sqlx::Postgres>::new(
            r#"
            SELECT b.id, b.business_id, b.user_id, b.event_date, b.event_time,
                   b.event_type, b.guest_count, b.special_requests, b.status,
                   b.created_at, b.updated_at,
                   p.full_name AS requester_name, p.email AS requester_email
            FROM bookings b
            LEFT JOIN profiles p ON p.id = b.user_id
            WHERE b.business_id = "#,
        );
        query.push_bind(business_id);
        if let Some(status) = status {
            query.push(" AND b.status = ");
            query.push_bind(status.as_str());
        }
        query.push(" ORDER BY b.event_date");

        let rows = query
            .build_query_as::<BookingWithRequesterRow>()
            .fetch_all(&self.db)
            .await?;

        rows.into_iter()
            .map(|row| {
                let requester_name = row.requester_name.clone();
                let requester_email = row.requester_email.clone();
                let booking = BookingRow {
                    id: row.id,
                    business_id: row.business_id,
                    user_id: row.user_id,
                    event_date: row.event_date,
                    event_time: row.event_time,
                    event_type: row.event_type,
                    guest_count: row.guest_count,
                    special_requests: row.special_requests,
                    status: row.status,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                }
                .into_booking()?;
                Ok(BookingWithRequester {
                    booking,
                    requester_name,
                    requester_email,
                })
            })
            .collect()
    }

    /// List the actor's own booking requests with the business name
    pub async fn list_for_customer(&self, actor_id: Uuid) -> AppResult<Vec<BookingWithBusiness>> {
        let rows = sqlx::query_as::<_, BookingWithBusinessRow>(
            r#"
            SELECT b.id, b.business_id, b.user_id, b.event_date, b.event_time,
                   b.event_type, b.guest_count, b.special_requests, b.status,
                   b.created_at, b.updated_at,
                   biz.name AS business_name
            FROM bookings b
            JOIN businesses biz ON biz.id = b.business_id
            WHERE b.user_id = $1
            ORDER BY b.event_date
            "#,
        )
        .bind(actor_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|row| {
                let business_name = row.business_name.clone();
                let booking = BookingRow {
                    id: row.id,
                    business_id: row.business_id,
                    user_id: row.user_id,
                    event_date: row.event_date,
                    event_time: row.event_time,
                    event_type: row.event_type,
                    guest_count: row.guest_count,
                    special_requests: row.special_requests,
                    status: row.status,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                }
                .into_booking()?;
                Ok(BookingWithBusiness {
                    booking,
                    business_name,
                })
            })
            .collect()
    }

    /// Get a single booking, visible to the requester or the business owner
    pub async fn get_booking(&self, actor_id: Uuid, booking_id: Uuid) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, business_id, user_id, event_date, event_time, event_type,
                   guest_count, special_requests, status, created_at, updated_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking".to_string()))?;

        let booking = row.into_booking()?;

        if booking.user_id != actor_id {
            let owner_id = sqlx::query_scalar::<_, Uuid>(
                "SELECT owner_id FROM businesses WHERE id = $1",
            )
            .bind(booking.business_id)
            .fetch_one(&self.db)
            .await?;
            if owner_id != actor_id {
                return Err(AppError::Forbidden);
            }
        }

        Ok(booking)
    }
}
