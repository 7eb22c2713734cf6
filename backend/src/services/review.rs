//! Review service
//!
//! Handles review submission (upsert-by-identity per user and business)
//! and keeps the business's derived aggregate rating in sync with the
//! stored reviews.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{RatingSummary, Review};
use shared::types::SentimentThresholds;
use shared::validation;

/// Review service for submissions and rating aggregation
#[derive(Clone)]
pub struct ReviewService {
    db: PgPool,
    thresholds: SentimentThresholds,
}

/// Database row for a review
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    business_id: Uuid,
    user_id: Uuid,
    rating: i32,
    comment: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: row.id,
            business_id: row.business_id,
            user_id: row.user_id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for a review joined with the author's profile
#[derive(Debug, sqlx::FromRow)]
struct ReviewWithAuthorRow {
    id: Uuid,
    business_id: Uuid,
    user_id: Uuid,
    rating: i32,
    comment: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: Option<String>,
    author_avatar_url: Option<String>,
}

/// Review with author info for display
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub author_name: Option<String>,
    pub author_avatar_url: Option<String>,
}

/// Input for submitting (or resubmitting) a review
#[derive(Debug, Deserialize)]
pub struct SubmitReviewInput {
    pub business_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Result of a review write: the stored review plus the recomputed
/// business aggregate
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSubmission {
    pub review: Review,
    pub business_rating: Decimal,
}

impl ReviewService {
    /// Create a new ReviewService instance
    pub fn new(db: PgPool, thresholds: SentimentThresholds) -> Self {
        Self { db, thresholds }
    }

    /// Submit a review for a business
    ///
    /// At most one review exists per (user, business); a resubmission
    /// overwrites the stored rating and comment. The upsert rides on
    /// the store's uniqueness constraint, so two concurrent submissions
    /// by the same user cannot produce two rows.
    pub async fn submit_review(
        &self,
        actor_id: Uuid,
        input: SubmitReviewInput,
    ) -> AppResult<ReviewSubmission> {
        if let Err(msg) = validation::validate_rating(input.rating) {
            return Err(AppError::validation("rating", msg));
        }

        let business = sqlx::query_scalar::<_, Uuid>("SELECT id FROM businesses WHERE id = $1")
            .bind(input.business_id)
            .fetch_optional(&self.db)
            .await?;
        if business.is_none() {
            return Err(AppError::NotFound("Business".to_string()));
        }

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (business_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (business_id, user_id)
            DO UPDATE SET rating = EXCLUDED.rating,
                          comment = EXCLUDED.comment,
                          updated_at = NOW()
            RETURNING id, business_id, user_id, rating, comment, created_at, updated_at
            "#,
        )
        .bind(input.business_id)
        .bind(actor_id)
        .bind(input.rating)
        .bind(&input.comment)
        .fetch_one(&self.db)
        .await?;

        let business_rating = self.recompute_rating(input.business_id).await?;

        Ok(ReviewSubmission {
            review: row.into(),
            business_rating,
        })
    }

    /// Delete a review (author only) and refresh the business aggregate
    pub async fn delete_review(&self, actor_id: Uuid, review_id: Uuid) -> AppResult<Decimal> {
        let review = sqlx::query_as::<_, (Uuid, Uuid)>(
            "SELECT user_id, business_id FROM reviews WHERE id = $1",
        )
        .bind(review_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review".to_string()))?;

        if review.0 != actor_id {
            return Err(AppError::Forbidden);
        }

        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.db)
            .await?;

        self.recompute_rating(review.1).await
    }

    /// List a business's reviews with author display info, newest first
    ///
    /// An unknown business is NotFound; a known business with no reviews
    /// is an empty list.
    pub async fn list_for_business(&self, business_id: Uuid) -> AppResult<Vec<ReviewWithAuthor>> {
        let business = sqlx::query_scalar::<_, Uuid>("SELECT id FROM businesses WHERE id = $1")
            .bind(business_id)
            .fetch_optional(&self.db)
            .await?;
        if business.is_none() {
            return Err(AppError::NotFound("Business".to_string()));
        }

        let rows = sqlx::query_as::<_, ReviewWithAuthorRow>(
            r#"
            SELECT r.id, r.business_id, r.user_id, r.rating, r.comment,
                   r.created_at, r.updated_at,
                   p.full_name AS author_name, p.avatar_url AS author_avatar_url
            FROM reviews r
            LEFT JOIN profiles p ON p.id = r.user_id
            WHERE r.business_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ReviewWithAuthor {
                author_name: row.author_name.clone(),
                author_avatar_url: row.author_avatar_url.clone(),
                review: Review {
                    id: row.id,
                    business_id: row.business_id,
                    user_id: row.user_id,
                    rating: row.rating,
                    comment: row.comment,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
            })
            .collect())
    }

    /// Rating summary (count, mean, sentiment buckets) for a business
    pub async fn summary(&self, business_id: Uuid) -> AppResult<RatingSummary> {
        let business = sqlx::query_scalar::<_, Uuid>("SELECT id FROM businesses WHERE id = $1")
            .bind(business_id)
            .fetch_optional(&self.db)
            .await?;
        if business.is_none() {
            return Err(AppError::NotFound("Business".to_string()));
        }

        let ratings =
            sqlx::query_scalar::<_, i32>("SELECT rating FROM reviews WHERE business_id = $1")
                .bind(business_id)
                .fetch_all(&self.db)
                .await?;

        Ok(shared::summarize_ratings(&ratings, self.thresholds))
    }

    /// Recompute the derived aggregate rating for a business and return it
    ///
    /// Invoked synchronously after every review write; the aggregate is
    /// never mutated through any other path. Mean of all stored ratings
    /// rounded to one decimal, 0.0 when the business has no reviews.
    async fn recompute_rating(&self, business_id: Uuid) -> AppResult<Decimal> {
        let rating = sqlx::query_scalar::<_, Decimal>(
            r#"
            UPDATE businesses
            SET rating = COALESCE(
                    (SELECT ROUND(AVG(rating), 1) FROM reviews WHERE business_id = $1),
                    0.0),
                updated_at = NOW()
            WHERE id = $1
            RETURNING rating
            "#,
        )
        .bind(business_id)
        .fetch_one(&self.db)
        .await?;

        Ok(rating)
    }
}
