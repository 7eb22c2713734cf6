//! Review models and rating aggregation

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ReviewSentiment, SentimentThresholds};

/// A customer's rating of a business, at most one per (user, business)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub business_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Whether this row came out of a first submission rather than a
    /// resubmission. A resubmission refreshes `updated_at` while
    /// `created_at` keeps the original insert time.
    pub fn is_first_submission(&self) -> bool {
        self.created_at == self.updated_at
    }
}

/// Rating summary for a business's review list
#[derive(Debug, Clone, Serialize)]
pub struct RatingSummary {
    pub review_count: usize,
    pub average_rating: Decimal,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// Compute the aggregate rating: the arithmetic mean of the ratings
/// rounded to one decimal place, 0.0 when there are no reviews.
pub fn aggregate_rating(ratings: &[i32]) -> Decimal {
    if ratings.is_empty() {
        return Decimal::ZERO;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (Decimal::from(sum) / Decimal::from(ratings.len() as i64))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Summarize a business's ratings into count, mean, and sentiment buckets
pub fn summarize_ratings(ratings: &[i32], thresholds: SentimentThresholds) -> RatingSummary {
    let mut summary = RatingSummary {
        review_count: ratings.len(),
        average_rating: aggregate_rating(ratings),
        positive: 0,
        neutral: 0,
        negative: 0,
    };
    for &rating in ratings {
        match thresholds.bucket(rating) {
            ReviewSentiment::Positive => summary.positive += 1,
            ReviewSentiment::Neutral => summary.neutral += 1,
            ReviewSentiment::Negative => summary.negative += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_aggregate_of_no_reviews_is_zero() {
        assert_eq!(aggregate_rating(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_aggregate_single_review() {
        assert_eq!(aggregate_rating(&[4]), dec("4"));
    }

    #[test]
    fn test_aggregate_rounds_to_one_decimal() {
        // (5 + 4 + 4) / 3 = 4.333... -> 4.3
        assert_eq!(aggregate_rating(&[5, 4, 4]), dec("4.3"));
        // (5 + 2) / 2 = 3.5
        assert_eq!(aggregate_rating(&[5, 2]), dec("3.5"));
        // (1 + 2) / 3 with a 5: 8/3 = 2.666... -> 2.7
        assert_eq!(aggregate_rating(&[1, 2, 5]), dec("2.7"));
    }

    #[test]
    fn test_aggregate_midpoint_rounds_away_from_zero() {
        // (4 + 5 + 4 + 4) / 4 = 4.25 -> 4.3, not 4.2
        assert_eq!(aggregate_rating(&[4, 5, 4, 4]), dec("4.3"));
    }

    #[test]
    fn test_summary_buckets_with_defaults() {
        let summary = summarize_ratings(&[5, 4, 3, 2, 1], SentimentThresholds::default());
        assert_eq!(summary.review_count, 5);
        assert_eq!(summary.average_rating, dec("3"));
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.neutral, 1);
        assert_eq!(summary.negative, 2);
    }

    #[test]
    fn test_summary_of_no_reviews() {
        let summary = summarize_ratings(&[], SentimentThresholds::default());
        assert_eq!(summary.review_count, 0);
        assert_eq!(summary.average_rating, Decimal::ZERO);
        assert_eq!(summary.positive + summary.neutral + summary.negative, 0);
    }
}
