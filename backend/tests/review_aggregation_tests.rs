//! Review aggregation tests
//!
//! Covers the derived aggregate rating (mean of stored ratings rounded
//! to one decimal, 0.0 for unreviewed businesses), the
//! one-review-per-user-per-business identity, and sentiment bucketing.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::models::{aggregate_rating, Review};
use shared::summarize_ratings;
use shared::types::{ReviewSentiment, SentimentThresholds};
use shared::validation::validate_rating;
use uuid::Uuid;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// In-memory model of the review store: the (business, user) pair is
/// the identity, so a resubmission replaces the stored entry exactly
/// like the uniqueness-constrained upsert does.
#[derive(Default)]
struct ReviewStore {
    businesses: HashSet<Uuid>,
    rows: HashMap<(Uuid, Uuid), (i32, Option<String>)>,
}

impl ReviewStore {
    fn register(&mut self, business_id: Uuid) {
        self.businesses.insert(business_id);
    }

    fn submit(&mut self, business_id: Uuid, user_id: Uuid, rating: i32, comment: Option<&str>) {
        validate_rating(rating).unwrap();
        self.rows
            .insert((business_id, user_id), (rating, comment.map(String::from)));
    }

    fn ratings_for(&self, business_id: Uuid) -> Vec<i32> {
        self.rows
            .iter()
            .filter(|((b, _), _)| *b == business_id)
            .map(|(_, (rating, _))| *rating)
            .collect()
    }

    /// Mirrors the listing endpoint: an unknown business is an error,
    /// a known business with no reviews is an empty list.
    fn reviews_for(&self, business_id: Uuid) -> Option<Vec<i32>> {
        if !self.businesses.contains(&business_id) {
            return None;
        }
        Some(self.ratings_for(business_id))
    }
}

// ============================================================================
// Aggregate rating
// ============================================================================

#[test]
fn test_zero_reviews_aggregate_is_zero() {
    assert_eq!(aggregate_rating(&[]), Decimal::ZERO);
}

#[test]
fn test_aggregate_is_mean_rounded_to_one_decimal() {
    assert_eq!(aggregate_rating(&[5]), dec("5"));
    assert_eq!(aggregate_rating(&[5, 4]), dec("4.5"));
    assert_eq!(aggregate_rating(&[5, 4, 4]), dec("4.3"));
    assert_eq!(aggregate_rating(&[1, 1, 2]), dec("1.3"));
}

#[test]
fn test_rating_validation_bounds() {
    assert!(validate_rating(0).is_err());
    assert!(validate_rating(6).is_err());
    for r in 1..=5 {
        assert!(validate_rating(r).is_ok());
    }
}

// ============================================================================
// Upsert-by-identity
// ============================================================================

#[test]
fn test_resubmission_replaces_rather_than_duplicates() {
    let mut store = ReviewStore::default();
    let business = Uuid::new_v4();
    let user = Uuid::new_v4();

    store.submit(business, user, 5, Some("Great"));
    store.submit(business, user, 2, Some("Changed my mind"));

    let ratings = store.ratings_for(business);
    assert_eq!(ratings, vec![2]);
    assert_eq!(
        store.rows[&(business, user)],
        (2, Some("Changed my mind".to_string()))
    );
}

#[test]
fn test_listing_unknown_business_errors_while_unreviewed_is_empty() {
    let mut store = ReviewStore::default();
    let known = Uuid::new_v4();
    store.register(known);

    // No reviews yet: a valid, empty listing
    assert_eq!(store.reviews_for(known), Some(vec![]));
    // A business id nothing was registered under: an error, not an
    // empty list
    assert_eq!(store.reviews_for(Uuid::new_v4()), None);
}

#[test]
fn test_first_submission_detected_by_timestamps() {
    let created = Utc.with_ymd_and_hms(2025, 4, 10, 12, 0, 0).unwrap();
    let review = Review {
        id: Uuid::new_v4(),
        business_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        rating: 5,
        comment: None,
        created_at: created,
        updated_at: created,
    };
    assert!(review.is_first_submission());

    // A resubmission refreshes updated_at only
    let resubmitted = Review {
        updated_at: created + Duration::seconds(30),
        ..review
    };
    assert!(!resubmitted.is_first_submission());
}

#[test]
fn test_reviews_for_other_businesses_are_untouched() {
    let mut store = ReviewStore::default();
    let user = Uuid::new_v4();
    let business_a = Uuid::new_v4();
    let business_b = Uuid::new_v4();

    store.submit(business_a, user, 5, None);
    store.submit(business_b, user, 1, None);
    store.submit(business_a, user, 3, None);

    assert_eq!(store.ratings_for(business_a), vec![3]);
    assert_eq!(store.ratings_for(business_b), vec![1]);
}

// ============================================================================
// Sentiment summary
// ============================================================================

#[test]
fn test_summary_counts_and_buckets() {
    let summary = summarize_ratings(&[5, 5, 4, 3, 1], SentimentThresholds::default());
    assert_eq!(summary.review_count, 5);
    assert_eq!(summary.average_rating, dec("3.6"));
    assert_eq!(summary.positive, 3);
    assert_eq!(summary.neutral, 1);
    assert_eq!(summary.negative, 1);
}

#[test]
fn test_neutral_cutoff_is_configurable() {
    // Deployments may treat 3 as negative by raising the neutral cutoff
    let strict = SentimentThresholds {
        positive_min: 4,
        neutral_min: 4,
    };
    assert_eq!(strict.bucket(3), ReviewSentiment::Negative);

    let default = SentimentThresholds::default();
    assert_eq!(default.bucket(3), ReviewSentiment::Neutral);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The aggregate of n >= 1 ratings always lands inside [1, 5] and
    /// carries at most one decimal place.
    #[test]
    fn property_aggregate_bounds_and_scale(
        ratings in prop::collection::vec(1i32..=5, 1..50),
    ) {
        let aggregate = aggregate_rating(&ratings);
        prop_assert!(aggregate >= dec("1"));
        prop_assert!(aggregate <= dec("5"));
        // One decimal place: scaling by 10 yields an integer
        prop_assert_eq!((aggregate * dec("10")).fract(), Decimal::ZERO);
    }

    /// The aggregate never strays more than 0.05 from the exact mean.
    #[test]
    fn property_aggregate_tracks_exact_mean(
        ratings in prop::collection::vec(1i32..=5, 1..50),
    ) {
        let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
        let exact = Decimal::from(sum) / Decimal::from(ratings.len() as i64);
        let diff = (aggregate_rating(&ratings) - exact).abs();
        prop_assert!(diff <= dec("0.05"), "diff {} too large", diff);
    }

    /// However many times a user resubmits, one row per (user, business)
    /// remains and it holds the last submitted rating.
    #[test]
    fn property_upsert_keeps_single_row(
        submissions in prop::collection::vec(1i32..=5, 1..20),
    ) {
        let mut store = ReviewStore::default();
        let business = Uuid::new_v4();
        let user = Uuid::new_v4();

        for rating in &submissions {
            store.submit(business, user, *rating, None);
        }

        let ratings = store.ratings_for(business);
        prop_assert_eq!(ratings, vec![*submissions.last().unwrap()]);
    }

    /// Sentiment buckets partition the reviews: the three counts always
    /// sum to the review count.
    #[test]
    fn property_buckets_partition_reviews(
        ratings in prop::collection::vec(1i32..=5, 0..50),
    ) {
        let summary = summarize_ratings(&ratings, SentimentThresholds::default());
        prop_assert_eq!(
            summary.positive + summary.neutral + summary.negative,
            summary.review_count
        );
    }
}
