//! Listing filter tests
//!
//! Covers the marketplace filter semantics: conjunctive optional
//! filters (category, price tier, inclusive minimum rating,
//! case-insensitive name search) and the optional rating sort.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::types::PriceTier;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Minimal listing row for exercising the filter semantics
#[derive(Debug, Clone)]
struct Listing {
    name: String,
    category: Option<String>,
    price_range: Option<PriceTier>,
    rating: Decimal,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
struct Filter {
    category: Option<String>,
    price_range: Option<PriceTier>,
    min_rating: Option<Decimal>,
    search: Option<String>,
}

/// Mirror of the query layer's predicate: every supplied filter must
/// hold; an absent filter imposes no constraint.
fn matches(listing: &Listing, filter: &Filter) -> bool {
    if let Some(category) = &filter.category {
        if listing.category.as_deref() != Some(category.as_str()) {
            return false;
        }
    }
    if let Some(tier) = filter.price_range {
        if listing.price_range != Some(tier) {
            return false;
        }
    }
    if let Some(min_rating) = filter.min_rating {
        if listing.rating < min_rating {
            return false;
        }
    }
    if let Some(term) = &filter.search {
        if !listing.name.to_lowercase().contains(&term.to_lowercase()) {
            return false;
        }
    }
    true
}

/// Mirror of the explicit rating sort: descending rating, ties broken
/// by earliest creation.
fn rating_sort(listings: &mut [Listing]) {
    listings.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.created_at.cmp(&b.created_at)));
}

fn listing(name: &str, category: &str, tier: PriceTier, rating: &str) -> Listing {
    Listing {
        name: name.to_string(),
        category: Some(category.to_string()),
        price_range: Some(tier),
        rating: dec(rating),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

// ============================================================================
// Conjunctive filter semantics
// ============================================================================

#[test]
fn test_all_filters_must_hold_simultaneously() {
    let filter = Filter {
        category: Some("Catering".to_string()),
        price_range: Some(PriceTier::Moderate),
        min_rating: Some(dec("4")),
        search: None,
    };

    let qualifying = listing("Golden Fork", "Catering", PriceTier::Moderate, "4.2");
    assert!(matches(&qualifying, &filter));

    // Same category and price but rating 3.9: excluded
    let below_rating = listing("Silver Spoon", "Catering", PriceTier::Moderate, "3.9");
    assert!(!matches(&below_rating, &filter));

    let wrong_category = listing("Bloom Decor", "Decoration", PriceTier::Moderate, "4.8");
    assert!(!matches(&wrong_category, &filter));

    let wrong_tier = listing("Feast & Co", "Catering", PriceTier::Premium, "4.8");
    assert!(!matches(&wrong_tier, &filter));
}

#[test]
fn test_min_rating_is_inclusive() {
    let filter = Filter {
        min_rating: Some(dec("4")),
        ..Filter::default()
    };
    assert!(matches(
        &listing("Exactly Four", "Catering", PriceTier::Budget, "4.0"),
        &filter
    ));
    assert!(!matches(
        &listing("Just Under", "Catering", PriceTier::Budget, "3.9"),
        &filter
    ));
}

#[test]
fn test_absent_filters_impose_no_constraint() {
    let anything = Listing {
        name: "Anything Goes".to_string(),
        category: None,
        price_range: None,
        rating: Decimal::ZERO,
        created_at: Utc::now(),
    };
    assert!(matches(&anything, &Filter::default()));
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let filter = Filter {
        search: Some("fork".to_string()),
        ..Filter::default()
    };
    assert!(matches(
        &listing("Golden Fork Catering", "Catering", PriceTier::Moderate, "4.0"),
        &filter
    ));
    assert!(!matches(
        &listing("Silver Spoon", "Catering", PriceTier::Moderate, "4.0"),
        &filter
    ));

    let upper = Filter {
        search: Some("GOLDEN".to_string()),
        ..Filter::default()
    };
    assert!(matches(
        &listing("golden fork", "Catering", PriceTier::Moderate, "4.0"),
        &upper
    ));
}

#[test]
fn test_empty_result_set_is_not_an_error() {
    let filter = Filter {
        category: Some("Fireworks".to_string()),
        ..Filter::default()
    };
    let listings = vec![listing("Golden Fork", "Catering", PriceTier::Moderate, "4.0")];
    let results: Vec<_> = listings.iter().filter(|l| matches(l, &filter)).collect();
    assert!(results.is_empty());
}

// ============================================================================
// Rating sort
// ============================================================================

#[test]
fn test_rating_sort_descends_with_created_at_tiebreak() {
    let older = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let newer = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();

    let mut listings = vec![
        Listing {
            name: "B".to_string(),
            category: None,
            price_range: None,
            rating: dec("4.5"),
            created_at: newer,
        },
        Listing {
            name: "A".to_string(),
            category: None,
            price_range: None,
            rating: dec("4.5"),
            created_at: older,
        },
        Listing {
            name: "C".to_string(),
            category: None,
            price_range: None,
            rating: dec("4.9"),
            created_at: newer,
        },
    ];

    rating_sort(&mut listings);

    let names: Vec<_> = listings.iter().map(|l| l.name.as_str()).collect();
    // Highest rating first; the 4.5 tie goes to the earlier listing
    assert_eq!(names, vec!["C", "A", "B"]);
}

// ============================================================================
// Properties
// ============================================================================

fn tier_strategy() -> impl Strategy<Value = PriceTier> {
    prop::sample::select(PriceTier::all().to_vec())
}

fn listing_strategy() -> impl Strategy<Value = Listing> {
    (
        "[a-z]{3,12}",
        prop::sample::select(vec!["Catering", "Decoration", "Event Planning"]),
        tier_strategy(),
        0i64..=50,
    )
        .prop_map(|(name, category, tier, tenths)| Listing {
            name,
            category: Some(category.to_string()),
            price_range: Some(tier),
            rating: Decimal::new(tenths, 1),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Everything the filter keeps satisfies every supplied predicate.
    #[test]
    fn property_results_satisfy_all_filters(
        listings in prop::collection::vec(listing_strategy(), 0..30),
        tier in tier_strategy(),
        min_tenths in 0i64..=50,
    ) {
        let filter = Filter {
            category: Some("Catering".to_string()),
            price_range: Some(tier),
            min_rating: Some(Decimal::new(min_tenths, 1)),
            search: None,
        };

        for result in listings.iter().filter(|l| matches(l, &filter)) {
            prop_assert_eq!(result.category.as_deref(), Some("Catering"));
            prop_assert_eq!(result.price_range, Some(tier));
            prop_assert!(result.rating >= Decimal::new(min_tenths, 1));
        }
    }

    /// Widening by dropping a filter never loses a result.
    #[test]
    fn property_dropping_a_filter_is_monotone(
        listings in prop::collection::vec(listing_strategy(), 0..30),
        tier in tier_strategy(),
    ) {
        let narrow = Filter {
            category: Some("Catering".to_string()),
            price_range: Some(tier),
            ..Filter::default()
        };
        let wide = Filter {
            category: Some("Catering".to_string()),
            ..Filter::default()
        };

        let narrow_count = listings.iter().filter(|l| matches(l, &narrow)).count();
        let wide_count = listings.iter().filter(|l| matches(l, &wide)).count();
        prop_assert!(narrow_count <= wide_count);
    }

    /// The rating sort produces a non-ascending rating sequence.
    #[test]
    fn property_rating_sort_is_non_ascending(
        mut listings in prop::collection::vec(listing_strategy(), 0..30),
    ) {
        rating_sort(&mut listings);
        for pair in listings.windows(2) {
            prop_assert!(pair[0].rating >= pair[1].rating);
        }
    }
}
