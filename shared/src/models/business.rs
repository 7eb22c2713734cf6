//! Business listing and service category models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PriceTier;

/// A service provider listed on the marketplace
///
/// `rating` is a derived aggregate (mean of the business's review
/// ratings, one decimal place) and is never mutated directly; a
/// business with no reviews carries 0.0 and is rendered as "New".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub is_featured: bool,
    pub rating: Decimal,
    pub price_range: Option<PriceTier>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Business {
    /// Whether the business has collected any reviews yet
    pub fn is_unrated(&self) -> bool {
        self.rating == Decimal::ZERO
    }

    /// Display string for the aggregate rating ("New" for unreviewed)
    pub fn rating_display(&self) -> String {
        if self.is_unrated() {
            "New".to_string()
        } else {
            format!("{:.1}", self.rating)
        }
    }
}

/// A category of event services (catering, decoration, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
