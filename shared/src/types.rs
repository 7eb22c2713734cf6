//! Common types used across the marketplace

use serde::{Deserialize, Serialize};

/// Relative cost bands for a business listing
///
/// Serialized as the exact tier strings the listings UI shows
/// ("$" through "$$$$"). Ordering follows the band order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Premium,
    #[serde(rename = "$$$$")]
    Luxury,
}

impl PriceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Budget => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Premium => "$$$",
            PriceTier::Luxury => "$$$$",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "$" => Some(PriceTier::Budget),
            "$$" => Some(PriceTier::Moderate),
            "$$$" => Some(PriceTier::Premium),
            "$$$$" => Some(PriceTier::Luxury),
            _ => None,
        }
    }

    pub fn all() -> [PriceTier; 4] {
        [
            PriceTier::Budget,
            PriceTier::Moderate,
            PriceTier::Premium,
            PriceTier::Luxury,
        ]
    }
}

/// Display bucket for a single review rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSentiment {
    Positive,
    Neutral,
    Negative,
}

/// Rating cutoffs for sentiment bucketing
///
/// A rating >= `positive_min` is positive, a rating < `neutral_min` is
/// negative, anything in between is neutral. These are presentation
/// defaults, not a domain invariant, so callers may supply their own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SentimentThresholds {
    pub positive_min: i32,
    pub neutral_min: i32,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive_min: 4,
            neutral_min: 3,
        }
    }
}

impl SentimentThresholds {
    pub fn bucket(&self, rating: i32) -> ReviewSentiment {
        if rating >= self.positive_min {
            ReviewSentiment::Positive
        } else if rating >= self.neutral_min {
            ReviewSentiment::Neutral
        } else {
            ReviewSentiment::Negative
        }
    }
}
