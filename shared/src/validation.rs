//! Validation rules for the Event Services Marketplace

use chrono::NaiveDate;

use crate::types::PriceTier;

// ============================================================================
// Booking Validations
// ============================================================================

/// Validate that a booking's event date is today or later
pub fn validate_event_date(event_date: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
    if event_date < today {
        return Err("Event date must be today or in the future");
    }
    Ok(())
}

/// Validate the guest count for a booking
pub fn validate_guest_count(guest_count: i32) -> Result<(), &'static str> {
    if guest_count < 1 {
        return Err("Guest count must be at least 1");
    }
    Ok(())
}

/// Validate the event type text
pub fn validate_event_type(event_type: &str) -> Result<(), &'static str> {
    if event_type.trim().is_empty() {
        return Err("Event type is required");
    }
    Ok(())
}

// ============================================================================
// Review Validations
// ============================================================================

/// Validate a review rating is an integer in [1, 5]
pub fn validate_rating(rating: i32) -> Result<(), &'static str> {
    if !(1..=5).contains(&rating) {
        return Err("Rating must be between 1 and 5");
    }
    Ok(())
}

// ============================================================================
// Business Validations
// ============================================================================

/// Validate a business display name
pub fn validate_business_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Business name is required");
    }
    if name.len() > 200 {
        return Err("Business name must be at most 200 characters");
    }
    Ok(())
}

/// Validate a price tier string is one of the four exact tier strings
pub fn validate_price_tier(tier: &str) -> Result<PriceTier, &'static str> {
    PriceTier::from_str(tier).ok_or("Price range must be one of $, $$, $$$, $$$$")
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}
