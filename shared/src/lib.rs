//! Shared types and models for the Event Services Marketplace
//!
//! This crate contains the domain model and the pure business rules
//! (booking lifecycle, review aggregation, listing filters) shared
//! between the backend and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
