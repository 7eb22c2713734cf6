//! Domain models for the Event Services Marketplace

mod booking;
mod business;
mod profile;
mod review;

pub use booking::*;
pub use business::*;
pub use profile::*;
pub use review::*;
