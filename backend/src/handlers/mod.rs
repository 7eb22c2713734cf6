//! HTTP request handlers

pub mod booking;
pub mod business;
pub mod category;
pub mod health;
pub mod profile;
pub mod review;

pub use booking::*;
pub use business::*;
pub use category::*;
pub use health::*;
pub use profile::*;
pub use review::*;
