//! Business logic services

pub mod booking;
pub mod business;
pub mod category;
pub mod profile;
pub mod review;

pub use booking::BookingService;
pub use business::BusinessService;
pub use category::CategoryService;
pub use profile::ProfileService;
pub use review::ReviewService;
