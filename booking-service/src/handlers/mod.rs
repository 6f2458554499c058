pub mod bookings;
pub mod health;

pub use bookings::{list_bookings, submit_booking};
pub use health::{health_check, metrics_endpoint, readiness_check};
