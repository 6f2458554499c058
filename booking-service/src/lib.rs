//! Booking intake service: accepts visitor appointment requests and lists
//! them for administrators.
pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};

pub const SERVICE_NAME: &str = "booking-service";
