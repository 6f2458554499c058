use crate::models::{Booking, NewBooking};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Persistence consumed by the booking handlers.
///
/// No uniqueness or idempotency is imposed: two identical submissions are
/// two records.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a booking and return the id the store assigned to it.
    async fn create(&self, booking: NewBooking) -> Result<ObjectId, AppError>;

    /// Every stored booking, in the store's natural order.
    async fn list_all(&self) -> Result<Vec<Booking>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;

    /// Release connections. Called once, after the server stops accepting
    /// requests.
    async fn shutdown(&self);
}
