use crate::models::{Booking, NewBooking};
use crate::services::BookingStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Process-local store for development runs and tests. Insertion ordered.
#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: RwLock<Vec<Booking>>,
    closed: AtomicBool,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), AppError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(AppError::ServiceUnavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create(&self, booking: NewBooking) -> Result<ObjectId, AppError> {
        self.ensure_open()?;
        let id = ObjectId::new();
        self.bookings.write().await.push(booking.into_booking(id));
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        self.ensure_open()?;
        Ok(self.bookings.read().await.clone())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.ensure_open()
    }

    async fn shutdown(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
