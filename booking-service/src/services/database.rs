use crate::models::{Booking, NewBooking};
use crate::services::BookingStore;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{bson::doc, bson::oid::ObjectId, Client as MongoClient, Collection, Database};
use service_core::error::AppError;

pub const BOOKINGS_COLLECTION: &str = "bookings";
/// Used when neither configuration nor the URI names a database. Existing
/// deployments wrote their bookings there.
pub const DEFAULT_DATABASE: &str = "test";

#[derive(Clone)]
pub struct MongoBookingStore {
    client: MongoClient,
    db: Database,
}

impl MongoBookingStore {
    /// Build the client and pick the database: the explicit name, else the
    /// one named in the URI, else [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;

        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        tracing::info!(database = %db.name(), "MongoDB client ready");

        Ok(Self { client, db })
    }

    pub fn bookings(&self) -> Collection<Booking> {
        self.db.collection(BOOKINGS_COLLECTION)
    }

    fn new_bookings(&self) -> Collection<NewBooking> {
        self.db.collection(BOOKINGS_COLLECTION)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl BookingStore for MongoBookingStore {
    async fn create(&self, booking: NewBooking) -> Result<ObjectId, AppError> {
        let result = self.new_bookings().insert_one(&booking, None).await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Unexpected inserted id type: {}",
                result.inserted_id
            ))
        })
    }

    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        let cursor = self.bookings().find(None, None).await?;
        let bookings = cursor.try_collect().await?;
        Ok(bookings)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn shutdown(&self) {
        tracing::info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}
