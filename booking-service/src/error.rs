//! Booking request failures and their HTTP mapping.
//!
//! Every handler returns [`BookingError`]; the status code and public message
//! are decided here and nowhere else.

use crate::dtos::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;
use std::fmt;
use thiserror::Error;

/// Client-caused rejection. Detected before the store is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields { fields: Vec<String> },

    #[error("Invalid appointment date")]
    InvalidAppointmentDate(String),
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        ValidationError::MissingFields { fields }
    }
}

/// Store operation that failed, used to pick the public message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Create,
    List,
}

impl StoreOperation {
    pub fn public_message(self) -> &'static str {
        match self {
            StoreOperation::Create => "Internal server error",
            StoreOperation::List => "Failed to fetch bookings",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOperation::Create => f.write_str("create"),
            StoreOperation::List => f.write_str("list"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Booking store {operation} failed: {source}")]
    Persistence {
        operation: StoreOperation,
        #[source]
        source: AppError,
    },
}

impl BookingError {
    pub fn persistence(operation: StoreOperation) -> impl FnOnce(AppError) -> Self {
        move |source| BookingError::Persistence { operation, source }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            BookingError::Validation(err) => {
                tracing::info!(reason = ?err, "Booking request rejected");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            BookingError::Persistence { operation, source } => {
                tracing::error!(operation = %operation, error = %source, "Booking store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    operation.public_message().to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
