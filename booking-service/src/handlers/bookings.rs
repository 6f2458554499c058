use crate::dtos::{BookingResponse, MessageResponse, SubmitBookingRequest, SUBMITTED_MESSAGE};
use crate::error::{BookingError, StoreOperation};
use crate::services::{record_listing, record_submission, SubmissionOutcome};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

/// `POST /submit-form`
///
/// A body that is not a JSON object of scalar fields is treated like an
/// empty submission and fails validation.
#[tracing::instrument(skip(state, body))]
pub async fn submit_booking(
    State(state): State<AppState>,
    body: Result<Json<SubmitBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), BookingError> {
    let received_at = Utc::now();

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable booking body");
            SubmitBookingRequest::default()
        }
    };

    let booking = request.into_new_booking(received_at).map_err(|e| {
        record_submission(SubmissionOutcome::Rejected);
        BookingError::from(e)
    })?;

    let id = state.store.create(booking).await.map_err(|e| {
        record_submission(SubmissionOutcome::Failed);
        BookingError::persistence(StoreOperation::Create)(e)
    })?;

    record_submission(SubmissionOutcome::Created);
    tracing::info!(booking_id = %id, "Booking submitted");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(SUBMITTED_MESSAGE)),
    ))
}

/// `GET /admin/bookings`
#[tracing::instrument(skip(state))]
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingResponse>>, BookingError> {
    let bookings = state.store.list_all().await.map_err(|e| {
        record_listing(false);
        BookingError::persistence(StoreOperation::List)(e)
    })?;

    record_listing(true);
    tracing::debug!(count = bookings.len(), "Bookings listed");

    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}
