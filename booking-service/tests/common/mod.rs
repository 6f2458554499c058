#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use booking_service::models::{Booking, NewBooking};
use booking_service::services::{BookingStore, InMemoryBookingStore};
use booking_service::{build_router, AppState};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use service_core::error::AppError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::util::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryBookingStore>,
}

impl TestApp {
    /// Router backed by a fresh in-memory store.
    pub fn spawn() -> Self {
        let store = Arc::new(InMemoryBookingStore::new());
        let router = build_router(AppState::new(store.clone()));
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        send(&self.router, request).await
    }

    pub async fn submit(&self, body: &Value) -> TestResponse {
        self.send(json_post("/submit-form", body)).await
    }

    pub async fn list(&self) -> TestResponse {
        self.send(get("/admin/bookings")).await
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_post(path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub fn jane_doe() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@x.com",
        "phone": "555-1234",
        "appointmentDate": "2025-01-01T10:00:00Z"
    })
}

/// Store whose every call fails, counting the attempts that reached it.
#[derive(Default)]
pub struct FailingBookingStore {
    pub create_attempts: AtomicUsize,
    pub list_attempts: AtomicUsize,
}

impl FailingBookingStore {
    pub fn creates(&self) -> usize {
        self.create_attempts.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.list_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingStore for FailingBookingStore {
    async fn create(&self, _booking: NewBooking) -> Result<ObjectId, AppError> {
        self.create_attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "server selection timeout: mongodb://db.internal:27017"
        )))
    }

    async fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        self.list_attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "server selection timeout: mongodb://db.internal:27017"
        )))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(AppError::ServiceUnavailable)
    }

    async fn shutdown(&self) {}
}

pub fn failing_router() -> (Router, Arc<FailingBookingStore>) {
    let store = Arc::new(FailingBookingStore::default());
    (build_router(AppState::new(store.clone())), store)
}
