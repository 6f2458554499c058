pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoBookingStore;
pub use memory::InMemoryBookingStore;
pub use metrics::{get_metrics, init_metrics, record_listing, record_submission, SubmissionOutcome};
pub use store::BookingStore;
