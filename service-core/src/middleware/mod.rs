pub mod metrics;
pub mod tracing;

pub use self::metrics::metrics_middleware;
pub use self::tracing::{REQUEST_ID_HEADER, http_request_span, request_id_middleware};
