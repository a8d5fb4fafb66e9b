pub mod anti_forgery;
pub mod request_metrics;
pub mod security_headers;

pub use request_metrics::RequestMetrics;
pub use security_headers::SecurityHeaders;
