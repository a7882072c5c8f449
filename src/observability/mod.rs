//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config.observability
//!     → logging.rs (tracing subscriber, level from config or RUST_LOG)
//!     → metrics.rs (Prometheus exporter when enabled)
//!
//! per request:
//!     request ID in every span field
//!     → record_request(method, status, outcome, start)
//! ```

pub mod logging;
pub mod metrics;
