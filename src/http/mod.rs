//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → [routing matcher extracts the entity reference]
//!     → [upstream transport issues the revive command]
//!     → [classifier decides the outcome]
//!     → server.rs (render outcome as status + body)
//! ```

pub mod request;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
