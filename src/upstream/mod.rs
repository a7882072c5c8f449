//! Upstream production-tracker integration.
//!
//! # Data Flow
//! ```text
//! EntityReference
//!     → transport.rs (build revive command, one outbound POST)
//!     → UpstreamReply { status, body } or TransportError
//!     → [classifier decides the outward outcome]
//! ```
//!
//! # Design Decisions
//! - The transport is a trait object injected into server state, so
//!   tests substitute a deterministic mock for the live connection
//! - Purely a shim: it never interprets the reply body
//! - No retries and no pooling policy of its own; a transport failure
//!   is terminal for the request and renders as bad-gateway

pub mod transport;

pub use transport::{HttpTransport, ReviveTransport, TransportError, UpstreamReply};
