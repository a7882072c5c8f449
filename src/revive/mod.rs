//! Revive operation domain logic.
//!
//! # Data Flow
//! ```text
//! raw upstream body (bytes)
//!     → envelope.rs (decode JSON envelope, tolerate absent fields)
//!     → classifier.rs (ordered rules: success / exception signatures / fallback)
//!     → RevivalOutcome (outcome.rs, maps 1:1 to outward status)
//! ```
//!
//! # Design Decisions
//! - Classification is driven by body content, never by the upstream
//!   status code (the upstream answers 200 for every outcome)
//! - Exactly one outcome per request; no partial state
//! - Error signatures live in one ordered table, evaluated top-down

pub mod classifier;
pub mod envelope;
pub mod outcome;

pub use classifier::classify;
pub use envelope::UpstreamEnvelope;
pub use outcome::RevivalOutcome;
