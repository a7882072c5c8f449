//! Request routing subsystem.
//!
//! The gateway serves a single pattern, so routing is one pure match
//! function rather than a compiled route table. The axum router feeds
//! every request through it; no match means 404 and the upstream is
//! never invoked.

pub mod matcher;

pub use matcher::{match_revive, EntityReference};
