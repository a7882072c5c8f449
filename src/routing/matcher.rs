//! Revive request matching.
//!
//! # Responsibilities
//! - Match `POST /{type}/{id}/revive` and nothing else
//! - Extract a validated entity reference from the path
//! - Reject anything malformed before the upstream is touched
//!
//! # Design Decisions
//! - Pure function of the request line; no side effects
//! - A rejection renders outward as 404 — a revive request without a
//!   target cannot possibly resolve, so it short-circuits here
//! - No regex; plain segment splitting keeps matching O(n)

use axum::http::Method;

/// A validated reference to one upstream entity.
///
/// Constructed only by the matcher, immutable, scoped to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityReference {
    /// Entity type name as it appears in the path (e.g. `Shot`).
    pub entity_type: String,
    /// Numeric entity id.
    pub id: i64,
}

impl std::fmt::Display for EntityReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.entity_type, self.id)
    }
}

/// Match a request line against the revive pattern.
///
/// Returns the entity reference for `POST /{type}/{id}/revive` with a
/// non-empty type and a numeric id. Everything else — wrong method,
/// missing id segment (`/{type}/revive`, `/{type}/`), trailing
/// segments, non-numeric id — is a rejection.
pub fn match_revive(method: &Method, path: &str) -> Option<EntityReference> {
    if method != Method::POST {
        return None;
    }

    let mut segments = path.trim_start_matches('/').split('/');
    let entity_type = segments.next().filter(|s| !s.is_empty())?;
    let id: i64 = segments.next()?.parse().ok()?;
    if segments.next() != Some("revive") || segments.next().is_some_and(|s| !s.is_empty()) {
        return None;
    }

    Some(EntityReference {
        entity_type: entity_type.to_string(),
        id,
    })
}
