//! Terminal outcome of a revive request.

use axum::http::StatusCode;

/// Classified result of interpreting an upstream reply.
///
/// This is the sole output of the classifier and the sole input to
/// building the outward response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevivalOutcome {
    /// Upstream confirmed the entity was revived.
    Success,
    /// The entity does not exist upstream (or the request named no entity).
    NotFound,
    /// A permission rule blocked the revive for this user.
    Forbidden,
    /// Upstream broke its own protocol (non-JSON body, wrong field types)
    /// or was unreachable.
    MalformedUpstream,
    /// Application-level rejection we do not special-case; carries the
    /// upstream message through for caller visibility.
    ClientError(String),
}

impl RevivalOutcome {
    /// Fixed outward status mapping. Only the status code is a stable
    /// contract for callers; bodies are advisory.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RevivalOutcome::Success => StatusCode::OK,
            RevivalOutcome::NotFound => StatusCode::NOT_FOUND,
            RevivalOutcome::Forbidden => StatusCode::FORBIDDEN,
            RevivalOutcome::ClientError(_) => StatusCode::BAD_REQUEST,
            RevivalOutcome::MalformedUpstream => StatusCode::BAD_GATEWAY,
        }
    }

    /// Stable label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            RevivalOutcome::Success => "success",
            RevivalOutcome::NotFound => "not_found",
            RevivalOutcome::Forbidden => "forbidden",
            RevivalOutcome::ClientError(_) => "client_error",
            RevivalOutcome::MalformedUpstream => "malformed_upstream",
        }
    }
}
