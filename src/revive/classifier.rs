//! Upstream reply classification.
//!
//! # Responsibilities
//! - Decode the raw upstream body into an envelope
//! - Decide exactly one `RevivalOutcome` per reply
//! - Distinguish known failure classes by message signature
//!
//! # Design Decisions
//! - Precedence is fixed: decode, success marker, exception signatures,
//!   defensive fallback. First match wins — failure messages can
//!   coincidentally contain more than one trigger substring.
//! - Signatures are an ordered table of (substring, outcome) rules,
//!   extended by appending. The upstream offers no structured error
//!   taxonomy, only a reused numeric code and free text, so substring
//!   matching is the only available signal. A wording change upstream
//!   silently downgrades a failure to the generic class; the fixture
//!   tests below pin the exact phrases in production use.

use crate::revive::envelope::UpstreamEnvelope;
use crate::revive::outcome::RevivalOutcome;

/// A known upstream failure signature.
struct SignatureRule {
    /// Substring searched for in the exception message.
    needle: &'static str,
    /// Outcome when the needle is found.
    outcome: fn(&str) -> RevivalOutcome,
}

/// Known signatures, checked top-down. Revive is implemented upstream
/// as an inverse delete, so the messages come from the delete/retire
/// API's permission and existence checks.
const SIGNATURE_RULES: &[SignatureRule] = &[
    SignatureRule {
        needle: "can not be deleted by this user",
        outcome: |_| RevivalOutcome::Forbidden,
    },
    SignatureRule {
        needle: "does not exist",
        outcome: |_| RevivalOutcome::NotFound,
    },
];

/// Classify a raw upstream reply body into an outcome.
///
/// `upstream_status` is informational only — the upstream signals all
/// outcomes with status 200, so branching happens on body content.
pub fn classify(upstream_status: u16, body: &[u8]) -> RevivalOutcome {
    let envelope = match UpstreamEnvelope::parse(body) {
        Ok(env) => env,
        Err(err) => {
            tracing::warn!(
                upstream_status,
                error = %err,
                "Upstream reply violated the envelope contract"
            );
            return RevivalOutcome::MalformedUpstream;
        }
    };

    if envelope.has_results() {
        return RevivalOutcome::Success;
    }

    if envelope.is_exception() {
        let message = envelope.message.as_deref().unwrap_or("");
        for rule in SIGNATURE_RULES {
            if message.contains(rule.needle) {
                return (rule.outcome)(message);
            }
        }
        tracing::debug!(
            error_code = envelope.error_code,
            message,
            "Unrecognized upstream exception, passing message through"
        );
        return RevivalOutcome::ClientError(message.to_string());
    }

    // Well-formed JSON with neither marker. Not expected in normal
    // operation; treated as a rejection rather than a silent success.
    RevivalOutcome::ClientError("upstream reply carried no result or exception".to_string())
}
