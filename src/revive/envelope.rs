//! Upstream reply envelope.
//!
//! The production tracker reports every outcome through one generic
//! JSON object. No schema is guaranteed beyond "valid JSON object";
//! absence of a field is a valid state, not an error.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Decoded upstream envelope. All fields optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamEnvelope {
    /// Set to `true` when the upstream rejected the operation.
    pub exception: Option<bool>,

    /// Free-text failure description. The only discriminant between
    /// semantically different failures.
    pub message: Option<String>,

    /// Numeric code shared across many unrelated failure types; kept
    /// for logging, useless for classification.
    pub error_code: Option<i64>,

    /// Success marker. The upstream encodes it as a boolean or as a
    /// result object, so it is held as raw JSON.
    pub results: Option<Value>,
}

/// Failure to decode a body into an envelope. Always a protocol
/// violation on the upstream's side.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("upstream body is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("upstream body is not a JSON object")]
    NotAnObject,

    #[error("upstream envelope field has wrong type: {0}")]
    FieldType(serde_json::Error),
}

impl UpstreamEnvelope {
    /// Decode a raw upstream body.
    ///
    /// A body that is valid JSON but not an object (bare string,
    /// array, number) fails with `NotAnObject`; an object whose marker
    /// fields carry the wrong primitive type fails with `FieldType`.
    pub fn parse(body: &[u8]) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(EnvelopeError::NotAnObject);
        }
        serde_json::from_value(value).map_err(EnvelopeError::FieldType)
    }

    /// Whether the envelope signals success.
    pub fn has_results(&self) -> bool {
        self.results.as_ref().is_some_and(is_truthy)
    }

    /// Whether the envelope signals an application-level rejection.
    pub fn is_exception(&self) -> bool {
        self.exception == Some(true)
    }
}

/// Loose truthiness over the upstream's ad-hoc encodings: `true`, a
/// non-zero number, or a non-empty string/array/object all count.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
