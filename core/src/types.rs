//! Wire model of the dweet API.
//!
//! # Design
//! A `DweetRecord` stays an opaque JSON object. The service documents
//! `thing`, `created`, `content` and `transaction`, but the client returns
//! whatever it receives unmodified.
//!
//! Every endpoint wraps its answer in a `ResponseEnvelope`:
//! `{"this": "succeeded", "with": ...}` or
//! `{"this": "failed", "because": "..."}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DweetError;

/// A single dweet as returned by the service.
pub type DweetRecord = serde_json::Map<String, Value>;

/// Value of the envelope's `this` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Succeeded,
    Failed,
    /// Anything else. Only `"failed"` counts as a failure.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub this: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub because: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<Value>,
}

impl ResponseEnvelope {
    /// Unwrap the `with` payload, or turn a failed outcome into
    /// `ApplicationFailure`.
    pub fn into_result(self) -> Result<Value, DweetError> {
        if self.this == Outcome::Failed {
            return Err(DweetError::ApplicationFailure {
                because: self.because.unwrap_or_default(),
            });
        }
        self.with.ok_or_else(|| DweetError::Decode {
            source: serde::de::Error::missing_field("with"),
        })
    }
}
