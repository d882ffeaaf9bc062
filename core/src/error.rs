//! Error type for the dweet client.
//!
//! # Design
//! The two failures the service itself reports are normalised:
//! `TransportFailure` for any status outside `[200, 300)` (the body is not
//! read) and `ApplicationFailure` for an envelope whose outcome is
//! `"failed"`. Everything below that (serde and transport faults) is carried
//! as the `source` of its variant without being reinterpreted.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DweetError {
    /// The server answered with a status outside `[200, 300)`.
    #[error("HTTP {status} response")]
    TransportFailure { status: u16 },

    /// The envelope reported `"this": "failed"`.
    #[error("{because}")]
    ApplicationFailure { because: String },

    /// The base URL (or the one given in `RequestOptions`) cannot carry
    /// an API path.
    #[error("provided base url ({raw}) is malformed: {source}")]
    InvalidBaseUrl {
        raw: String,
        source: url::ParseError,
    },

    #[error("failed to encode payload: {source}")]
    Encode { source: serde_json::Error },

    #[error("failed to decode response body: {source}")]
    Decode { source: serde_json::Error },

    /// DNS, connection, TLS or body-read faults raised by the transport.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DweetError {
    #[cfg_attr(not(any(feature = "ureq", feature = "reqwest")), allow(dead_code))]
    pub(crate) fn network(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        DweetError::Network {
            url: url.into(),
            source: source.into(),
        }
    }

    /// HTTP status carried by a `TransportFailure`.
    pub fn status(&self) -> Option<u16> {
        match self {
            DweetError::TransportFailure { status } => Some(*status),
            _ => None,
        }
    }

    /// Reason reported by the service for an `ApplicationFailure`.
    pub fn because(&self) -> Option<&str> {
        match self {
            DweetError::ApplicationFailure { because } => Some(because),
            _ => None,
        }
    }
}
