//! Per-call options handed through to the transport.
//!
//! Recognised keys:
//! - `base_url`: overrides the client's base URL for this call only.
//! - `headers`: extra request headers, sent in insertion order.
//! - `timeout`: overall deadline for the round-trip.
//! - `proxy`: proxy URL the transport routes the request through.
//!
//! Apart from `base_url`, the client does not interpret any of them. The
//! publish call always ends up with `Content-Type: application/json`
//! regardless of what the caller put in `headers`.

use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub base_url: Option<String>,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}
