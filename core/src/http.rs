//! HTTP request and response values for the host-does-IO pattern.
//!
//! # Design
//! These types describe a single exchange as plain data. `DweetClient`
//! builds `HttpRequest` values and parses `HttpResponse` values; a
//! `Transport` (or the C host, through the FFI crate) performs the I/O.
//!
//! All fields use owned types so values can cross thread and FFI
//! boundaries without lifetime concerns.

use std::time::Duration;

/// HTTP methods used by the dweet API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `timeout` and `proxy` come straight from `RequestOptions`; the client
/// never sets them on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Whether the status lies in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
