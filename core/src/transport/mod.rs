//! Transport seam between the sans-IO core and an HTTP stack.
//!
//! # Design
//! A transport takes an `HttpRequest` and hands back the raw
//! `HttpResponse`. It must not treat a non-2xx status as an error, since
//! status interpretation belongs to `DweetClient`. Faults the transport
//! raises itself (DNS, connect, TLS, body read) become
//! `DweetError::Network` with the native error kept as `source`.
//!
//! Which implementation backs a client is decided when the client is
//! constructed, never per call.

use async_trait::async_trait;

use crate::error::DweetError;
use crate::http::{HttpRequest, HttpResponse};

#[cfg(feature = "reqwest")]
mod reqwest_transport;
#[cfg(feature = "ureq")]
mod ureq_transport;

#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;

/// Executes a request on the calling thread.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DweetError>;
}

/// Executes a request without blocking a worker thread.
#[async_trait]
pub trait AsyncTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DweetError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DweetError> {
        (**self).execute(request)
    }
}

#[async_trait]
impl<'a, T: AsyncTransport + Sync + ?Sized> AsyncTransport for &'a T {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DweetError> {
        (**self).execute(request).await
    }
}
