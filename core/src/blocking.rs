//! Blocking dweet client.
//!
//! Every call runs one request/response exchange on the calling thread.
//! There is no retry, no caching and no state shared between calls, so a
//! `BlockingClient` over a thread-safe transport can be used from several
//! threads at once.

use serde::Serialize;
use tracing::debug;

use crate::client::DweetClient;
use crate::error::DweetError;
use crate::http::{HttpRequest, HttpResponse};
use crate::options::RequestOptions;
use crate::transport::Transport;
use crate::types::DweetRecord;

#[derive(Debug, Clone)]
pub struct BlockingClient<T> {
    client: DweetClient,
    transport: T,
}

#[cfg(feature = "ureq")]
impl BlockingClient<crate::transport::UreqTransport> {
    /// Client for `base_url` using the `ureq` transport.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(DweetClient::new(base_url), crate::transport::UreqTransport)
    }
}

#[cfg(feature = "ureq")]
impl Default for BlockingClient<crate::transport::UreqTransport> {
    fn default() -> Self {
        Self::new(DweetClient::default(), crate::transport::UreqTransport)
    }
}

impl<T: Transport> BlockingClient<T> {
    pub fn new(client: DweetClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &DweetClient {
        &self.client
    }

    /// Publish `payload` for `thing` and return the record the service
    /// created for it.
    pub fn dweet_for<P>(
        &self,
        thing: &str,
        payload: &P,
        options: &RequestOptions,
    ) -> Result<DweetRecord, DweetError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.client.build_dweet_for(thing, payload, options)?;
        let response = self.send(request)?;
        self.client.parse_dweet_for(response)
    }

    pub fn get_latest_dweet_for(
        &self,
        thing: &str,
        options: &RequestOptions,
    ) -> Result<Vec<DweetRecord>, DweetError> {
        let request = self.client.build_get_latest_dweet_for(thing, options)?;
        let response = self.send(request)?;
        self.client.parse_get_latest_dweet_for(response)
    }

    pub fn get_dweets_for(
        &self,
        thing: &str,
        options: &RequestOptions,
    ) -> Result<Vec<DweetRecord>, DweetError> {
        let request = self.client.build_get_dweets_for(thing, options)?;
        let response = self.send(request)?;
        self.client.parse_get_dweets_for(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, DweetError> {
        debug!("{} {}", request.method.as_str(), request.url);
        self.transport.execute(request)
    }
}
