//! Async dweet client.
//!
//! Suspension happens only inside the transport (sending, waiting for
//! headers, reading the body). Cancellation is left to the caller: dropping
//! the future abandons the request and releases the transport's session.

use serde::Serialize;
use tracing::debug;

use crate::client::DweetClient;
use crate::error::DweetError;
use crate::http::{HttpRequest, HttpResponse};
use crate::options::RequestOptions;
use crate::transport::AsyncTransport;
use crate::types::DweetRecord;

#[derive(Debug, Clone)]
pub struct AsyncClient<T> {
    client: DweetClient,
    transport: T,
}

#[cfg(feature = "reqwest")]
impl AsyncClient<crate::transport::ReqwestTransport> {
    /// Client for `base_url` using the `reqwest` transport.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(DweetClient::new(base_url), crate::transport::ReqwestTransport)
    }
}

#[cfg(feature = "reqwest")]
impl Default for AsyncClient<crate::transport::ReqwestTransport> {
    fn default() -> Self {
        Self::new(DweetClient::default(), crate::transport::ReqwestTransport)
    }
}

impl<T: AsyncTransport> AsyncClient<T> {
    pub fn new(client: DweetClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &DweetClient {
        &self.client
    }

    pub async fn dweet_for<P>(
        &self,
        thing: &str,
        payload: &P,
        options: &RequestOptions,
    ) -> Result<DweetRecord, DweetError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.client.build_dweet_for(thing, payload, options)?;
        let response = self.send(request).await?;
        self.client.parse_dweet_for(response)
    }

    pub async fn get_latest_dweet_for(
        &self,
        thing: &str,
        options: &RequestOptions,
    ) -> Result<Vec<DweetRecord>, DweetError> {
        let request = self.client.build_get_latest_dweet_for(thing, options)?;
        let response = self.send(request).await?;
        self.client.parse_get_latest_dweet_for(response)
    }

    pub async fn get_dweets_for(
        &self,
        thing: &str,
        options: &RequestOptions,
    ) -> Result<Vec<DweetRecord>, DweetError> {
        let request = self.client.build_get_dweets_for(thing, options)?;
        let response = self.send(request).await?;
        self.client.parse_get_dweets_for(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, DweetError> {
        debug!("{} {}", request.method.as_str(), request.url);
        self.transport.execute(request).await
    }
}
