use async_trait::async_trait;
use reqwest::Method;
use tracing::trace;

use super::AsyncTransport;
use crate::error::DweetError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Async transport backed by `reqwest`.
///
/// A fresh `reqwest::Client` is built for every call and dropped when the
/// call returns, on success and on error alike. No connection pool outlives
/// a single request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }

    fn session(request: &HttpRequest) -> Result<reqwest::Client, DweetError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(proxy) = &request.proxy {
            let proxy =
                reqwest::Proxy::all(proxy.as_str()).map_err(|e| DweetError::network(&request.url, e))?;
            builder = builder.proxy(proxy);
        }
        builder
            .build()
            .map_err(|e| DweetError::network(&request.url, e))
    }
}

#[async_trait]
impl AsyncTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DweetError> {
        let session = Self::session(&request)?;
        let url = request.url;

        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = session.request(method, url.as_str());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DweetError::network(&url, e))?;

        let status = response.status().as_u16();
        trace!("{url} answered with {status}");
        let headers = response
            .headers()
            .iter()
            .filter_map(|(key, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (key.to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| DweetError::network(&url, e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
