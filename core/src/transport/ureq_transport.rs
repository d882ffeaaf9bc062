use tracing::trace;
use ureq::Agent;

use super::Transport;
use crate::error::DweetError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Blocking transport backed by `ureq`.
///
/// An agent is configured per call so each request gets its own timeout
/// and proxy. Status codes are returned as data, never as `Err`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn agent(request: &HttpRequest) -> Result<Agent, DweetError> {
        let mut config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(request.timeout);
        if let Some(proxy) = &request.proxy {
            let proxy = ureq::Proxy::new(proxy).map_err(|e| DweetError::network(&request.url, e))?;
            config = config.proxy(Some(proxy));
        }
        Ok(config.build().new_agent())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, DweetError> {
        let agent = Self::agent(&request)?;
        let url = request.url;

        let sent = match request.method {
            HttpMethod::Get => {
                let mut builder = agent.get(&url);
                for (key, value) in &request.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = agent.post(&url);
                for (key, value) in &request.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                match request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = sent.map_err(|e| DweetError::network(&url, e))?;

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
            .body_mut()
            .read_to_string()
            .map_err(|e| DweetError::network(&url, e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
