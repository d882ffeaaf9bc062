//! Stateless request builder and response parser for the dweet API.
//!
//! # Design
//! `DweetClient` holds only a normalised `base_url`. Each operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. Whoever sits between the two
//! (a `Transport`, an async runtime, a C host) does the I/O, so the core
//! stays deterministic.
//!
//! Thing names are opaque to the client: they are percent-encoded as one
//! path segment, so spaces, `/` and `#` reach the service as part of the
//! name.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::DweetError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::options::RequestOptions;
use crate::types::{DweetRecord, ResponseEnvelope};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Join a base URL and an API path with exactly one slash.
///
/// `"http://x"` and `"http://x/"` produce the same result.
pub fn join_url(base_url: &str, api_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        api_path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DweetClient {
    base_url: String,
}

impl Default for DweetClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl DweetClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `payload` as JSON to `/dweet/for/{thing}`.
    ///
    /// Caller headers are kept, except any `Content-Type`, which is replaced
    /// by `application/json`.
    pub fn build_dweet_for<P>(
        &self,
        thing: &str,
        payload: &P,
        options: &RequestOptions,
    ) -> Result<HttpRequest, DweetError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_string(payload).map_err(|source| DweetError::Encode { source })?;

        let mut request = self.request(HttpMethod::Post, "/dweet/for", thing, options)?;
        request
            .headers
            .retain(|(key, _)| !key.eq_ignore_ascii_case(CONTENT_TYPE));
        request
            .headers
            .push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
        request.body = Some(body);
        Ok(request)
    }

    pub fn build_get_latest_dweet_for(
        &self,
        thing: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest, DweetError> {
        self.request(HttpMethod::Get, "/get/latest/dweet/for", thing, options)
    }

    /// The service caps this history (currently at 5 records, newest
    /// first); the client neither limits nor re-sorts it.
    pub fn build_get_dweets_for(
        &self,
        thing: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest, DweetError> {
        self.request(HttpMethod::Get, "/get/dweets/for", thing, options)
    }

    pub fn parse_dweet_for(&self, response: HttpResponse) -> Result<DweetRecord, DweetError> {
        unwrap_envelope(response)
    }

    pub fn parse_get_latest_dweet_for(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<DweetRecord>, DweetError> {
        unwrap_envelope(response)
    }

    pub fn parse_get_dweets_for(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<DweetRecord>, DweetError> {
        unwrap_envelope(response)
    }

    /// `options.base_url` wins over the client's own base URL. `thing` is
    /// appended as a single percent-encoded path segment.
    fn request(
        &self,
        method: HttpMethod,
        api_path: &str,
        thing: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest, DweetError> {
        let base_url = options.base_url.as_deref().unwrap_or(&self.base_url);
        let raw = join_url(base_url, api_path);
        let mut url = Url::parse(&raw).map_err(|source| DweetError::InvalidBaseUrl {
            raw: base_url.to_string(),
            source,
        })?;
        url.path_segments_mut()
            .map_err(|_| DweetError::InvalidBaseUrl {
                raw: base_url.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .push(thing);

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers: options.headers.clone(),
            body: None,
            timeout: options.timeout,
            proxy: options.proxy.clone(),
        })
    }
}

/// Check the status, decode the envelope and convert its `with` payload.
///
/// A non-2xx status short-circuits before the body is looked at.
fn unwrap_envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<T, DweetError> {
    if !response.is_success() {
        return Err(DweetError::TransportFailure {
            status: response.status,
        });
    }
    let envelope: ResponseEnvelope =
        serde_json::from_str(&response.body).map_err(|source| DweetError::Decode { source })?;
    let with: Value = envelope.into_result()?;
    serde_json::from_value(with).map_err(|source| DweetError::Decode { source })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn client() -> DweetClient {
        DweetClient::new("http://localhost:3000")
    }

    const RECORD: &str = r#"{"thing":"sensor","created":"2024-05-01T10:00:00.000Z","content":{"temp":21},"transaction":"3f1c"}"#;

    #[test]
    fn join_url_uses_exactly_one_slash() {
        assert_eq!(join_url("http://x", "/a/b"), "http://x/a/b");
        assert_eq!(join_url("http://x/", "/a/b"), "http://x/a/b");
        assert_eq!(join_url("http://x//", "a/b"), "http://x/a/b");
        assert_eq!(join_url("http://x", "a/b"), "http://x/a/b");
    }

    #[test]
    fn default_client_targets_public_service() {
        let req = DweetClient::default()
            .build_get_dweets_for("sensor", &RequestOptions::new())
            .unwrap();
        assert_eq!(req.url, "https://dweet.io/get/dweets/for/sensor");
    }

    #[test]
    fn from_config_uses_configured_base_url() {
        let config = ClientConfig {
            base_url: "http://10.0.0.2:8080/".to_string(),
        };
        assert_eq!(DweetClient::from_config(&config).base_url(), "http://10.0.0.2:8080");
    }

    #[test]
    fn build_dweet_for_produces_json_post() {
        let req = client()
            .build_dweet_for("sensor", &json!({"temp": 21}), &RequestOptions::new())
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/dweet/for/sensor");
        assert_eq!(
            req.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"temp": 21}));
    }

    #[test]
    fn build_dweet_for_overrides_caller_content_type() {
        let options = RequestOptions::new()
            .header("X-Trace", "abc")
            .header("content-type", "text/plain");
        let req = client()
            .build_dweet_for("sensor", &json!({}), &options)
            .unwrap();
        assert_eq!(
            req.headers,
            vec![
                ("X-Trace".to_string(), "abc".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ]
        );
    }

    #[test]
    fn build_dweet_for_serializes_nested_payloads() {
        let payload = json!({"a": {"b": [1, 2, {"c": null}]}, "d": "e"});
        let req = client()
            .build_dweet_for("sensor", &payload, &RequestOptions::new())
            .unwrap();
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, payload);
    }

    #[test]
    fn build_dweet_for_rejects_unserializable_payload() {
        let mut payload = std::collections::HashMap::new();
        payload.insert((1, 2), "tuple keys are not valid JSON keys");
        let err = client()
            .build_dweet_for("sensor", &payload, &RequestOptions::new())
            .unwrap_err();
        assert!(matches!(err, DweetError::Encode { .. }));
    }

    #[test]
    fn build_get_requests_have_no_body() {
        let options = RequestOptions::new();
        let latest = client().build_get_latest_dweet_for("sensor", &options).unwrap();
        assert_eq!(latest.method, HttpMethod::Get);
        assert_eq!(latest.url, "http://localhost:3000/get/latest/dweet/for/sensor");
        assert!(latest.body.is_none());
        assert!(latest.headers.is_empty());

        let history = client().build_get_dweets_for("sensor", &options).unwrap();
        assert_eq!(history.method, HttpMethod::Get);
        assert_eq!(history.url, "http://localhost:3000/get/dweets/for/sensor");
        assert!(history.body.is_none());
    }

    #[test]
    fn options_pass_through_unchanged() {
        let options = RequestOptions::new()
            .header("Accept", "application/json")
            .timeout(Duration::from_secs(3))
            .proxy("http://proxy.local:8080");
        let req = client().build_get_dweets_for("sensor", &options).unwrap();
        assert_eq!(
            req.headers,
            vec![("Accept".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.timeout, Some(Duration::from_secs(3)));
        assert_eq!(req.proxy.as_deref(), Some("http://proxy.local:8080"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let with_slash = DweetClient::new("http://localhost:3000/");
        let options = RequestOptions::new();
        assert_eq!(
            with_slash.build_get_latest_dweet_for("sensor", &options).unwrap().url,
            client().build_get_latest_dweet_for("sensor", &options).unwrap().url
        );
    }

    #[test]
    fn thing_names_are_encoded_as_one_segment() {
        let options = RequestOptions::new();
        let req = client().build_get_dweets_for("my sensor", &options).unwrap();
        assert_eq!(req.url, "http://localhost:3000/get/dweets/for/my%20sensor");

        let req = client()
            .build_dweet_for("rack/3#top?x=1", &json!({}), &options)
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/dweet/for/rack%2F3%23top%3Fx=1");

        let req = client().build_get_latest_dweet_for("100%", &options).unwrap();
        assert_eq!(req.url, "http://localhost:3000/get/latest/dweet/for/100%25");
    }

    #[test]
    fn base_url_can_be_overridden_per_call() {
        let c = client();
        let default = c.build_get_dweets_for("sensor", &RequestOptions::new()).unwrap();
        let other = c
            .build_get_dweets_for("sensor", &RequestOptions::new().base_url("http://10.0.0.2:8080"))
            .unwrap();
        let other_slash = c
            .build_dweet_for(
                "sensor",
                &json!({}),
                &RequestOptions::new().base_url("http://10.0.0.2:8080/"),
            )
            .unwrap();

        assert_eq!(default.url, "http://localhost:3000/get/dweets/for/sensor");
        assert_eq!(other.url, "http://10.0.0.2:8080/get/dweets/for/sensor");
        assert_eq!(other_slash.url, "http://10.0.0.2:8080/dweet/for/sensor");
        assert_eq!(c.base_url(), "http://localhost:3000");
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let err = DweetClient::new("not a url")
            .build_get_latest_dweet_for("sensor", &RequestOptions::new())
            .unwrap_err();
        assert!(matches!(&err, DweetError::InvalidBaseUrl { raw, .. } if raw == "not a url"));

        let err = client()
            .build_get_dweets_for("sensor", &RequestOptions::new().base_url("mailto:me@example.com"))
            .unwrap_err();
        assert!(matches!(err, DweetError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn parse_dweet_for_success() {
        let body = format!(r#"{{"this":"succeeded","by":"dweeting","the":"dweet","with":{RECORD}}}"#);
        let record = client().parse_dweet_for(HttpResponse::new(200, body)).unwrap();
        assert_eq!(record["thing"], "sensor");
        assert_eq!(record["content"], json!({"temp": 21}));
        assert_eq!(record["transaction"], "3f1c");
    }

    #[test]
    fn parse_get_dweets_for_keeps_service_order() {
        let body = json!({
            "this": "succeeded",
            "with": [
                {"thing": "sensor", "created": "2", "content": {"n": 2}},
                {"thing": "sensor", "created": "1", "content": {"n": 1}},
            ]
        })
        .to_string();
        let records = client().parse_get_dweets_for(HttpResponse::new(200, body)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["created"], "2");
        assert_eq!(records[1]["created"], "1");
    }

    #[test]
    fn parse_get_latest_dweet_for_empty() {
        let body = r#"{"this":"succeeded","with":[]}"#;
        let records = client()
            .parse_get_latest_dweet_for(HttpResponse::new(200, body))
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn not_found_status_ignores_body() {
        let body = r#"{"this":"failed","because":"something else"}"#;
        let err = client()
            .parse_get_latest_dweet_for(HttpResponse::new(404, body))
            .unwrap_err();
        assert!(matches!(err, DweetError::TransportFailure { status: 404 }));
    }

    #[test]
    fn non_json_error_body_is_still_transport_failure() {
        let err = client()
            .parse_dweet_for(HttpResponse::new(500, "<html>oops</html>"))
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn failed_envelope_is_application_failure() {
        let body = r#"{"this":"failed","because":"no storage left"}"#;
        let err = client().parse_dweet_for(HttpResponse::new(200, body)).unwrap_err();
        assert!(
            matches!(&err, DweetError::ApplicationFailure { because } if because == "no storage left")
        );
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = client()
            .parse_get_dweets_for(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, DweetError::Decode { .. }));
    }

    #[test]
    fn with_of_wrong_shape_is_decode_error() {
        let body = format!(r#"{{"this":"succeeded","with":{RECORD}}}"#);
        let err = client()
            .parse_get_dweets_for(HttpResponse::new(200, body))
            .unwrap_err();
        assert!(matches!(err, DweetError::Decode { .. }));
    }
}
