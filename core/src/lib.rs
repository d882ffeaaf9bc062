//! Client core for the dweet message-publishing service.
//!
//! # Overview
//! Three operations are exposed: publish a payload for a thing
//! (`dweet_for`), fetch the latest dweet for a thing
//! (`get_latest_dweet_for`) and fetch the short history kept by the service
//! (`get_dweets_for`).
//!
//! # Design
//! - `DweetClient` is stateless and never touches the network. Each
//!   operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`).
//! - The round-trip itself goes through an injected `Transport` or
//!   `AsyncTransport`. `BlockingClient` and `AsyncClient` compose the core
//!   with a transport picked at construction time, so both variants share
//!   URL building and error classification.
//! - Records are returned as opaque JSON objects; the service owns their
//!   schema.

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod nonblocking;
pub mod options;
pub mod transport;
pub mod types;

pub use blocking::BlockingClient;
pub use client::{join_url, DweetClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::DweetError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use nonblocking::AsyncClient;
pub use options::RequestOptions;
pub use transport::{AsyncTransport, Transport};
pub use types::{DweetRecord, Outcome, ResponseEnvelope};

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
