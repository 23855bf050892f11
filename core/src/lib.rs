//! Blocking client for the Crowdin v1 localization-management API.
//!
//! # Overview
//! Every operation builds one HTTP request (multipart POST or query-string
//! GET) against a fixed Crowdin endpoint, executes it through a `Transport`
//! and decodes the JSON answer into a typed envelope. Two operations,
//! `download_translations` and `export_file`, write the response body to a
//! local file instead.
//!
//! # Design
//! - `CrowdinConfig` is immutable; `CrowdinClient::with_*` returns new handles
//!   so concurrent calls never observe a half-applied reconfiguration.
//! - `RequestDescriptor` builds plain-data `HttpRequest` values and the
//!   `response` module decodes plain-data `HttpResponse` values. Only the
//!   `Transport` performs network I/O, which makes everything else testable
//!   offline.
//! - Upload files are streamed from disk while the request is sent and
//!   downloads are streamed into a staged file, so file contents are never
//!   held in memory as a whole.
//! - Caller-supplied project identifiers and package names are encoded as
//!   single URL path segments.
//! - Nothing is retried. Transport failures, rejected calls, undecodable
//!   bodies and local I/O failures are distinct `CrowdinError` variants.
//! - Logging goes through `tracing` at call boundaries only.

pub mod client;
pub mod config;
mod download;
pub mod error;
pub mod http;
pub mod lenient;
pub mod multipart;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use client::CrowdinClient;
pub use config::CrowdinConfig;
pub use error::{BoxError, CrowdinError, RemoteError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody, ResponseStream};
pub use request::RequestDescriptor;
pub use transport::{Transport, UreqTransport};
pub use types::*;
