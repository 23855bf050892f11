//! HTTP request and response types described as plain data.
//!
//! # Design
//! The request builder produces `HttpRequest` values and the decoder consumes
//! `HttpResponse` values; neither touches the network. A `Transport`
//! implementation sits between the two and performs the actual round-trip,
//! which keeps building and decoding deterministic and easy to test.
//!
//! Bodies are streams. Uploads reference files on disk that are read while
//! the request is sent, and a `ResponseStream` hands the body over unread so
//! downloads can go straight to disk. JSON responses are read into an
//! `HttpResponse` first.

use std::fmt;
use std::io::{self, Read};
use std::time::Duration;

use crate::error::TransportError;
use crate::multipart::MultipartBody;

/// HTTP method for a request. The Crowdin v1 API only uses these two.
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
/// `url` is absolute and already carries the query string. `timeout`, when
/// set, overrides the transport's whole-call timeout for this request only.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Multipart(MultipartBody),
}

impl RequestBody {
    pub fn len(&self) -> u64 {
        match self {
            RequestBody::Empty => 0,
            RequestBody::Multipart(body) => body.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stream the body, opening upload files as they are reached.
    pub fn reader(&self) -> Box<dyn Read + Send> {
        match self {
            RequestBody::Empty => Box::new(io::empty()),
            RequestBody::Multipart(body) => Box::new(body.reader()),
        }
    }

    /// Read the whole body into memory. Meant for transports without
    /// streaming support and for inspecting requests in tests.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.reader().read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// A response whose body has not been read yet.
pub struct ResponseStream {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Box<dyn Read>,
}

impl ResponseStream {
    /// Wrap an in-memory body.
    pub fn from_bytes(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body: Box::new(io::Cursor::new(body)),
        }
    }

    /// Read the remaining body into a plain-data `HttpResponse`.
    pub fn into_response(mut self) -> Result<HttpResponse, TransportError> {
        let mut body = Vec::new();
        self.body.read_to_end(&mut body).map_err(TransportError::body)?;
        Ok(HttpResponse {
            status: self.status,
            headers: self.headers,
            body,
        })
    }
}

impl fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseStream")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Lossy UTF-8 view of the body, used for diagnostics and error values.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
