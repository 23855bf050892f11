//! Pluggable HTTP execution.
//!
//! # Design
//! `CrowdinClient` never talks to the network itself; it hands a finished
//! `HttpRequest` to a `Transport` and gets a `ResponseStream` back. The
//! default `UreqTransport` is a blocking ureq agent. Tests and embedders with
//! their own HTTP stack supply a different implementation.

use std::io::{self, Read};
use std::time::Duration;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, ResponseStream};

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx responses as `Ok` data; status
/// interpretation belongs to the client. The request body should be
/// streamed from `HttpRequest::body` rather than collected first. Body read
/// errors caused by an elapsed timeout must carry `io::ErrorKind::TimedOut`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<ResponseStream, TransportError>;
}

/// Blocking transport backed by a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(Some(connect_timeout))
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a caller-configured agent (proxy, TLS, user agent).
    ///
    /// The agent must be built with `http_status_as_error(false)` so rejected
    /// calls come back as responses.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<ResponseStream, TransportError> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                if let Some(timeout) = request.timeout {
                    builder = builder.config().timeout_global(Some(timeout)).build();
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                if let Some(timeout) = request.timeout {
                    builder = builder.config().timeout_global(Some(timeout)).build();
                }
                builder.send(ureq::SendBody::from_owned_reader(request.body.reader()))
            }
        };
        let response = result.map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        Ok(ResponseStream {
            status,
            headers,
            body: Box::new(UreqBody(response.into_body().into_reader())),
        })
    }
}

/// Response body reader that reports ureq timeouts as `TimedOut`.
struct UreqBody(ureq::BodyReader<'static>);

impl Read for UreqBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf).map_err(|e| match ureq::Error::from(e) {
            err @ ureq::Error::Timeout(_) => io::Error::new(io::ErrorKind::TimedOut, err),
            other => other.into_io(),
        })
    }
}

fn transport_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout(Box::new(err)),
        ureq::Error::Io(io) if io.kind() == io::ErrorKind::TimedOut => {
            TransportError::Timeout(Box::new(io))
        }
        other => TransportError::Connection(Box::new(other)),
    }
}
