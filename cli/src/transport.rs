//! Executes `todo_core` requests over the network.

use todo_core::{HttpMethod, HttpRequest, HttpResponse};
use ureq::typestate::{WithBody, WithoutBody};
use ureq::RequestBuilder;

#[derive(Debug, thiserror::Error)]
#[error("{method} {url} failed: {message}")]
pub struct TransportError {
    pub method: HttpMethod,
    pub url: String,
    pub message: String,
}

/// Anything that can perform one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a ureq agent.
///
/// HTTP error statuses are returned as data, not `Err`, so that status
/// interpretation stays in `TodoClient::parse_*`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

type UreqResult = Result<ureq::http::Response<ureq::Body>, ureq::Error>;

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(builder: RequestBuilder<WithBody>, body: Option<String>) -> UreqResult {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

fn call(builder: RequestBuilder<WithoutBody>) -> UreqResult {
    builder.call()
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        tracing::debug!(%method, url = %path, "sending request");

        let fail = |e: ureq::Error| TransportError {
            method,
            url: path.clone(),
            message: e.to_string(),
        };

        let mut response = match method {
            HttpMethod::Get => call(with_headers(self.agent.get(&path), &headers)),
            HttpMethod::Delete => call(with_headers(self.agent.delete(&path), &headers)),
            HttpMethod::Post => send(with_headers(self.agent.post(&path), &headers), body),
            HttpMethod::Put => send(with_headers(self.agent.put(&path), &headers), body),
        }
        .map_err(fail)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.body_mut().read_to_string().map_err(fail)?;
        tracing::debug!(status, "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
