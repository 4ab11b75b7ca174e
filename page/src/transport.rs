//! Host side of the host-does-IO split: executes core-built requests.

use std::time::Duration;

use async_trait::async_trait;
use product_core::{FetchError, HttpRequest, HttpResponse};
use tracing::warn;

/// Executes a plain-data request and returns the plain-data response.
///
/// Non-2xx responses are returned as `Ok`; interpreting the status is the
/// core's job. `Err` is reserved for requests that produced no response.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// `Transport` over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::network(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let response = self
            .client
            .get(&request.url)
            .send()
            .await
            .map_err(|e| transport_error(&request, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&request, e))?;
        Ok(HttpResponse { status, body })
    }
}

fn transport_error(request: &HttpRequest, error: reqwest::Error) -> FetchError {
    warn!(url = request.url.as_str(), %error, "request failed");
    if error.is_timeout() {
        FetchError::timeout(error.to_string())
    } else {
        FetchError::network(error.to_string())
    }
}
