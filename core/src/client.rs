//! Stateless HTTP request builder and response parser for the product API.
//!
//! # Design
//! `ProductClient` holds only a `base_url` and carries no mutable state
//! between calls. Retrieval is split into a `build_*` function that produces
//! an `HttpRequest` and a `parse_*` function that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! The free functions `build_get` and `parse_json` are the locator-level
//! primitives the fetch controller uses for arbitrary payload types.

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Product;

/// Synchronous, stateless client for the product API.
#[derive(Debug, Clone)]
pub struct ProductClient {
    base_url: String,
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The locator of a single product.
    pub fn product_url(&self, id: u64) -> String {
        format!("{}/products/{id}", self.base_url)
    }

    pub fn build_get_product(&self, id: u64) -> HttpRequest {
        build_get(&self.product_url(id))
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, FetchError> {
        parse_json(response)
    }
}

/// Build a GET request for an arbitrary locator.
pub fn build_get(locator: &str) -> HttpRequest {
    HttpRequest {
        url: locator.to_string(),
    }
}

/// Check the status and deserialize the body as `T`.
pub fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, FetchError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Map non-success status codes to `FetchError::HttpStatus`.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if response.is_success() {
        return Ok(());
    }
    Err(FetchError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}
