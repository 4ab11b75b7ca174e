//! Sans-IO client core for the product catalogue.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that sits
//! `FetchController`, which tracks the loading/error/data lifecycle of one
//! retrieval per locator and discards results superseded by a newer request.
//!
//! # Design
//! - `ProductClient` is stateless; it holds only `base_url`.
//! - Retrieval is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - `FetchController` is the only stateful piece. Its generation counter is
//!   what keeps a late response for an old locator from becoming visible.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use client::ProductClient;
pub use controller::{FetchController, Ticket};
pub use error::{FetchError, FetchErrorKind};
pub use http::{HttpRequest, HttpResponse};
pub use state::{FetchState, FetchStatus};
pub use types::{Dimensions, Meta, Product, Review};
