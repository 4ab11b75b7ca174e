//! Async host and HTML presentation for the product page.
//!
//! # Overview
//! `product-core` decides what to request and how to interpret the answer;
//! this crate performs the requests on tokio through a `Transport`, tracks
//! the lifecycle with `Fetcher`, and renders the resulting state as HTML.
//!
//! # Design
//! - `Transport` is the only I/O seam. Tests substitute scripted transports
//!   or point `ReqwestTransport` at the mock server.
//! - Rendering is pure: `render_state` depends only on the fetch state and
//!   the `MoneyFormat`, so currency, locale and conversion rate are
//!   configuration rather than constants. Markup lives in `templates/`.

pub mod config;
pub mod fetcher;
pub mod format;
pub mod render;
pub mod transport;

pub use config::{ConfigError, Settings};
pub use fetcher::Fetcher;
pub use format::{Currency, Locale, MoneyFormat};
pub use render::{render_product, render_state};
pub use transport::{ReqwestTransport, Transport};

use product_core::Product;

/// Fetch the product at `url` once and render the settled state.
///
/// Fetch failures are rendered into the page; only template errors are
/// returned.
pub async fn render_page<X: Transport>(
    transport: X,
    url: &str,
    money: &MoneyFormat,
) -> tera::Result<String> {
    let mut fetcher = Fetcher::<Product, X>::new(transport);
    fetcher.activate(url);
    let state = fetcher.settled().await;
    render_state(&state, money)
}
