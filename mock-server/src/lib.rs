use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

const FIXTURES: &str = include_str!("../../test-vectors/products.json");

pub type Catalog = Arc<HashMap<u64, Value>>;

#[derive(Debug, Deserialize)]
pub struct FetchOptions {
    /// Hold the response back for this many milliseconds.
    pub delay_ms: Option<u64>,
}

/// The bundled product fixtures, as served by `app()`.
pub fn fixtures() -> Vec<Value> {
    serde_json::from_str(FIXTURES).expect("bundled fixtures are valid JSON")
}

pub fn app() -> Router {
    app_with(fixtures())
}

/// Build the router over an explicit set of products, keyed by their `id`.
pub fn app_with(products: Vec<Value>) -> Router {
    let catalog: Catalog = Arc::new(
        products
            .into_iter()
            .filter_map(|p| p["id"].as_u64().map(|id| (id, p)))
            .collect(),
    );
    Router::new()
        .route("/products/{id}", get(get_product))
        .route("/status/{code}", get(status))
        .route("/malformed", get(malformed))
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_product(
    State(catalog): State<Catalog>,
    Path(id): Path<u64>,
    Query(options): Query<FetchOptions>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if let Some(ms) = options.delay_ms {
        debug!(id, ms, "delaying product response");
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
    catalog.get(&id).cloned().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Product with id '{id}' not found") })),
        )
    })
}

async fn status(Path(code): Path<u16>) -> Result<impl IntoResponse, StatusCode> {
    let code = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((code, format!("status {}", code.as_u16())))
}

async fn malformed() -> &'static str {
    "<html><body>not json</body></html>"
}
