//! Fetch lifecycle and page rendering against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port inside the test's own
//! runtime and drives `Fetcher` through `ReqwestTransport`, so requests,
//! status handling, parsing and rendering run end-to-end over real HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use product_core::{FetchError, FetchStatus, Product};
use product_page::{render_page, Currency, Fetcher, Locale, MoneyFormat, ReqwestTransport};

async fn start_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    addr
}

fn fetcher() -> Fetcher<Product, ReqwestTransport> {
    Fetcher::new(ReqwestTransport::new(Some(Duration::from_secs(5))).unwrap())
}

fn inr() -> MoneyFormat {
    MoneyFormat::new(Locale::EnIn, Currency::Inr, 82.0)
}

#[tokio::test]
async fn success_round_trip() {
    let addr = start_server().await;
    let mut fetcher = fetcher();

    fetcher.activate(&format!("http://{addr}/products/115"));
    assert!(fetcher.state().is_loading());

    let state = fetcher.settled().await;
    let expected: Product = serde_json::from_value(mock_server::fixtures()[0].clone()).unwrap();
    assert_eq!(state.data(), Some(&expected));
    assert!(state.error().is_none());
}

#[tokio::test]
async fn not_found_sets_error_only() {
    let addr = start_server().await;
    let mut fetcher = fetcher();

    fetcher.activate(&format!("http://{addr}/products/9999"));
    let state = fetcher.settled().await;
    assert!(state.data().is_none());
    assert!(matches!(
        state.error(),
        Some(FetchError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let addr = start_server().await;
    let mut fetcher = fetcher();

    fetcher.activate(&format!("http://{addr}/malformed"));
    let state = fetcher.settled().await;
    assert!(matches!(state.error(), Some(FetchError::Parse(_))));
}

#[tokio::test]
async fn timeout_is_a_network_error() {
    let addr = start_server().await;
    let mut fetcher = Fetcher::<Product, _>::new(
        ReqwestTransport::new(Some(Duration::from_millis(50))).unwrap(),
    );

    fetcher.activate(&format!("http://{addr}/products/2?delay_ms=500"));
    let state = fetcher.settled().await;
    assert!(matches!(
        state.error(),
        Some(FetchError::Network { timed_out: true, .. })
    ));
}

#[tokio::test]
async fn delayed_first_response_does_not_override_second() {
    let addr = start_server().await;
    let mut fetcher = fetcher();

    fetcher.activate(&format!("http://{addr}/products/115?delay_ms=300"));
    fetcher.activate(&format!("http://{addr}/products/2?delay_ms=10"));

    let state = fetcher.settled().await;
    assert_eq!(state.data().map(|p| p.id), Some(2));

    tokio::time::sleep(Duration::from_millis(400)).await;
    let state = fetcher.state();
    assert_eq!(state.status(), FetchStatus::Succeeded);
    assert_eq!(state.data().map(|p| p.id), Some(2));
}

#[tokio::test]
async fn locator_change_restarts_lifecycle() {
    let addr = start_server().await;
    let mut fetcher = fetcher();

    fetcher.activate(&format!("http://{addr}/products/9999"));
    assert_eq!(fetcher.settled().await.status(), FetchStatus::Failed);

    assert!(fetcher.set_locator(&format!("http://{addr}/products/2")));
    assert!(fetcher.state().error().is_none());
    assert!(fetcher.state().is_loading());
    assert_eq!(fetcher.settled().await.data().map(|p| p.id), Some(2));
}

#[tokio::test]
async fn renders_page_for_served_product() {
    let addr = start_server().await;
    let transport = ReqwestTransport::new(None).unwrap();

    let html = render_page(transport, &format!("http://{addr}/products/2"), &inr())
        .await
        .unwrap();
    assert!(html.contains("<h1>Plain Mug</h1>"));
    assert!(html.contains("₹8,200.00"));
    assert!(html.contains("No reviews yet. Be the first to review!"));
    assert!(html.contains("out-of-stock"));
}

#[tokio::test]
async fn renders_error_for_server_failure() {
    let addr = start_server().await;
    let transport = ReqwestTransport::new(None).unwrap();

    let html = render_page(transport, &format!("http://{addr}/status/500"), &inr())
        .await
        .unwrap();
    assert_eq!(
        html,
        "<div class=\"error\">Error: request failed with status 500</div>\n"
    );
}
