//! Product retrieval against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the core client and
//! the fetch controller over real HTTP using ureq. Validates that request
//! building, status handling and response parsing work end-to-end, and that
//! the generation guard holds when responses are settled out of order.

use std::net::SocketAddr;

use product_core::{
    FetchController, FetchError, FetchStatus, HttpRequest, HttpResponse, Product, ProductClient,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// interpret the status.
fn execute(req: &HttpRequest) -> Result<HttpResponse, FetchError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = agent
        .get(&req.url)
        .call()
        .map_err(|e| FetchError::network(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse { status, body })
}

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn product_retrieval() {
    let addr = start_server();
    let client = ProductClient::new(&format!("http://{addr}"));

    // Step 1: fetch an existing product.
    let req = client.build_get_product(115);
    let product = client.parse_get_product(execute(&req).unwrap()).unwrap();
    assert_eq!(product.title, "Spoon");
    assert_eq!(product.reviews.len(), 3);

    // Step 2: the parsed product matches the served fixture exactly.
    let expected: Product = serde_json::from_value(mock_server::fixtures()[0].clone()).unwrap();
    assert_eq!(product, expected);

    // Step 3: unknown product surfaces the status.
    let req = client.build_get_product(9999);
    let err = client.parse_get_product(execute(&req).unwrap()).unwrap_err();
    assert!(matches!(err, FetchError::HttpStatus { status: 404, .. }));

    // Step 4: a 200 with a non-JSON body is a parse failure.
    let req = HttpRequest {
        url: format!("http://{addr}/malformed"),
    };
    let err = client.parse_get_product(execute(&req).unwrap()).unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[test]
fn controller_over_live_server() {
    let addr = start_server();
    let client = ProductClient::new(&format!("http://{addr}"));
    let mut controller = FetchController::<Product>::new();

    // Step 1: success.
    let ticket = controller.activate(&client.product_url(2));
    assert!(controller.state().is_loading());
    controller.settle(&ticket, execute(ticket.request()));
    assert_eq!(controller.state().data().map(|p| p.id), Some(2));

    // Step 2: server error.
    let ticket = controller.activate(&format!("http://{addr}/status/500"));
    controller.settle(&ticket, execute(ticket.request()));
    assert_eq!(controller.state().status(), FetchStatus::Failed);
    assert!(controller.state().error().unwrap().is_retryable());

    // Step 3: two activations, the older one settled last.
    let first = controller.activate(&client.product_url(115));
    let second = controller.activate(&client.product_url(2));
    let first_response = execute(first.request());
    let second_response = execute(second.request());
    assert!(controller.settle(&second, second_response));
    assert!(!controller.settle(&first, first_response));
    assert_eq!(controller.state().data().map(|p| p.id), Some(2));
}

#[test]
fn connection_refused_is_a_network_error() {
    // Bind then drop to get a port nothing is listening on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let mut controller = FetchController::<Product>::new();

    let ticket = controller.activate(&format!("http://{addr}/products/1"));
    controller.settle(&ticket, execute(ticket.request()));
    assert!(matches!(controller.state().error(), Some(FetchError::Network { .. })));
}
