//! `do_request` against stub servers: headers on the wire, classification of
//! real responses, and transport failures.

mod common;

use std::time::Duration;

use common::{client, stub, ERR_GENERIC_RAW, ERR_NOT_FOUND_RAW, TOKEN, USER_AGENT};
use mks_core::{ApiError, HttpMethod, RequestContext, TransportError};
use mock_server::stub::{unreachable_endpoint, Method, StatusCode, Stub, StubRoute};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn sends_standard_headers() {
    let stub = stub(Method::GET, "/v1/clusters", 200, r#"{"clusters":[]}"#).await;
    let client = client(&stub.endpoint());
    let url = client.url(&["clusters"]);

    let result = client
        .do_request(&RequestContext::background(), HttpMethod::Get, &url, None)
        .await
        .unwrap();
    assert!(stub.called());
    assert_eq!(result.status_code(), 200);
    assert!(result.err().is_none());

    let requests = stub.requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, "/v1/clusters");
    assert_eq!(request.header("x-auth-token"), Some(TOKEN));
    assert_eq!(request.header("user-agent"), Some(USER_AGENT));
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn sends_post_body_verbatim() {
    let stub = stub(Method::POST, "/v1/clusters", 200, r#"{"id":"uuid"}"#).await;
    let client = client(&stub.endpoint());
    let url = client.url(&["clusters"]);
    let body = br#"{"id":"uuid"}"#.to_vec();

    let mut result = client
        .do_request(&RequestContext::background(), HttpMethod::Post, &url, Some(body.clone()))
        .await
        .unwrap();

    let requests = stub.requests().await;
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].body.as_ref(), body.as_slice());

    let echoed: serde_json::Value = result.extract_result().unwrap();
    assert_eq!(echoed["id"], "uuid");
}

#[tokio::test]
async fn response_headers_are_kept() {
    let stub = stub(Method::GET, "/v1/clusters", 200, "{}").await;
    let client = client(&stub.endpoint());
    let url = client.url(&["clusters"]);

    let result = client
        .do_request(&RequestContext::background(), HttpMethod::Get, &url, None)
        .await
        .unwrap();
    let content_type = result
        .headers()
        .iter()
        .find(|(name, _)| name == "content-type")
        .map(|(_, value)| value.as_str());
    assert_eq!(content_type, Some("application/json"));
}

#[tokio::test]
async fn not_found_with_id() {
    let stub = stub(Method::GET, "/v1/clusters/x", 404, ERR_NOT_FOUND_RAW).await;
    let client = client(&stub.endpoint());
    let url = client.url(&["clusters", "x"]);

    let result = client
        .do_request(&RequestContext::background(), HttpMethod::Get, &url, None)
        .await
        .unwrap();
    assert_eq!(result.status_code(), 404);
    assert_eq!(
        result.err(),
        Some(&ApiError::NotFound {
            id: "63ed5342-b22c-4c7a-9d41-c1fe4a142c13".to_string(),
            message: "cluster is not found".to_string(),
        })
    );
}

#[tokio::test]
async fn generic_error_for_400_and_502() {
    for status in [400u16, 502] {
        let stub = stub(Method::GET, "/v1/clusters", status, ERR_GENERIC_RAW).await;
        let client = client(&stub.endpoint());
        let url = client.url(&["clusters"]);

        let result = client
            .do_request(&RequestContext::background(), HttpMethod::Get, &url, None)
            .await
            .unwrap();
        assert_eq!(result.status_code(), status);
        assert_eq!(
            result.err(),
            Some(&ApiError::Generic {
                message: "bad gateway".to_string()
            })
        );
    }
}

#[tokio::test]
async fn unparseable_error_bodies_are_opaque() {
    for (status, body) in [(502u16, ""), (500, "{"), (404, r#"{"error":{"message":"gone"}}"#)] {
        let stub = stub(Method::GET, "/v1/clusters", status, body).await;
        let client = client(&stub.endpoint());
        let url = client.url(&["clusters"]);

        let result = client
            .do_request(&RequestContext::background(), HttpMethod::Get, &url, None)
            .await
            .unwrap();
        let err = result.err().unwrap();
        assert_eq!(err, &ApiError::Opaque { status });
        assert_eq!(
            err.to_string(),
            format!("got the {status} status code from the server")
        );
    }
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let endpoint = unreachable_endpoint().await.unwrap();
    let client = client(&endpoint);
    let url = client.url(&["clusters"]);

    let err = client
        .do_request(&RequestContext::background(), HttpMethod::Get, &url, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Http(_)));
}

#[tokio::test]
async fn cancelled_context_never_reaches_the_server() {
    let stub = stub(Method::GET, "/v1/clusters", 200, "{}").await;
    let client = client(&stub.endpoint());
    let url = client.url(&["clusters"]);
    let ctx = RequestContext::background();
    ctx.cancel();

    let err = client
        .do_request(&ctx, HttpMethod::Get, &url, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Cancelled));
    assert!(!stub.called());
}

#[tokio::test]
async fn deadline_interrupts_slow_server() {
    let stub = Stub::start(
        StubRoute::new(Method::GET, "/v1/clusters")
            .status(StatusCode::OK)
            .body("{}")
            .delay(Duration::from_secs(5)),
    )
    .await
    .unwrap();
    let client = client(&stub.endpoint());
    let url = client.url(&["clusters"]);
    let ctx = RequestContext::background().with_timeout(Duration::from_millis(200));

    let started = std::time::Instant::now();
    let err = client
        .do_request(&ctx, HttpMethod::Get, &url, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::DeadlineExceeded));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn cancellation_interrupts_in_flight_request() {
    let stub = Stub::start(
        StubRoute::new(Method::GET, "/v1/clusters")
            .body("{}")
            .delay(Duration::from_secs(5)),
    )
    .await
    .unwrap();
    let client = client(&stub.endpoint());
    let url = client.url(&["clusters"]);
    let token = CancellationToken::new();
    let ctx = RequestContext::background().with_cancellation(token.clone());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        token.cancel();
    });

    let started = std::time::Instant::now();
    let err = client
        .do_request(&ctx, HttpMethod::Get, &url, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(4));
}
