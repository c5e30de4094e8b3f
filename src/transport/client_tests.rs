//! Tests for `ReqwestClient` against a local server.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderMap;
use axum::routing::post;

use super::*;

/// Serves `router` on an ephemeral port and returns its address.
async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn echo_router() -> Router {
    Router::new()
        .route(
            "/echo",
            post(|headers: HeaderMap, body: String| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                (axum::http::StatusCode::CREATED, format!("{auth}|{body}"))
            }),
        )
        .route(
            "/slow",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        )
}

mod reqwest_client {
    use super::*;

    #[test]
    fn default_creates_same_as_new() {
        let client = ReqwestClient::default();

        assert!(format!("{client:?}").contains("ReqwestClient"));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_sends_headers_and_body() {
        let addr = spawn(echo_router()).await;
        let url = url::Url::parse(&format!("http://{addr}/echo")).unwrap();
        let req = HttpRequest::post(url)
            .with_header(
                ::http::header::AUTHORIZATION,
                ::http::HeaderValue::from_static("Basic abc"),
            )
            .with_body(b"payload".to_vec());

        let response = ReqwestClient::new().request(req).await.unwrap();

        assert_eq!(response.status, ::http::StatusCode::CREATED);
        assert_eq!(response.body, b"Basic abc|payload");
    }

    #[tokio::test]
    async fn request_honors_per_request_timeout() {
        let addr = spawn(echo_router()).await;
        let url = url::Url::parse(&format!("http://{addr}/slow")).unwrap();
        let req = HttpRequest::post(url).with_timeout(Duration::from_millis(100));

        let result = ReqwestClient::new().request(req).await;

        assert!(matches!(result, Err(HttpError::Timeout)), "got {result:?}");
    }

    #[tokio::test]
    async fn request_to_closed_port_returns_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = url::Url::parse(&format!("http://{addr}/")).unwrap();
        let result = ReqwestClient::new().request(HttpRequest::post(url)).await;

        assert!(matches!(result, Err(HttpError::Connection(_))), "got {result:?}");
    }
}
