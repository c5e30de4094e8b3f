//! Tests for HTTP request/response types.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::testing::MockHttpClient;

fn endpoint() -> url::Url {
    url::Url::parse("https://api.example.com/v3.1/send").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_starts_without_headers_body_or_timeout() {
        let req = HttpRequest::new(http::Method::PUT, endpoint());

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url, endpoint());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
        assert!(req.timeout.is_none());
    }

    #[test]
    fn post_builder_chains_body_header_and_timeout() {
        let req = HttpRequest::post(endpoint())
            .with_body(b"{}".to_vec())
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            )
            .with_timeout(Duration::from_secs(30));

        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.body.as_deref(), Some(b"{}".as_slice()));
        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(req.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn with_header_appends_repeated_names() {
        let req = HttpRequest::post(endpoint())
            .with_header(http::header::ACCEPT, http::HeaderValue::from_static("text/html"))
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 2);
    }
}

mod http_response {
    use super::*;

    #[test]
    fn json_serializes_body() {
        let resp = HttpResponse::json(http::StatusCode::OK, &serde_json::json!({"a": 1}));

        assert_eq!(resp.status, http::StatusCode::OK);
        assert!(resp.headers.is_empty());
        assert_eq!(resp.body, br#"{"a":1}"#);
    }
}

mod http_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let error = HttpError::Connection(Box::new(std::io::Error::other("refused")));

        assert!(error.to_string().starts_with("Connection error"));
        assert_eq!(error.source().unwrap().to_string(), "refused");
    }

    #[test]
    fn timeout_and_invalid_url_messages() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            HttpError::InvalidUrl("missing scheme".into()).to_string(),
            "Invalid URL: missing scheme"
        );
    }
}

mod http_client_trait {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn arc_client_delegates_to_inner() {
        let mock = Arc::new(MockHttpClient::json(201, &serde_json::json!({})));

        let response = mock.request(HttpRequest::post(endpoint())).await.unwrap();

        assert_eq!(response.status, http::StatusCode::CREATED);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn mock_replays_responses_in_order() {
        let mock = MockHttpClient::new(vec![
            Err(HttpError::Timeout),
            Ok(HttpResponse::json(http::StatusCode::OK, &serde_json::json!({}))),
        ]);

        let first = mock.request(HttpRequest::post(endpoint())).await;
        let second = mock.request(HttpRequest::post(endpoint())).await;

        assert!(matches!(first, Err(HttpError::Timeout)));
        assert_eq!(second.unwrap().status, http::StatusCode::OK);
        assert_eq!(mock.captured_requests().len(), 2);
    }
}
