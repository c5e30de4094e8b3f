//! Tests for `WebhookReceiver`.

use std::sync::Arc;

use http::{HeaderMap, HeaderValue, StatusCode};
use secrecy::SecretString;
use serde_json::json;

use super::*;
use crate::events::MailEvent;
use crate::testing::RecordingSink;

const SECRET: &str = "test_webhook_secret";

fn secured() -> (WebhookReceiver<Arc<RecordingSink>>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let receiver = WebhookReceiver::new(Arc::clone(&sink), Some(SecretString::new(SECRET.into())));
    (receiver, sink)
}

fn unsecured() -> (WebhookReceiver<Arc<RecordingSink>>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (WebhookReceiver::new(Arc::clone(&sink), None), sink)
}

fn signed(body: &[u8]) -> HeaderMap {
    let signature = SignatureVerifier::new(SecretString::new(SECRET.into())).sign(body);
    let mut headers = HeaderMap::new();
    headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&signature).unwrap());
    headers
}

mod signature_verifier {
    use super::*;

    #[test]
    fn known_vector_verifies() {
        let verifier = SignatureVerifier::new(SecretString::new(SECRET.into()));
        let body = br#"{"event":"open","email":"user@example.com"}"#;

        assert_eq!(
            verifier.sign(body),
            "7ce18e8bed7b7d03567a1153dd66c2d9e45a5a5db678c2f065978b2b5bf01bfc"
        );
        assert!(verifier.verify(
            "7ce18e8bed7b7d03567a1153dd66c2d9e45a5a5db678c2f065978b2b5bf01bfc",
            body
        ));
    }

    #[test]
    fn rejects_tampered_body_and_malformed_hex() {
        let verifier = SignatureVerifier::new(SecretString::new(SECRET.into()));
        let signature = verifier.sign(b"original");

        assert!(!verifier.verify(&signature, b"tampered"));
        assert!(!verifier.verify("not-hex", b"original"));
        assert!(!verifier.verify("", b"original"));
    }

    #[test]
    fn requires_exact_lowercase_hex() {
        let verifier = SignatureVerifier::new(SecretString::new(SECRET.into()));
        let signature = verifier.sign(b"original");

        assert!(!verifier.verify(&signature.to_uppercase(), b"original"));
        assert!(!verifier.verify(&format!(" {signature} "), b"original"));
        assert!(!verifier.verify(&format!("{signature}\n"), b"original"));
        assert!(verifier.verify(&signature, b"original"));
    }
}

mod secured_receiver {
    use super::*;

    #[test]
    fn valid_signature_processes_events() {
        let (receiver, sink) = secured();
        let body = br#"[{"event":"sent","email":"a@example.com"},{"event":"open","email":"b@example.com"}]"#;

        let outcome = receiver.handle(&signed(body), body);

        assert_eq!(outcome, WebhookOutcome::Processed(2));
        assert_eq!(outcome.status(), StatusCode::OK);
        assert_eq!(outcome.body(), json!({"processed": 2}));
        assert_eq!(sink.names(), vec!["mailjet.webhook", "mailjet.webhook"]);
    }

    #[test]
    fn wrong_signature_is_unauthorized() {
        let (receiver, sink) = secured();
        let body = br#"[{"event":"sent"}]"#;
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_static("deadbeef"));

        let outcome = receiver.handle(&headers, body);

        assert_eq!(outcome, WebhookOutcome::Unauthorized);
        assert_eq!(outcome.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(outcome.body(), json!({"error": "Invalid webhook signature"}));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn missing_signature_is_unauthorized() {
        let (receiver, _) = secured();

        assert_eq!(
            receiver.handle(&HeaderMap::new(), br#"[{"event":"sent"}]"#),
            WebhookOutcome::Unauthorized
        );
    }

    #[test]
    fn empty_body_is_unauthorized() {
        let (receiver, _) = secured();

        assert_eq!(receiver.handle(&signed(b""), b""), WebhookOutcome::Unauthorized);
    }

    #[test]
    fn signed_malformed_json_is_bad_request() {
        let (receiver, _) = secured();
        let body = b"{not json";

        let outcome = receiver.handle(&signed(body), body);

        assert_eq!(outcome, WebhookOutcome::InvalidJson);
        assert_eq!(outcome.status(), StatusCode::BAD_REQUEST);
        assert_eq!(outcome.body(), json!({"error": "Invalid JSON"}));
    }

    #[test]
    fn is_secured_reflects_secret() {
        assert!(secured().0.is_secured());
        assert!(!unsecured().0.is_secured());

        let empty = WebhookReceiver::new(RecordingSink::default(), Some(SecretString::new(String::new())));
        assert!(!empty.is_secured());
    }
}

mod unsecured_receiver {
    use super::*;

    #[test]
    fn accepts_any_signature() {
        let (receiver, _) = unsecured();
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_static("garbage"));

        assert_eq!(
            receiver.handle(&headers, br#"[{"event":"open"}]"#),
            WebhookOutcome::Processed(1)
        );
    }

    #[test]
    fn empty_body_is_bad_request() {
        let (receiver, _) = unsecured();

        let outcome = receiver.handle(&HeaderMap::new(), b"");

        assert_eq!(outcome, WebhookOutcome::EmptyBody);
        assert_eq!(outcome.status(), StatusCode::BAD_REQUEST);
        assert_eq!(outcome.body(), json!({"error": "Empty request body"}));
    }

    #[test]
    fn single_object_counts_as_one() {
        let (receiver, sink) = unsecured();

        let outcome = receiver.handle(
            &HeaderMap::new(),
            br#"{"event":"bounce","email":"c@example.com","time":1700000000}"#,
        );

        assert_eq!(outcome, WebhookOutcome::Processed(1));
        let MailEvent::Webhook(event) = &sink.events()[0] else {
            panic!("expected webhook event");
        };
        assert_eq!(event.kind, EventKind::Bounce);
        assert_eq!(event.time, Some(1_700_000_000));
    }

    #[test]
    fn items_without_event_are_skipped() {
        let (receiver, sink) = unsecured();

        let outcome = receiver.handle(
            &HeaderMap::new(),
            br#"[{"event":"open"},{"email":"x@example.com"},"noise",{"event":null}]"#,
        );

        assert_eq!(outcome, WebhookOutcome::Processed(1));
        assert_eq!(sink.events().len(), 1);
    }

    #[test]
    fn object_without_event_processes_zero() {
        let (receiver, _) = unsecured();

        assert_eq!(
            receiver.handle(&HeaderMap::new(), br#"{"email":"x@example.com"}"#),
            WebhookOutcome::Processed(0)
        );
    }
}
