//! Tests for `SendResponse`.

use serde_json::json;

use super::*;

mod partial_failures {
    use super::*;

    #[test]
    fn all_success_has_none() {
        let response = SendResponse::new(json!({
            "Messages": [{"Status": "success"}, {"Status": "success"}]
        }));

        assert!(response.partial_failures().is_empty());
        assert!(!response.has_partial_failures());
    }

    #[test]
    fn reports_index_status_and_errors() {
        let errors = json!([{"ErrorCode": "mj-0013", "ErrorMessage": "invalid email"}]);
        let response = SendResponse::new(json!({
            "Messages": [
                {"Status": "success"},
                {"Status": "error", "Errors": errors}
            ]
        }));

        assert_eq!(
            response.partial_failures(),
            vec![PartialFailure {
                index: 1,
                status: "error".into(),
                errors,
            }]
        );
    }

    #[test]
    fn entries_without_status_are_ignored() {
        let response = SendResponse::new(json!({"Messages": [{"To": []}]}));

        assert!(!response.has_partial_failures());
    }

    #[test]
    fn unexpected_shapes_yield_nothing() {
        for body in [json!({}), json!({"Messages": "nope"}), json!(null), json!([1, 2])] {
            assert!(SendResponse::new(body).partial_failures().is_empty());
        }
    }
}

mod message_ids {
    use super::*;

    #[test]
    fn collects_ids_across_messages_and_recipients() {
        let response = SendResponse::new(json!({
            "Messages": [
                {"Status": "success", "To": [{"MessageID": 11}, {"MessageID": 12}]},
                {"Status": "success", "To": [{"MessageID": "13"}]}
            ]
        }));

        assert_eq!(response.message_ids(), vec![11, 12, 13]);
    }

    #[test]
    fn skips_missing_or_malformed_ids() {
        let response = SendResponse::new(json!({
            "Messages": [
                {"Status": "error"},
                {"To": [{"MessageID": "abc"}, {"Email": "x@example.com"}, {"MessageID": 7}]}
            ]
        }));

        assert_eq!(response.message_ids(), vec![7]);
    }
}

#[test]
fn into_body_returns_decoded_body() {
    let body = json!({"Messages": []});

    assert_eq!(SendResponse::new(body.clone()).into_body(), body);
}
