//! Tests for webhook event normalization.

use serde_json::json;

use super::*;

mod event_kind {
    use super::*;

    #[test]
    fn known_names_map_to_variants() {
        for (name, kind) in [
            ("sent", EventKind::Sent),
            ("open", EventKind::Open),
            ("click", EventKind::Click),
            ("bounce", EventKind::Bounce),
            ("blocked", EventKind::Blocked),
            ("spam", EventKind::Spam),
            ("unsub", EventKind::Unsub),
        ] {
            assert_eq!(EventKind::from(name), kind);
            assert_eq!(kind.to_string(), name);
        }
    }

    #[test]
    fn unknown_name_is_preserved() {
        let kind = EventKind::from("parseapi");

        assert_eq!(kind, EventKind::Other("parseapi".into()));
        assert_eq!(kind.as_str(), "parseapi");
    }
}

mod from_value {
    use super::*;

    #[test]
    fn lifts_common_fields() {
        let event = WebhookEvent::from_value(&json!({
            "event": "click",
            "time": 1_433_334_653,
            "MessageID": 19_421_777_396_190_490_u64,
            "email": "user@example.com",
            "url": "https://example.com/promo",
            "mj_campaign_id": 7
        }))
        .unwrap();

        assert_eq!(event.kind, EventKind::Click);
        assert_eq!(event.email.as_deref(), Some("user@example.com"));
        assert_eq!(event.time, Some(1_433_334_653));
        assert_eq!(event.message_id, Some(19_421_777_396_190_490));
        assert_eq!(event.fields.len(), 2);
        assert_eq!(event.fields["url"], json!("https://example.com/promo"));
    }

    #[test]
    fn missing_or_null_event_is_skipped() {
        assert!(WebhookEvent::from_value(&json!({"email": "a@b.co"})).is_none());
        assert!(WebhookEvent::from_value(&json!({"event": null})).is_none());
    }

    #[test]
    fn non_objects_are_skipped() {
        for item in [json!("open"), json!(42), json!(null), json!([{"event": "open"}])] {
            assert!(WebhookEvent::from_value(&item).is_none(), "{item}");
        }
    }

    #[test]
    fn non_string_event_becomes_other() {
        let event = WebhookEvent::from_value(&json!({"event": 3})).unwrap();

        assert_eq!(event.kind, EventKind::Other("3".into()));
    }
}

mod payload_normalization {
    use super::*;

    #[test]
    fn array_yields_each_item() {
        let items = payload_items(json!([{"event": "open"}, {"event": "click"}]));

        assert_eq!(items.len(), 2);
    }

    #[test]
    fn single_object_is_wrapped() {
        let items = payload_items(json!({"event": "open"}));

        assert_eq!(items, vec![json!({"event": "open"})]);
    }

    #[test]
    fn empty_array_yields_nothing() {
        assert!(payload_items(json!([])).is_empty());
    }
}
