//! Tests for `EmailAddress`.

use super::{AddressPayload, EmailAddress, ValidationError};

mod construction {
    use super::*;

    #[test]
    fn accepts_plain_address() {
        let addr = EmailAddress::new("test@example.com").unwrap();

        assert_eq!(addr.address(), "test@example.com");
        assert!(addr.name().is_none());
    }

    #[test]
    fn accepts_address_with_name() {
        let addr = EmailAddress::with_name("john@example.com", "John Doe").unwrap();

        assert_eq!(addr.address(), "john@example.com");
        assert_eq!(addr.name(), Some("John Doe"));
    }

    #[test]
    fn accepts_common_valid_forms() {
        let valid = [
            "a@b.co",
            "first.last@example.com",
            "user+tag@sub.example.org",
            "o'brien@example.ie",
            "x_y-z@my-domain.io",
        ];

        for address in valid {
            assert!(
                EmailAddress::new(address).is_ok(),
                "Expected {address} to be valid"
            );
        }
    }

    #[test]
    fn rejects_invalid_forms() {
        let invalid = [
            "",
            "notanemail",
            "user@",
            "@domain.com",
            "user@@domain.com",
            "user @domain.com",
            "user@domain",
            ".user@domain.com",
            "user.@domain.com",
            "user@-domain.com",
        ];

        for address in invalid {
            let result = EmailAddress::new(address);
            assert!(
                matches!(result, Err(ValidationError::InvalidAddress(ref a)) if a == address),
                "Expected {address:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong_local_part() {
        let address = format!("{}@example.com", "a".repeat(65));

        assert!(EmailAddress::new(address).is_err());
    }

    #[test]
    fn empty_name_is_treated_as_absent() {
        let addr = EmailAddress::with_name("john@example.com", "").unwrap();

        assert!(addr.name().is_none());
    }

    #[test]
    fn parses_from_str() {
        let addr: EmailAddress = "jane@example.com".parse().unwrap();

        assert_eq!(addr.address(), "jane@example.com");
        assert!("jane".parse::<EmailAddress>().is_err());
    }
}

mod display {
    use super::*;

    #[test]
    fn includes_name_when_present() {
        let addr = EmailAddress::with_name("john@example.com", "John Doe").unwrap();

        assert_eq!(addr.to_string(), "John Doe <john@example.com>");
    }

    #[test]
    fn bare_address_without_name() {
        let addr = EmailAddress::new("john@example.com").unwrap();

        assert_eq!(addr.to_string(), "john@example.com");
    }
}

mod wire_form {
    use super::*;

    #[test]
    fn payload_includes_name_when_present() {
        let addr = EmailAddress::with_name("jane@example.com", "Jane Smith").unwrap();
        let json = serde_json::to_value(AddressPayload::from(&addr)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"Email": "jane@example.com", "Name": "Jane Smith"})
        );
    }

    #[test]
    fn payload_omits_missing_name() {
        let addr = EmailAddress::new("jane@example.com").unwrap();
        let json = serde_json::to_value(AddressPayload::from(&addr)).unwrap();

        assert_eq!(json, serde_json::json!({"Email": "jane@example.com"}));
    }

    #[test]
    fn deserializing_revalidates() {
        let bad = serde_json::json!({"address": "nope", "name": null});

        assert!(serde_json::from_value::<EmailAddress>(bad).is_err());
    }
}
