//! Validated email address value type.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length of the local part (before `@`).
const MAX_LOCAL_LEN: usize = 64;

/// Maximum length of a complete address.
const MAX_ADDRESS_LEN: usize = 254;

/// Dot-atom local part, `@`, then one or more DNS labels and an alphabetic TLD.
static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("address pattern is a valid regex")
});

/// An email address with an optional display name.
///
/// The address is checked for syntactic validity when constructed, so a
/// value of this type is always safe to hand to the provider. Fields are
/// private and there are no mutators.
///
/// # Example
///
/// ```
/// use mailjet_relay::message::EmailAddress;
///
/// let addr = EmailAddress::with_name("jane@example.com", "Jane Doe").unwrap();
/// assert_eq!(addr.to_string(), "Jane Doe <jane@example.com>");
/// assert!(EmailAddress::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAddress")]
pub struct EmailAddress {
    address: String,
    name: Option<String>,
}

/// Unchecked wire form used when deserializing a queued envelope.
#[derive(Deserialize)]
struct RawAddress {
    address: String,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawAddress> for EmailAddress {
    type Error = ValidationError;

    fn try_from(raw: RawAddress) -> Result<Self, Self::Error> {
        Self::build(raw.address, raw.name)
    }
}

impl EmailAddress {
    /// Creates an address without a display name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAddress`] if the syntax is invalid.
    pub fn new(address: impl Into<String>) -> Result<Self, ValidationError> {
        Self::build(address.into(), None)
    }

    /// Creates an address with a display name.
    ///
    /// An empty name is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAddress`] if the syntax is invalid.
    pub fn with_name(
        address: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::build(address.into(), Some(name.into()))
    }

    fn build(address: String, name: Option<String>) -> Result<Self, ValidationError> {
        if !is_valid_address(&address) {
            return Err(ValidationError::InvalidAddress(address));
        }

        Ok(Self {
            address,
            name: name.filter(|n| !n.is_empty()),
        })
    }

    /// Returns the bare address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

fn is_valid_address(address: &str) -> bool {
    if address.len() > MAX_ADDRESS_LEN {
        return false;
    }

    match address.split_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_LEN => ADDRESS_PATTERN.is_match(address),
        _ => false,
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.address),
            None => f.write_str(&self.address),
        }
    }
}

impl FromStr for EmailAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
