//! HMAC-SHA256 request signatures.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded signature of the raw request body.
pub const SIGNATURE_HEADER: &str = "x-mailjet-signature";

/// Verifies inbound webhook signatures against a shared secret.
#[derive(Debug)]
pub struct SignatureVerifier {
    secret: SecretString,
}

impl SignatureVerifier {
    /// Creates a verifier for the given shared secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC-SHA256 accepts keys of any length")
    }

    /// Computes the lowercase hex signature of `body`.
    #[must_use]
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = self.mac();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Returns true if `signature` is the lowercase hex HMAC-SHA256 of `body`.
    ///
    /// The header must match [`sign`](Self::sign) exactly: surrounding
    /// whitespace and uppercase digits never match. Comparison is
    /// constant-time.
    #[must_use]
    pub fn verify(&self, signature: &str, body: &[u8]) -> bool {
        if !signature.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return false;
        }
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };

        let mut mac = self.mac();
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }
}
