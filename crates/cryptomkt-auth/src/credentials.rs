//! API credentials for CryptoMarket private endpoints
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`
//!
//! The secret is only ever used as an HMAC key. It is never sent over the wire.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha384;

use crate::error::{AuthError, AuthResult};

type HmacSha384 = Hmac<Sha384>;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "CRYPTOMKT_API_KEY";

/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "CRYPTOMKT_API_SECRET";

/// API credentials for authenticated requests
///
/// Immutable once built. The secret is zeroized when the credentials are dropped.
pub struct Credentials {
    /// API key (sent in the `X-MKT-APIKEY` header)
    api_key: String,
    /// API secret (HMAC key, zeroized on drop)
    secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// Both values must be non-empty.
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret = secret.into();

        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            secret: SecretBox::new(Box::new(secret.into_bytes())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `CRYPTOMKT_API_KEY` and `CRYPTOMKT_API_SECRET`.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        Self::new(api_key, secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// HMAC-SHA384 over `payload` keyed with the secret, lowercase hex
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac = HmacSha384::new_from_slice(self.secret.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{shown}..."))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("test_api_key", "super-secret-value").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("test_api"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = Credentials::new("  ", "secret").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = Credentials::new("key", "").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[test]
    fn test_sign_is_lowercase_hex_sha384() {
        let creds = Credentials::new("key", "abc").unwrap();
        let signature = creds.sign(b"1620000000/v1/balance");

        // 48-byte digest
        assert_eq!(signature.len(), 96);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(
            signature,
            "799eb871e707a1f06777b604c0cd75f45a05bf28203458389cb0c3ee08d8c58a50829474aca4597e80e8235a1a74c466"
        );
    }

    #[test]
    fn test_clone_signs_identically() {
        let creds = Credentials::new("key", "abc").unwrap();
        let cloned = creds.clone();
        assert_eq!(creds.sign(b"payload"), cloned.sign(b"payload"));
        assert_eq!(cloned.api_key(), "key");
    }
}
