//! Request signing and clock sources for the CryptoMarket REST API
//!
//! This crate holds everything needed to authenticate a request against
//! CryptoMarket API v1:
//!
//! - [`Credentials`]: API key and secret (the secret is zeroized on drop)
//! - [`SigningContext`] / [`RequestSigner`]: the canonical signing string and
//!   its HMAC-SHA384 signature
//! - [`ClockSource`]: where request timestamps come from, either the local
//!   clock ([`SystemClock`]) or an NTP server ([`NtpClock`])
//!
//! # Example
//!
//! ```no_run
//! use cryptomkt_auth::{Canonicalization, ClockSource, Credentials, NtpClock, RequestSigner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let timestamp = NtpClock::new().now().await?;
//!
//!     let signer = RequestSigner::new(&creds, timestamp);
//!     let signature = signer.sign(
//!         "POST",
//!         "/v1/orders/cancel",
//!         &[("id", "M103967")],
//!         Canonicalization::SortedValues,
//!     );
//!     println!("X-MKT-SIGNATURE: {}", signature);
//!
//!     Ok(())
//! }
//! ```

mod clock;
mod credentials;
mod error;
mod signing;

pub use clock::{ClockSource, NtpClock, SystemClock, DEFAULT_NTP_SERVER, DEFAULT_NTP_TIMEOUT};
pub use credentials::{Credentials, API_KEY_ENV, API_SECRET_ENV};
pub use error::{AuthError, AuthResult, ClockError, ClockResult};
pub use signing::{Canonicalization, RequestSigner, SigningContext, SIGNING_SCHEME};
