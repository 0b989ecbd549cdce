//! REST API client for the CryptoMarket exchange and payment gateway
//!
//! This crate provides a client for CryptoMarket API v1, covering public
//! market data, the payment gateway and private order management.
//!
//! # Features
//!
//! - **Public**: Markets, tickers, order book, trades
//! - **Payments**: Create payment orders, poll their status, list history
//! - **Market**: Place, inspect and cancel orders, wallet balances
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA384 over the timestamp, the path and (for form posts) the sorted
//! parameter values; see [`cryptomkt_auth`]. Timestamps come from an NTP
//! server by default, configurable through [`ClientConfig::with_clock`].
//!
//! # Example
//!
//! ```no_run
//! use cryptomkt_rest::{CryptoMktClient, Credentials, MarketOrderRequest};
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CryptoMktClient::new()?;
//!     let ticker = client.ticker("ETHCLP").await?;
//!     println!("ETH/CLP: {:?}", ticker);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = CryptoMktClient::with_credentials(creds)?;
//!     let balance = auth_client.balance().await?;
//!     println!("Balances: {:?}", balance);
//!
//!     let order = MarketOrderRequest::buy("ETHCLP", dec!(0.3), dec!(10000));
//!     let placed = auth_client.create_order(&order).await?;
//!     auth_client.cancel_order(&placed.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Nothing is retried. Documented error statuses (400, 401, 403, 404, 429,
//! 503) become [`RestError::Api`]; a 200 envelope with `status: "error"`
//! becomes [`RestError::Api`] with [`ApiErrorKind::Rejected`]; failed payment
//! orders become [`RestError::Payment`].

pub mod client;
mod de;
pub mod endpoints;
pub mod error;
pub mod hooks;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CryptoMktClient, DEFAULT_BASE_URL};
pub use cryptomkt_auth::{ClockSource, Credentials, NtpClock, SystemClock};
pub use error::{ApiErrorBody, ApiErrorKind, ErrorCode, RestError, RestResult};
pub use hooks::Hooks;
pub use transport::{Endpoint, HttpMethod, RawResponse, Transport};

// Re-export endpoint-specific types
pub use types::{
    // Public
    BookEntry, BookQuery, Ticker, Trade, TradesQuery,
    // Market
    Balance, MarketOrder, MarketOrderRequest, OrderAmount, OrderSide, OrderStatus, OrdersQuery,
    // Payments
    Language, PaymentOrder, PaymentOrdersQuery, PaymentRequest, PaymentStatus,
    // Responses
    Envelope, Page, Pagination,
};
