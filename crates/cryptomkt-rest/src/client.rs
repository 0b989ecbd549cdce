//! Main REST client implementation

use crate::endpoints::{MarketEndpoints, PaymentEndpoints, PublicEndpoints};
use crate::error::{RestError, RestResult};
use crate::hooks::Hooks;
use crate::transport::Transport;
use crate::types::{
    Balance, MarketOrder, MarketOrderRequest, OrdersQuery, Page, PaymentOrder, PaymentRequest,
    Ticker,
};
use cryptomkt_auth::{ClockSource, Credentials, NtpClock};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.cryptomkt.com/v1";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_USER_AGENT: &str = concat!("cryptomkt-rest/", env!("CARGO_PKG_VERSION"));

/// CryptoMarket REST API client
///
/// Cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```no_run
/// use cryptomkt_rest::{CryptoMktClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CryptoMktClient::new()?;
///     let ticker = client.ticker("ETHCLP").await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = CryptoMktClient::with_credentials(creds)?;
///     let balance = auth_client.balance().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CryptoMktClient {
    transport: Arc<Transport>,
}

impl CryptoMktClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = Transport::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
            config.credentials,
            config.clock,
            config.hooks,
        )?;

        info!(base_url = %transport.base_url(), authenticated = transport.has_credentials(), "Created CryptoMarket REST client");

        Ok(Self {
            transport: Arc::new(transport),
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.transport.has_credentials()
    }

    /// Underlying transport, for routes this crate does not wrap
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get public endpoints
    pub fn public(&self) -> PublicEndpoints<'_> {
        PublicEndpoints::new(&self.transport)
    }

    /// List tradable market pairs
    pub async fn markets(&self) -> RestResult<Vec<String>> {
        self.public().markets().await
    }

    /// Get the ticker of one market
    ///
    /// # Arguments
    /// * `market` - Market pair (e.g., "ETHCLP", "BTCARS")
    pub async fn ticker(&self, market: &str) -> RestResult<Option<Ticker>> {
        self.public().ticker(market).await
    }

    /// Get the tickers of all markets
    pub async fn tickers(&self) -> RestResult<Vec<Ticker>> {
        self.public().tickers().await
    }

    // ========================================================================
    // Payment Endpoints
    // ========================================================================

    /// Get payment endpoints (requires credentials)
    pub fn payments(&self) -> RestResult<PaymentEndpoints<'_>> {
        self.require_credentials()?;
        Ok(PaymentEndpoints::new(&self.transport))
    }

    /// Create a payment order
    pub async fn create_payment(&self, request: &PaymentRequest) -> RestResult<PaymentOrder> {
        self.payments()?.create_payment(request).await
    }

    /// Get a payment order by ID
    pub async fn payment_status(&self, id: &str) -> RestResult<PaymentOrder> {
        self.payments()?.payment_status(id).await
    }

    // ========================================================================
    // Private Market Endpoints
    // ========================================================================

    /// Get private market endpoints (requires credentials)
    pub fn market(&self) -> RestResult<MarketEndpoints<'_>> {
        self.require_credentials()?;
        Ok(MarketEndpoints::new(&self.transport))
    }

    /// Get wallet balances
    pub async fn balance(&self) -> RestResult<Vec<Balance>> {
        self.market()?.balance().await
    }

    /// List open orders of a market
    pub async fn active_orders(&self, market: &str) -> RestResult<Page<MarketOrder>> {
        self.market()?.active_orders(&OrdersQuery::new(market)).await
    }

    /// Place a limit order
    pub async fn create_order(&self, order: &MarketOrderRequest) -> RestResult<MarketOrder> {
        self.market()?.create_order(order).await
    }

    /// Cancel an order by ID
    pub async fn cancel_order(&self, id: &str) -> RestResult<MarketOrder> {
        self.market()?.cancel_order(id).await
    }

    fn require_credentials(&self) -> RestResult<()> {
        if self.has_credentials() {
            Ok(())
        } else {
            Err(RestError::AuthRequired)
        }
    }
}

impl std::fmt::Debug for CryptoMktClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoMktClient")
            .field("base_url", &self.transport.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// API root including the version segment
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Source of request timestamps
    pub clock: Arc<dyn ClockSource>,
    /// Request observer
    pub hooks: Hooks,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            clock: Arc::new(NtpClock::new()),
            hooks: Hooks::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the API root (e.g. a staging host or a local mock)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the timestamp source
    ///
    /// Defaults to [`NtpClock`]; [`cryptomkt_auth::SystemClock`] avoids the
    /// network round trip when the host clock is trusted.
    pub fn with_clock(mut self, clock: impl ClockSource + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Set the request observer
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptomkt_auth::SystemClock;

    #[test]
    fn test_client_without_credentials() {
        let client = CryptoMktClient::new().unwrap();
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_base_url("http://localhost:9000/v1")
            .with_clock(SystemClock);

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn test_default_config_targets_production() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_auth_required_error() {
        let client = CryptoMktClient::new().unwrap();
        assert!(matches!(client.payments(), Err(RestError::AuthRequired)));
        assert!(matches!(client.market(), Err(RestError::AuthRequired)));
    }

    #[test]
    fn test_endpoint_groups_with_credentials() {
        let creds = Credentials::new("key", "secret").unwrap();
        let client = CryptoMktClient::with_credentials(creds).unwrap();
        assert!(client.has_credentials());
        assert!(client.payments().is_ok());
        assert!(client.market().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = CryptoMktClient::with_config(ClientConfig::new().with_base_url("::nope"));
        assert!(matches!(result, Err(RestError::Config(_))));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<CryptoMktClient>();
    }
}
