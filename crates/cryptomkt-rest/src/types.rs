//! Types for CryptoMarket REST API requests and responses

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::de;
use crate::error::{RestError, RestResult};

/// Form or query parameters in the order they were built
pub type Params = Vec<(&'static str, String)>;

/// Date format used by date-range query parameters
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum length of a payment's external ID
pub const MAX_EXTERNAL_ID_LEN: usize = 64;

/// Maximum length of a payment's callback / redirect URLs
pub const MAX_URL_LEN: usize = 256;

/// Smallest page size the order listing endpoints accept
pub const MIN_ORDERS_LIMIT: u32 = 20;

/// Largest page size the order listing endpoints accept
pub const MAX_ORDERS_LIMIT: u32 = 100;

// ============================================================================
// API Response Wrapper
// ============================================================================

/// `status` marker of every response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// Request succeeded, `data` holds the payload
    Success,
    /// Request failed, `message` explains why
    Error,
}

/// Decoded response envelope: `{status, data, pagination?}`
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    /// Always [`EnvelopeStatus::Success`] once decoded
    pub status: EnvelopeStatus,
    /// Endpoint payload
    pub data: T,
    /// Cursor information on list endpoints
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<Vec<T>> {
    /// Split a list envelope into a [`Page`]
    pub fn into_page(self) -> Page<T> {
        Page {
            items: self.data,
            pagination: self.pagination,
        }
    }
}

/// Envelope as it appears on the wire, before `data` is typed
#[derive(Debug, Deserialize)]
pub(crate) struct RawEnvelope {
    pub status: EnvelopeStatus,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Pagination cursors
///
/// The server sends `"null"` for cursors that do not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// Previous page number
    #[serde(default, deserialize_with = "de::int_opt")]
    pub previous: Option<u32>,
    /// Page size
    #[serde(default, deserialize_with = "de::int_opt")]
    pub limit: Option<u32>,
    /// Current page number
    #[serde(default, deserialize_with = "de::int_opt")]
    pub page: Option<u32>,
    /// Next page number
    #[serde(default, deserialize_with = "de::int_opt")]
    pub next: Option<u32>,
}

impl Pagination {
    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Cursor information, when the endpoint sends it
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Next page number, if any
    pub fn next_page(&self) -> Option<u32> {
        self.pagination.and_then(|p| p.next)
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticker for one market
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Highest price in the last 24 hours
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub high: Option<Decimal>,
    /// Lowest price in the last 24 hours
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub low: Option<Decimal>,
    /// Best ask
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub ask: Option<Decimal>,
    /// Best bid
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub bid: Option<Decimal>,
    /// Last traded price
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub last_price: Option<Decimal>,
    /// Traded volume in the last 24 hours
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub volume: Option<Decimal>,
    /// Market pair (e.g. `ETHCLP`)
    pub market: String,
    /// Server timestamp of the snapshot
    #[serde(default)]
    pub timestamp: String,
}

impl Ticker {
    /// Mid price (average of bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.ask? + self.bid?) / Decimal::TWO)
    }

    /// Ask minus bid
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.ask? - self.bid?)
    }
}

/// One resting order in the public order book
#[derive(Debug, Clone, Deserialize)]
pub struct BookEntry {
    /// Limit price
    #[serde(deserialize_with = "de::decimal_or_zero")]
    pub price: Decimal,
    /// Remaining amount
    #[serde(deserialize_with = "de::decimal_or_zero")]
    pub amount: Decimal,
    /// Time the order was placed
    #[serde(default)]
    pub timestamp: String,
}

/// Executed trade
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    /// Side of the taker
    pub market_taker: OrderSide,
    /// Execution price
    #[serde(deserialize_with = "de::decimal_or_zero")]
    pub price: Decimal,
    /// Executed amount
    #[serde(deserialize_with = "de::decimal_or_zero")]
    pub amount: Decimal,
    /// Trade ID
    #[serde(default)]
    pub tid: String,
    /// Execution time
    #[serde(default)]
    pub timestamp: String,
    /// Market pair
    pub market: String,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Lifecycle state of an exchange order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Resting on the book
    Active,
    /// Fully or partially executed and closed
    Executed,
    /// Cancelled by the user
    Cancelled,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

/// Amounts attached to an order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderAmount {
    /// Amount originally requested
    #[serde(default, deserialize_with = "de::decimal_or_zero")]
    pub original: Decimal,
    /// Amount still open (active orders only)
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub remaining: Option<Decimal>,
    /// Amount filled (executed orders only)
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub executed: Option<Decimal>,
}

/// Order as returned by the private order endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct MarketOrder {
    /// Order ID (e.g. `M103966`)
    pub id: String,
    /// Order state
    pub status: OrderStatus,
    /// Buy or sell
    #[serde(rename = "type")]
    pub side: OrderSide,
    /// Limit price
    #[serde(default, deserialize_with = "de::decimal_or_zero")]
    pub price: Decimal,
    /// Requested / remaining / executed amounts
    #[serde(default)]
    pub amount: OrderAmount,
    /// Execution price
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub execution_price: Option<Decimal>,
    /// Weighted average execution price, zero when nothing executed
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub avg_execution_price: Option<Decimal>,
    /// Market pair
    pub market: String,
    /// Creation time
    #[serde(default)]
    pub created_at: String,
    /// Last update (active orders only)
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Execution time (executed orders only)
    #[serde(default)]
    pub executed_at: Option<String>,
}

/// New limit order
///
/// Field names match the form parameters of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderRequest {
    /// Market pair (e.g. `ETHCLP`)
    pub market: String,
    /// Amount of the base currency
    pub amount: Decimal,
    /// Limit price in the quote currency
    pub price: Decimal,
    /// Buy or sell
    #[serde(rename = "type")]
    pub side: OrderSide,
}

impl MarketOrderRequest {
    /// Create a new order request
    pub fn new(market: impl Into<String>, side: OrderSide, amount: Decimal, price: Decimal) -> Self {
        Self {
            market: market.into(),
            amount,
            price,
            side,
        }
    }

    /// Buy `amount` at `price`
    pub fn buy(market: impl Into<String>, amount: Decimal, price: Decimal) -> Self {
        Self::new(market, OrderSide::Buy, amount, price)
    }

    /// Sell `amount` at `price`
    pub fn sell(market: impl Into<String>, amount: Decimal, price: Decimal) -> Self {
        Self::new(market, OrderSide::Sell, amount, price)
    }

    /// Reject requests the exchange would refuse anyway
    pub fn validate(&self) -> RestResult<()> {
        if self.market.trim().is_empty() {
            return Err(RestError::InvalidParameter("market is empty".to_string()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.price <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "price must be positive, got {}",
                self.price
            )));
        }
        Ok(())
    }

    /// Form parameters
    pub fn params(&self) -> Params {
        vec![
            ("amount", self.amount.normalize().to_string()),
            ("market", self.market.clone()),
            ("price", self.price.normalize().to_string()),
            ("type", self.side.to_string()),
        ]
    }
}

/// Balance of one wallet
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    /// Currency code (e.g. `CLP`, `ETH`)
    pub wallet: String,
    /// Amount free to trade
    #[serde(default, deserialize_with = "de::decimal_or_zero")]
    pub available: Decimal,
    /// Total amount, including funds held by open orders
    #[serde(default, deserialize_with = "de::decimal_or_zero")]
    pub balance: Decimal,
}

impl Balance {
    /// Amount held by open orders
    pub fn held(&self) -> Decimal {
        self.balance - self.available
    }
}

// ============================================================================
// Query Types
// ============================================================================

fn push_opt<T: ToString>(params: &mut Params, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

fn push_date(params: &mut Params, key: &'static str, value: Option<NaiveDate>) {
    push_opt(params, key, value.map(|d| d.format(DATE_FORMAT).to_string()));
}

/// Query for `GET /book`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    /// Market pair
    pub market: String,
    /// Which side of the book
    pub side: OrderSide,
    /// Page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl BookQuery {
    /// Book side for a market
    pub fn new(market: impl Into<String>, side: OrderSide) -> Self {
        Self {
            market: market.into(),
            side,
            page: None,
            limit: None,
        }
    }

    /// Set page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters
    pub fn params(&self) -> Params {
        let mut params = vec![("market", self.market.clone()), ("type", self.side.to_string())];
        push_opt(&mut params, "page", self.page);
        push_opt(&mut params, "limit", self.limit);
        params
    }
}

/// Query for `GET /trades`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradesQuery {
    /// Market pair
    pub market: String,
    /// First day (inclusive)
    pub start: Option<NaiveDate>,
    /// Last day (inclusive)
    pub end: Option<NaiveDate>,
    /// Page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl TradesQuery {
    /// All recent trades of a market
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            start: None,
            end: None,
            page: None,
            limit: None,
        }
    }

    /// Restrict to a date range
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Set page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters
    pub fn params(&self) -> Params {
        let mut params = vec![("market", self.market.clone())];
        push_date(&mut params, "start", self.start);
        push_date(&mut params, "end", self.end);
        push_opt(&mut params, "page", self.page);
        push_opt(&mut params, "limit", self.limit);
        params
    }
}

/// Query for `GET /orders/active` and `GET /orders/executed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersQuery {
    /// Market pair
    pub market: String,
    /// Page number
    pub page: Option<u32>,
    /// Page size, clamped to 20..=100
    pub limit: Option<u32>,
}

impl OrdersQuery {
    /// Orders of one market
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            page: None,
            limit: None,
        }
    }

    /// Set page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters
    pub fn params(&self) -> Params {
        let mut params = vec![("market", self.market.clone())];
        push_opt(&mut params, "page", self.page);
        push_opt(
            &mut params,
            "limit",
            self.limit.map(|l| l.clamp(MIN_ORDERS_LIMIT, MAX_ORDERS_LIMIT)),
        );
        params
    }
}

// ============================================================================
// Payment Types
// ============================================================================

/// Business outcome code embedded in payment orders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// More than one payment was sent to the order (-4)
    MultiplePayments,
    /// Amount received does not match the order (-3)
    AmountMismatch,
    /// Conversion to the receiving currency failed (-2)
    ConversionFailed,
    /// Order expired before payment (-1)
    Expired,
    /// Waiting for the customer to pay (0)
    WaitingForPayment,
    /// Payment seen, waiting for a block (1)
    WaitingForBlock,
    /// Payment confirmed, processing (2)
    Processing,
    /// Payment completed (3)
    Success,
    /// Code this client does not know about
    Unknown(i64),
}

impl PaymentStatus {
    /// Status for a numeric code
    pub fn from_code(code: i64) -> Self {
        match code {
            -4 => Self::MultiplePayments,
            -3 => Self::AmountMismatch,
            -2 => Self::ConversionFailed,
            -1 => Self::Expired,
            0 => Self::WaitingForPayment,
            1 => Self::WaitingForBlock,
            2 => Self::Processing,
            3 => Self::Success,
            other => Self::Unknown(other),
        }
    }

    /// Numeric code
    pub fn code(&self) -> i64 {
        match self {
            Self::MultiplePayments => -4,
            Self::AmountMismatch => -3,
            Self::ConversionFailed => -2,
            Self::Expired => -1,
            Self::WaitingForPayment => 0,
            Self::WaitingForBlock => 1,
            Self::Processing => 2,
            Self::Success => 3,
            Self::Unknown(code) => *code,
        }
    }

    /// Short label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultiplePayments => "multiple-payments",
            Self::AmountMismatch => "invalid-amount",
            Self::ConversionFailed => "conversion-fail",
            Self::Expired => "expired",
            Self::WaitingForPayment => "waiting-for-payments",
            Self::WaitingForBlock => "waiting-for-block",
            Self::Processing => "processing",
            Self::Success => "success",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Whether the code reports a failed payment
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::MultiplePayments | Self::AmountMismatch | Self::ConversionFailed | Self::Expired
        )
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultiplePayments => write!(f, "multiple payments"),
            Self::AmountMismatch => write!(f, "amount did not match"),
            Self::ConversionFailed => write!(f, "conversion failed"),
            Self::Expired => write!(f, "payment expired"),
            Self::Unknown(code) => write!(f, "unknown status {}", code),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        de::int_or_zero::<D, i64>(deserializer).map(Self::from_code)
    }
}

/// Language of the payment page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Spanish
    #[default]
    Es,
    /// English
    En,
    /// Portuguese
    Pt,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Es => "es",
            Self::En => "en",
            Self::Pt => "pt",
        };
        f.write_str(s)
    }
}

/// New payment order for `POST /payment/new_order`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount to charge, in whole units of the currency
    pub to_receive: Decimal,
    /// Currency the merchant receives
    pub to_receive_currency: String,
    /// Email of the receiving CryptoMarket account
    pub payment_receiver: String,
    /// Merchant-side order ID (max 64 chars)
    pub external_id: Option<String>,
    /// Notification URL for status changes (max 256 chars)
    pub callback_url: Option<String>,
    /// Redirect on error (max 256 chars)
    pub error_url: Option<String>,
    /// Redirect on success (max 256 chars)
    pub success_url: Option<String>,
    /// Contact email for refunds
    pub refund_email: Option<String>,
    /// Payment page language
    pub language: Language,
}

impl PaymentRequest {
    /// Payment of `amount` `currency` to `receiver`
    pub fn new(amount: Decimal, currency: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            to_receive: amount,
            to_receive_currency: currency.into(),
            payment_receiver: receiver.into(),
            external_id: None,
            callback_url: None,
            error_url: None,
            success_url: None,
            refund_email: None,
            language: Language::default(),
        }
    }

    /// Set the merchant order ID
    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    /// Set the notification URL
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Set the error redirect URL
    pub fn with_error_url(mut self, url: impl Into<String>) -> Self {
        self.error_url = Some(url.into());
        self
    }

    /// Set the success redirect URL
    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = Some(url.into());
        self
    }

    /// Set the refund contact
    pub fn with_refund_email(mut self, email: impl Into<String>) -> Self {
        self.refund_email = Some(email.into());
        self
    }

    /// Set the payment page language
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Check documented field limits
    pub fn validate(&self) -> RestResult<()> {
        if self.to_receive <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "to_receive must be positive, got {}",
                self.to_receive
            )));
        }
        if !self.to_receive.fract().is_zero() {
            return Err(RestError::InvalidParameter(format!(
                "to_receive must be a whole amount, got {}",
                self.to_receive
            )));
        }
        if self.to_receive_currency.trim().is_empty() {
            return Err(RestError::InvalidParameter("to_receive_currency is empty".to_string()));
        }
        if self.payment_receiver.trim().is_empty() {
            return Err(RestError::InvalidParameter("payment_receiver is empty".to_string()));
        }
        if let Some(id) = &self.external_id {
            if id.chars().count() > MAX_EXTERNAL_ID_LEN {
                return Err(RestError::InvalidParameter(format!(
                    "external_id longer than {} characters",
                    MAX_EXTERNAL_ID_LEN
                )));
            }
        }
        for (name, url) in [
            ("callback_url", &self.callback_url),
            ("error_url", &self.error_url),
            ("success_url", &self.success_url),
        ] {
            if url.as_ref().is_some_and(|u| u.chars().count() > MAX_URL_LEN) {
                return Err(RestError::InvalidParameter(format!(
                    "{} longer than {} characters",
                    name, MAX_URL_LEN
                )));
            }
        }
        Ok(())
    }

    /// Form parameters (unset optional fields are left out)
    pub fn params(&self) -> Params {
        let mut params = Vec::with_capacity(9);
        push_opt(&mut params, "callback_url", self.callback_url.as_deref());
        push_opt(&mut params, "error_url", self.error_url.as_deref());
        push_opt(&mut params, "external_id", self.external_id.as_deref());
        params.push(("language", self.language.to_string()));
        params.push(("payment_receiver", self.payment_receiver.clone()));
        push_opt(&mut params, "refund_email", self.refund_email.as_deref());
        push_opt(&mut params, "success_url", self.success_url.as_deref());
        params.push(("to_receive", self.to_receive.normalize().to_string()));
        params.push(("to_receive_currency", self.to_receive_currency.clone()));
        params
    }
}

/// Payment order as returned by the payment endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentOrder {
    /// Internal payment order ID
    pub id: String,
    /// Merchant-side order ID
    #[serde(default)]
    pub external_id: Option<String>,
    /// Business status
    pub status: PaymentStatus,
    /// Amount to receive
    #[serde(default, deserialize_with = "de::decimal_or_zero")]
    pub to_receive: Decimal,
    /// Currency to receive
    #[serde(default)]
    pub to_receive_currency: String,
    /// Amount the order expects from the payer
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub expected_amount: Option<Decimal>,
    /// Currency the order expects from the payer
    #[serde(default)]
    pub expected_currency: Option<String>,
    /// Deposit address
    #[serde(default)]
    pub deposit_address: Option<String>,
    /// Memo required by XLM payments
    #[serde(default)]
    pub deposit_memo: Option<String>,
    /// Refund contact
    #[serde(default)]
    pub refund_email: Option<String>,
    /// QR image URL
    #[serde(default)]
    pub qr: Option<String>,
    /// Remarks
    #[serde(default)]
    pub obs: Option<String>,
    /// Notification URL
    #[serde(default)]
    pub callback_url: Option<String>,
    /// Error redirect URL
    #[serde(default)]
    pub error_url: Option<String>,
    /// Success redirect URL
    #[serde(default)]
    pub success_url: Option<String>,
    /// Payment voucher URL
    #[serde(default)]
    pub payment_url: Option<String>,
    /// Seconds left to pay
    #[serde(default, alias = "remanining", deserialize_with = "de::int_opt")]
    pub remaining: Option<i64>,
    /// Payment page language
    #[serde(default)]
    pub language: Option<String>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Server time of the response
    #[serde(default)]
    pub server_at: Option<String>,
}

impl PaymentOrder {
    /// Fail with [`RestError::Payment`] when the status reports a failed payment
    pub fn check_status(&self) -> RestResult<()> {
        if self.status.is_failure() {
            return Err(RestError::Payment {
                id: self.id.clone(),
                status: self.status,
            });
        }
        Ok(())
    }
}

/// Query for `GET /payment/orders`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentOrdersQuery {
    /// First day (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Last day (inclusive)
    pub end_date: Option<NaiveDate>,
    /// Page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl PaymentOrdersQuery {
    /// All payment orders
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a date range
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Set page number
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters
    pub fn params(&self) -> Params {
        let mut params = Vec::new();
        push_date(&mut params, "start_date", self.start_date);
        push_date(&mut params, "end_date", self.end_date);
        push_opt(&mut params, "page", self.page);
        push_opt(&mut params, "limit", self.limit);
        params
    }
}
