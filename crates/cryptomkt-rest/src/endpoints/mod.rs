//! API endpoint implementations

pub mod market;
pub mod payment;
pub mod public;

pub use market::MarketEndpoints;
pub use payment::PaymentEndpoints;
pub use public::PublicEndpoints;

/// Route table
///
/// Every route states how its parameters are signed. Form bodies of POST
/// routes are signed, query strings of GET routes are not.
pub mod routes {
    use crate::transport::{Endpoint, HttpMethod};
    use cryptomkt_auth::Canonicalization::{PathOnly, SortedValues};

    // Public
    pub const MARKETS: Endpoint = Endpoint::new(HttpMethod::Get, "/market", PathOnly);
    pub const TICKER: Endpoint = Endpoint::new(HttpMethod::Get, "/ticker", PathOnly);
    pub const BOOK: Endpoint = Endpoint::new(HttpMethod::Get, "/book", PathOnly);
    pub const TRADES: Endpoint = Endpoint::new(HttpMethod::Get, "/trades", PathOnly);

    // Payment
    pub const PAYMENT_NEW_ORDER: Endpoint =
        Endpoint::new(HttpMethod::Post, "/payment/new_order", SortedValues);
    pub const PAYMENT_STATUS: Endpoint =
        Endpoint::new(HttpMethod::Get, "/payment/status", PathOnly);
    pub const PAYMENT_ORDERS: Endpoint =
        Endpoint::new(HttpMethod::Get, "/payment/orders", PathOnly);

    // Private market
    pub const ORDERS_ACTIVE: Endpoint = Endpoint::new(HttpMethod::Get, "/orders/active", PathOnly);
    pub const ORDERS_EXECUTED: Endpoint =
        Endpoint::new(HttpMethod::Get, "/orders/executed", PathOnly);
    pub const ORDERS_CREATE: Endpoint = Endpoint::new(HttpMethod::Post, "/orders", SortedValues);
    pub const ORDERS_STATUS: Endpoint = Endpoint::new(HttpMethod::Get, "/orders/status", PathOnly);
    pub const ORDERS_CANCEL: Endpoint =
        Endpoint::new(HttpMethod::Post, "/orders/cancel", SortedValues);
    pub const BALANCE: Endpoint = Endpoint::new(HttpMethod::Get, "/balance", PathOnly);

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_post_routes_sign_their_form() {
            for route in [PAYMENT_NEW_ORDER, ORDERS_CREATE, ORDERS_CANCEL] {
                assert_eq!(route.method, HttpMethod::Post);
                assert_eq!(route.canonicalization, SortedValues);
            }
            for route in [MARKETS, TICKER, PAYMENT_STATUS, ORDERS_ACTIVE, ORDERS_STATUS, BALANCE] {
                assert_eq!(route.method, HttpMethod::Get);
                assert_eq!(route.canonicalization, PathOnly);
            }
        }
    }
}
