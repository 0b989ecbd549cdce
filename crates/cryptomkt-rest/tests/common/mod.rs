//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the CryptoMarket API v1 documentation.

#![allow(dead_code)]

use async_trait::async_trait;
use cryptomkt_auth::{ClockError, ClockResult, ClockSource, Credentials};
use cryptomkt_rest::{ClientConfig, CryptoMktClient};
use httpmock::MockServer;

/// Timestamp every signed test request uses
pub const TIMESTAMP: u64 = 1_620_000_000;

/// HMAC-SHA384("abc", "1620000000/v1/orders/cancelM1")
pub const CANCEL_SIGNATURE: &str = "d3f6caab5be31d07c42f932886f9b93d6ee450de2f3d05f1e24ecf66ba892d0aa7b96ef9256de87d8b4e98f40a04ab30";

/// HMAC-SHA384("abc", "1620000000/v1/balance")
pub const BALANCE_SIGNATURE: &str = "799eb871e707a1f06777b604c0cd75f45a05bf28203458389cb0c3ee08d8c58a50829474aca4597e80e8235a1a74c466";

/// Clock that always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

#[async_trait]
impl ClockSource for FixedClock {
    async fn now(&self) -> ClockResult<u64> {
        Ok(self.0)
    }
}

/// Clock whose lookups always fail
#[derive(Debug, Clone, Copy)]
pub struct FailingClock;

#[async_trait]
impl ClockSource for FailingClock {
    async fn now(&self) -> ClockResult<u64> {
        Err(ClockError::Unresolved("ntp.invalid:123".to_string()))
    }
}

pub fn test_credentials() -> Credentials {
    Credentials::new("test-key", "abc").unwrap()
}

/// Config pointed at the mock server's `/v1` root with a fixed clock
pub fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(server.url("/v1"))
        .with_clock(FixedClock(TIMESTAMP))
        .with_timeout(5)
}

pub fn public_client(server: &MockServer) -> CryptoMktClient {
    CryptoMktClient::with_config(mock_config(server)).unwrap()
}

pub fn private_client(server: &MockServer) -> CryptoMktClient {
    CryptoMktClient::with_config(mock_config(server).with_credentials(test_credentials())).unwrap()
}

pub const MARKETS_RESPONSE: &str = r#"{
    "status": "success",
    "data": ["ETHCLP", "ETHARS", "ETHEUR", "BTCCLP"]
}"#;

pub const TICKER_RESPONSE: &str = r#"{
    "status": "success",
    "data": [
        {
            "high": "50000",
            "volume": "1.28386",
            "low": "48000",
            "ask": "49500",
            "timestamp": "2017-09-01T19:53:10.271563",
            "bid": "49000",
            "last_price": "49500",
            "market": "ETHCLP"
        }
    ]
}"#;

pub const TRADES_RESPONSE: &str = r#"{
    "status": "success",
    "pagination": {"previous": 1, "limit": 20, "page": 2, "next": "null"},
    "data": [
        {
            "market_taker": "sell",
            "timestamp": "2017-05-29T23:40:47.282016",
            "price": "158000",
            "amount": "0.1",
            "tid": "T1",
            "market": "ETHCLP"
        }
    ]
}"#;

pub const BALANCE_RESPONSE: &str = r#"{
    "status": "success",
    "data": [
        {"available": "120347", "wallet": "CLP", "balance": "120347"},
        {"available": "10.3399", "wallet": "ETH", "balance": "11.3399"}
    ]
}"#;

pub const ACTIVE_ORDERS_RESPONSE: &str = r#"{
    "status": "success",
    "pagination": {"previous": "null", "limit": 20, "page": 0, "next": "null"},
    "data": [
        {
            "status": "active",
            "created_at": "2017-09-01T14:01:56.887272",
            "amount": {"original": "1.4044", "remaining": "1.4044"},
            "execution_price": null,
            "price": "7120",
            "type": "buy",
            "id": "M103966",
            "market": "ETHCLP",
            "updated_at": "2017-09-01T14:01:56.887272"
        },
        {
            "status": "active",
            "created_at": "2017-09-01T14:02:36.386967",
            "amount": {"original": "1.25", "remaining": "1.25"},
            "execution_price": null,
            "price": "8000",
            "type": "buy",
            "id": "M103967",
            "market": "ETHCLP",
            "updated_at": "2017-09-01T14:02:36.386967"
        }
    ]
}"#;

pub const EXECUTED_ORDERS_RESPONSE: &str = r#"{
    "status": "success",
    "pagination": {"previous": "null", "limit": 20, "page": 0, "next": "null"},
    "data": [
        {
            "status": "executed",
            "created_at": "2017-08-31T21:37:42.282102",
            "amount": {"executed": "0.6", "original": "3.75"},
            "execution_price": "8000",
            "executed_at": "2017-08-31T22:01:19.481403",
            "price": "8000",
            "type": "buy",
            "id": "M103959",
            "market": "ETHCLP"
        },
        {
            "status": "executed",
            "created_at": "2016-11-26T23:27:54.502024",
            "amount": {"executed": "1.5772", "original": "1.5772"},
            "execution_price": "6340",
            "executed_at": "2017-01-02T22:56:03.897534",
            "price": "6340",
            "type": "buy",
            "id": "M103260",
            "market": "ETHCLP"
        }
    ]
}"#;

pub const CREATE_ORDER_RESPONSE: &str = r#"{
    "status": "success",
    "data": {
        "status": "executed",
        "created_at": "2017-09-01T19:35:26.641136",
        "amount": {"executed": "0.3", "original": "0.3"},
        "avg_execution_price": "30000",
        "price": "10000",
        "type": "buy",
        "id": "M103975",
        "market": "ETHCLP",
        "updated_at": "2017-09-01T19:35:26.688106"
    }
}"#;

pub const CANCEL_ORDER_RESPONSE: &str = r#"{
    "status": "success",
    "data": {
        "status": "cancelled",
        "created_at": "2017-09-01T14:02:36.386967",
        "amount": {"executed": "0", "original": "1.25"},
        "avg_execution_price": "0",
        "price": "8000",
        "type": "buy",
        "id": "M1",
        "market": "ETHCLP",
        "updated_at": "2017-09-01T14:02:36.386967"
    }
}"#;

/// Payment order whose business status is `status`
pub fn payment_response(status: &str) -> String {
    format!(
        r#"{{
    "status": "success",
    "data": {{
        "id": "P2023132",
        "status": {status},
        "to_receive": "3000",
        "to_receive_currency": "CLP",
        "expected_amount": "0.0147",
        "expected_currency": "ETH",
        "deposit_address": "0x1c2a8f0c5e9c1b2f37d6e1a1c7e0fa5d4b2b6c11",
        "refund_email": "refund@example.com",
        "qr": "https://www.cryptomkt.com/qr/P2023132.png",
        "payment_url": "https://www.cryptomkt.com/kr/P2023132",
        "remaining": 899,
        "language": "es",
        "external_id": "A-1",
        "created_at": "2017-09-01T19:35:26.641136",
        "updated_at": "2017-09-01T19:35:26.641136",
        "server_at": "2017-09-01T19:35:26.641136"
    }}
}}"#
    )
}

pub const PAYMENT_ORDERS_RESPONSE: &str = r#"{
    "status": "success",
    "pagination": {"previous": "null", "limit": 20, "page": 0, "next": 1},
    "data": [
        {"id": "P1", "status": -1, "to_receive": "1000", "to_receive_currency": "CLP"},
        {"id": "P2", "status": "3", "to_receive": "2500", "to_receive_currency": "CLP"}
    ]
}"#;
