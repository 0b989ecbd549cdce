//! Public market data endpoints
//!
//! These endpoints don't require authentication and never send auth headers.

use crate::endpoints::routes;
use crate::error::RestResult;
use crate::transport::Transport;
use crate::types::{BookEntry, BookQuery, Page, Ticker, Trade, TradesQuery};
use tracing::{debug, instrument};

/// Public market data endpoints
pub struct PublicEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> PublicEndpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// List tradable market pairs (e.g. `ETHCLP`)
    #[instrument(skip(self))]
    pub async fn markets(&self) -> RestResult<Vec<String>> {
        debug!("Fetching markets");
        self.transport.send(&routes::MARKETS, &[], false).await?.data()
    }

    /// Get the ticker of one market
    ///
    /// Returns `None` when the server sends an empty list.
    #[instrument(skip(self))]
    pub async fn ticker(&self, market: &str) -> RestResult<Option<Ticker>> {
        debug!("Fetching ticker");
        let params = [("market", market.to_string())];
        let tickers: Vec<Ticker> = self
            .transport
            .send(&routes::TICKER, &params, false)
            .await?
            .data()?;
        Ok(tickers.into_iter().next())
    }

    /// Get the tickers of all markets
    #[instrument(skip(self))]
    pub async fn tickers(&self) -> RestResult<Vec<Ticker>> {
        debug!("Fetching all tickers");
        self.transport.send(&routes::TICKER, &[], false).await?.data()
    }

    /// Get one side of a market's order book
    #[instrument(skip(self))]
    pub async fn book(&self, query: &BookQuery) -> RestResult<Page<BookEntry>> {
        debug!("Fetching order book");
        self.transport
            .send(&routes::BOOK, &query.params(), false)
            .await?
            .page()
    }

    /// Get executed trades of a market
    #[instrument(skip(self))]
    pub async fn trades(&self, query: &TradesQuery) -> RestResult<Page<Trade>> {
        debug!("Fetching trades");
        self.transport
            .send(&routes::TRADES, &query.params(), false)
            .await?
            .page()
    }
}
