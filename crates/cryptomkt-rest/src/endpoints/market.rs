//! Private exchange endpoints
//!
//! Orders and balances of the authenticated account.

use crate::endpoints::routes;
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::{Balance, MarketOrder, MarketOrderRequest, OrdersQuery, Page};
use tracing::{debug, info, instrument};

/// Private exchange endpoints (require credentials)
pub struct MarketEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// List open orders of a market
    #[instrument(skip(self))]
    pub async fn active_orders(&self, query: &OrdersQuery) -> RestResult<Page<MarketOrder>> {
        debug!("Fetching active orders");
        self.transport
            .send(&routes::ORDERS_ACTIVE, &query.params(), true)
            .await?
            .page()
    }

    /// List executed orders of a market
    #[instrument(skip(self))]
    pub async fn executed_orders(&self, query: &OrdersQuery) -> RestResult<Page<MarketOrder>> {
        debug!("Fetching executed orders");
        self.transport
            .send(&routes::ORDERS_EXECUTED, &query.params(), true)
            .await?
            .page()
    }

    /// Place a limit order
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side))]
    pub async fn create_order(&self, order: &MarketOrderRequest) -> RestResult<MarketOrder> {
        order.validate()?;
        debug!(amount = %order.amount, price = %order.price, "Creating order");

        let created: MarketOrder = self
            .transport
            .send(&routes::ORDERS_CREATE, &order.params(), true)
            .await?
            .data()?;

        info!(id = %created.id, "Order created");
        Ok(created)
    }

    /// Get an order by ID
    #[instrument(skip(self))]
    pub async fn order_status(&self, id: &str) -> RestResult<MarketOrder> {
        require_id(id)?;
        debug!("Fetching order status");

        let params = [("id", id.to_string())];
        self.transport
            .send(&routes::ORDERS_STATUS, &params, true)
            .await?
            .data()
    }

    /// Cancel an order by ID
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: &str) -> RestResult<MarketOrder> {
        require_id(id)?;
        debug!("Cancelling order");

        let params = [("id", id.to_string())];
        let cancelled: MarketOrder = self
            .transport
            .send(&routes::ORDERS_CANCEL, &params, true)
            .await?
            .data()?;

        info!(status = ?cancelled.status, "Order cancelled");
        Ok(cancelled)
    }

    /// Get wallet balances
    #[instrument(skip(self))]
    pub async fn balance(&self) -> RestResult<Vec<Balance>> {
        debug!("Fetching balance");
        self.transport.send(&routes::BALANCE, &[], true).await?.data()
    }
}

fn require_id(id: &str) -> RestResult<()> {
    if id.trim().is_empty() {
        return Err(RestError::InvalidParameter("order id is empty".to_string()));
    }
    Ok(())
}
