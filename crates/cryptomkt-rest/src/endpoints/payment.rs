//! Payment gateway endpoints
//!
//! All calls are authenticated. Created and queried payment orders carry a
//! business status; failed ones are reported as [`RestError::Payment`] even
//! though the HTTP exchange succeeded.

use crate::endpoints::routes;
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::{Page, PaymentOrder, PaymentOrdersQuery, PaymentRequest};
use tracing::{debug, instrument, warn};

/// Payment gateway endpoints
pub struct PaymentEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> PaymentEndpoints<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Create a payment order
    #[instrument(skip(self, request), fields(external_id = ?request.external_id))]
    pub async fn create_payment(&self, request: &PaymentRequest) -> RestResult<PaymentOrder> {
        request.validate()?;
        debug!(amount = %request.to_receive, currency = %request.to_receive_currency, "Creating payment order");

        let order: PaymentOrder = self
            .transport
            .send(&routes::PAYMENT_NEW_ORDER, &request.params(), true)
            .await?
            .data()?;

        checked(order)
    }

    /// Get a payment order by ID
    #[instrument(skip(self))]
    pub async fn payment_status(&self, id: &str) -> RestResult<PaymentOrder> {
        if id.is_empty() {
            return Err(RestError::InvalidParameter("payment id is empty".to_string()));
        }
        debug!("Fetching payment status");

        let params = [("id", id.to_string())];
        let order: PaymentOrder = self
            .transport
            .send(&routes::PAYMENT_STATUS, &params, true)
            .await?
            .data()?;

        checked(order)
    }

    /// List payment orders
    ///
    /// Statuses are not checked; the history contains expired orders as a
    /// matter of course.
    #[instrument(skip(self))]
    pub async fn payment_orders(&self, query: &PaymentOrdersQuery) -> RestResult<Page<PaymentOrder>> {
        debug!("Fetching payment orders");
        self.transport
            .send(&routes::PAYMENT_ORDERS, &query.params(), true)
            .await?
            .page()
    }
}

fn checked(order: PaymentOrder) -> RestResult<PaymentOrder> {
    if let Err(e) = order.check_status() {
        warn!(id = %order.id, status = %order.status, "Payment order reports failure");
        return Err(e);
    }
    Ok(order)
}
