//! Order placement methods for ExchangeClient.

use futures_util::future::try_join_all;
use tracing::debug;

use crate::{
    exchange::{
        actions::{Actions, BulkOrder},
        exchange_client::{ActionOptions, ExchangeClient},
        exchange_responses::ExchangeResponse,
        order::OrderIntent,
    },
    prelude::*,
    Error,
};

impl ExchangeClient {
    /// Place a single order.
    pub async fn place_order(
        &self,
        order: OrderIntent,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        self.place_orders(vec![order], options).await
    }

    /// Place several orders in one `order` action (grouping `na`).
    ///
    /// Every intent is validated before any symbol is resolved; symbols are
    /// then resolved concurrently.
    pub async fn place_orders(
        &self,
        orders: Vec<OrderIntent>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        if orders.is_empty() {
            return Err(Error::validation("orders", "at least one order is required"));
        }
        let fields = orders
            .iter()
            .map(OrderIntent::wire_fields)
            .collect::<Result<Vec<_>>>()?;

        self.enforce_order_guards().await?;

        let assets = try_join_all(orders.iter().map(|o| self.resolver.resolve(&o.symbol))).await?;
        debug!(count = orders.len(), ?assets, "Resolved order assets");

        let action = Actions::Order(BulkOrder {
            orders: fields
                .into_iter()
                .zip(assets)
                .map(|(fields, asset)| fields.at(asset))
                .collect(),
            grouping: "na".to_string(),
            builder: self.builder.clone(),
        });
        self.execute_l1_action(action, options).await
    }
}
