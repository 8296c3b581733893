//! Cancel-related methods for ExchangeClient.
//!
//! This module contains methods for cancelling orders:
//! - Single and bulk cancellation by order ID
//! - Cancellation by client order ID (cloid)
//! - Cancel-all over the user's open orders
//! - The scheduled cancel (dead man's switch)

use futures_util::future::try_join_all;
use tracing::debug;

use crate::{
    exchange::{
        actions::{Actions, BulkCancel, BulkCancelCloid, ScheduleCancel},
        cancel::{CancelByCloidIntent, CancelIntent, CancelRequest, CancelRequestCloid},
        exchange_client::{ActionOptions, ExchangeClient},
        exchange_responses::ExchangeResponse,
    },
    helpers::{require_non_empty, validate_cloid},
    prelude::*,
    Error,
};

impl ExchangeClient {
    /// Cancel a single order by order ID.
    pub async fn cancel(
        &self,
        cancel: CancelIntent,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        self.cancel_orders(vec![cancel], options).await
    }

    /// Cancel multiple orders by order ID in a single request.
    pub async fn cancel_orders(
        &self,
        cancels: Vec<CancelIntent>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        if cancels.is_empty() {
            return Err(Error::validation("cancels", "at least one cancel is required"));
        }
        for cancel in &cancels {
            require_non_empty("symbol", &cancel.symbol)?;
        }

        let assets =
            try_join_all(cancels.iter().map(|c| self.resolver.resolve(&c.symbol))).await?;
        let action = Actions::Cancel(BulkCancel {
            cancels: cancels
                .iter()
                .zip(assets)
                .map(|(cancel, asset)| CancelRequest {
                    asset,
                    oid: cancel.oid,
                })
                .collect(),
        });
        self.execute_l1_action(action, options).await
    }

    /// Cancel multiple orders by client order ID in a single request.
    pub async fn cancel_by_cloid(
        &self,
        cancels: Vec<CancelByCloidIntent>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        if cancels.is_empty() {
            return Err(Error::validation("cancels", "at least one cancel is required"));
        }
        let cloids = cancels
            .iter()
            .map(|c| {
                require_non_empty("symbol", &c.symbol)?;
                validate_cloid(&c.cloid)
            })
            .collect::<Result<Vec<_>>>()?;

        let assets =
            try_join_all(cancels.iter().map(|c| self.resolver.resolve(&c.symbol))).await?;
        let action = Actions::CancelByCloid(BulkCancelCloid {
            cancels: cloids
                .into_iter()
                .zip(assets)
                .map(|(cloid, asset)| CancelRequestCloid { asset, cloid })
                .collect(),
        });
        self.execute_l1_action(action, options).await
    }

    /// Cancel every open order of the acting user.
    ///
    /// Returns `Ok(None)` without signing anything when nothing is open.
    pub async fn cancel_all_orders(
        &self,
        options: Option<&ActionOptions>,
    ) -> Result<Option<ExchangeResponse>> {
        let user = self.acting_user(options);
        let open_orders = self.info().open_orders(user, None).await?;
        if open_orders.is_empty() {
            debug!(%user, "No open orders to cancel");
            return Ok(None);
        }

        let cancels = open_orders
            .into_iter()
            .map(|order| CancelIntent::new(order.coin, order.oid))
            .collect();
        self.cancel_orders(cancels, options).await.map(Some)
    }

    /// Schedule a cancel of all open orders at `time` (ms). `None` clears it.
    pub async fn schedule_cancel(
        &self,
        time: Option<u64>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let action = Actions::ScheduleCancel(ScheduleCancel { time });
        self.execute_l1_action(action, options).await
    }
}
