//! Order modification methods for ExchangeClient.

use futures_util::future::try_join_all;

use crate::{
    exchange::{
        actions::{Actions, BulkModify},
        exchange_client::{ActionOptions, ExchangeClient},
        exchange_responses::ExchangeResponse,
        modify::{ModifyIntent, ModifyRequest, OrderRef},
    },
    helpers::validate_cloid,
    prelude::*,
    Error,
};

fn checked_ref(oid: &OrderRef) -> Result<OrderRef> {
    match oid {
        OrderRef::Oid(oid) => Ok(OrderRef::Oid(*oid)),
        OrderRef::Cloid(cloid) => validate_cloid(cloid).map(OrderRef::Cloid),
    }
}

impl ExchangeClient {
    /// Replace one order, sent as a single `modify` action.
    pub async fn modify_order(
        &self,
        modify: ModifyIntent,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let oid = checked_ref(&modify.oid)?;
        let fields = modify.order.wire_fields()?;
        let asset = self.resolver.resolve(&modify.order.symbol).await?;

        let action = Actions::Modify(ModifyRequest {
            oid,
            order: fields.at(asset),
        });
        self.execute_l1_action(action, options).await
    }

    /// Replace several orders in one `batchModify` action.
    pub async fn batch_modify(
        &self,
        modifies: Vec<ModifyIntent>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        if modifies.is_empty() {
            return Err(Error::validation("modifies", "at least one modify is required"));
        }
        let prepared = modifies
            .iter()
            .map(|m| Ok((checked_ref(&m.oid)?, m.order.wire_fields()?)))
            .collect::<Result<Vec<_>>>()?;

        let assets =
            try_join_all(modifies.iter().map(|m| self.resolver.resolve(&m.order.symbol))).await?;
        let action = Actions::BatchModify(BulkModify {
            modifies: prepared
                .into_iter()
                .zip(assets)
                .map(|((oid, fields), asset)| ModifyRequest {
                    oid,
                    order: fields.at(asset),
                })
                .collect(),
        });
        self.execute_l1_action(action, options).await
    }
}
