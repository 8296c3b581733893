use serde::{Deserialize, Serialize};

use crate::{
    decimal::{positive_decimal, DecimalInput},
    helpers::validate_cloid,
    market::Side,
    prelude::*,
    Error,
};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Limit {
    pub tif: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub is_market: bool,
    pub trigger_px: String,
    pub tpsl: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Order {
    Limit(Limit),
    Trigger(Trigger),
}

/// Wire form of one order inside an `order` or `modify` action.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct OrderRequest {
    #[serde(rename = "a", alias = "asset")]
    pub asset: u32,
    #[serde(rename = "b", alias = "isBuy")]
    pub is_buy: bool,
    #[serde(rename = "p", alias = "limitPx")]
    pub limit_px: String,
    #[serde(rename = "s", alias = "sz")]
    pub sz: String,
    #[serde(rename = "r", alias = "reduceOnly", default)]
    pub reduce_only: bool,
    #[serde(rename = "t", alias = "orderType")]
    pub order_type: Order,
    #[serde(rename = "c", alias = "cloid", skip_serializing_if = "Option::is_none")]
    pub cloid: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeInForce {
    /// Add liquidity only (post only).
    Alo,
    /// Immediate or cancel.
    Ioc,
    #[default]
    Gtc,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Alo => "Alo",
            TimeInForce::Ioc => "Ioc",
            TimeInForce::Gtc => "Gtc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TpSl {
    TakeProfit,
    StopLoss,
}

impl TpSl {
    pub fn as_str(&self) -> &'static str {
        match self {
            TpSl::TakeProfit => "tp",
            TpSl::StopLoss => "sl",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderKind {
    Limit(TimeInForce),
    Trigger {
        trigger_price: DecimalInput,
        is_market: bool,
        tpsl: TpSl,
    },
}

/// A caller's order before symbol resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderIntent {
    pub symbol: String,
    pub side: Side,
    pub price: DecimalInput,
    pub size: DecimalInput,
    pub reduce_only: bool,
    pub kind: OrderKind,
    pub cloid: Option<String>,
}

impl OrderIntent {
    /// Good-til-cancelled limit order.
    pub fn limit(
        symbol: impl Into<String>,
        side: Side,
        price: impl Into<DecimalInput>,
        size: impl Into<DecimalInput>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            price: price.into(),
            size: size.into(),
            reduce_only: false,
            kind: OrderKind::Limit(TimeInForce::Gtc),
            cloid: None,
        }
    }

    /// Trigger order. `price` is the limit used once triggered.
    pub fn trigger(
        symbol: impl Into<String>,
        side: Side,
        price: impl Into<DecimalInput>,
        size: impl Into<DecimalInput>,
        trigger_price: impl Into<DecimalInput>,
        tpsl: TpSl,
        is_market: bool,
    ) -> Self {
        Self {
            kind: OrderKind::Trigger {
                trigger_price: trigger_price.into(),
                is_market,
                tpsl,
            },
            ..Self::limit(symbol, side, price, size)
        }
    }

    pub fn tif(mut self, tif: TimeInForce) -> Self {
        self.kind = OrderKind::Limit(tif);
        self
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    pub fn cloid(mut self, cloid: impl Into<String>) -> Self {
        self.cloid = Some(cloid.into());
        self
    }

    /// Validate and canonicalize everything but the asset index.
    pub(crate) fn wire_fields(&self) -> Result<OrderFields> {
        if self.symbol.trim().is_empty() {
            return Err(Error::validation("symbol", "must not be empty"));
        }
        let order_type = match &self.kind {
            OrderKind::Limit(tif) => Order::Limit(Limit {
                tif: tif.as_str().to_string(),
            }),
            OrderKind::Trigger {
                trigger_price,
                is_market,
                tpsl,
            } => Order::Trigger(Trigger {
                is_market: *is_market,
                trigger_px: positive_decimal("trigger_price", trigger_price.clone())?,
                tpsl: tpsl.as_str().to_string(),
            }),
        };
        Ok(OrderFields {
            is_buy: self.side.is_buy(),
            limit_px: positive_decimal("price", self.price.clone())?,
            sz: positive_decimal("size", self.size.clone())?,
            reduce_only: self.reduce_only,
            order_type,
            cloid: self.cloid.as_deref().map(validate_cloid).transpose()?,
        })
    }
}

/// Validated order fields awaiting an asset index.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OrderFields {
    is_buy: bool,
    limit_px: String,
    sz: String,
    reduce_only: bool,
    order_type: Order,
    cloid: Option<String>,
}

impl OrderFields {
    pub(crate) fn at(self, asset: u32) -> OrderRequest {
        OrderRequest {
            asset,
            is_buy: self.is_buy,
            limit_px: self.limit_px,
            sz: self.sz,
            reduce_only: self.reduce_only,
            order_type: self.order_type,
            cloid: self.cloid,
        }
    }
}
