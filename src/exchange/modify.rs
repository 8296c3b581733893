use serde::{Deserialize, Serialize};

use super::order::{OrderIntent, OrderRequest};

/// An existing order, addressed by venue id or by client order id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum OrderRef {
    Oid(u64),
    Cloid(String),
}

impl From<u64> for OrderRef {
    fn from(oid: u64) -> Self {
        OrderRef::Oid(oid)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModifyRequest {
    pub oid: OrderRef,
    pub order: OrderRequest,
}

/// Replace the order `oid` with `order`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifyIntent {
    pub oid: OrderRef,
    pub order: OrderIntent,
}

impl ModifyIntent {
    pub fn new(oid: impl Into<OrderRef>, order: OrderIntent) -> Self {
        Self {
            oid: oid.into(),
            order,
        }
    }
}
