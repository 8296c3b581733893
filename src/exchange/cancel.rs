use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CancelRequest {
    #[serde(rename = "a", alias = "asset")]
    pub asset: u32,
    #[serde(rename = "o", alias = "oid")]
    pub oid: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CancelRequestCloid {
    pub asset: u32,
    pub cloid: String,
}

/// Cancel of a resting order by venue order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelIntent {
    pub symbol: String,
    pub oid: u64,
}

impl CancelIntent {
    pub fn new(symbol: impl Into<String>, oid: u64) -> Self {
        Self {
            symbol: symbol.into(),
            oid,
        }
    }
}

/// Cancel by client order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelByCloidIntent {
    pub symbol: String,
    pub cloid: String,
}

impl CancelByCloidIntent {
    pub fn new(symbol: impl Into<String>, cloid: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            cloid: cloid.into(),
        }
    }
}
