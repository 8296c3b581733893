use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::helpers::address_to_wire;

/// Builder code attached to order actions: `b` is the lowercase builder
/// address, `f` the fee in tenths of a basis point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuilderInfo {
    #[serde(rename = "b")]
    pub builder: String,
    #[serde(rename = "f")]
    pub fee: u64,
}

impl BuilderInfo {
    pub fn new(builder: Address, fee: u64) -> Self {
        Self {
            builder: address_to_wire(&builder),
            fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BUILDER_ADDRESS, BUILDER_FEE};

    #[test]
    fn test_builder_wire_shape() {
        let builder = BuilderInfo::new(BUILDER_ADDRESS, BUILDER_FEE);
        assert_eq!(
            serde_json::to_value(&builder).unwrap(),
            serde_json::json!({"b": "0x1ab189b7801140900c711e458212f9c76f8dac79", "f": 100})
        );
    }
}
