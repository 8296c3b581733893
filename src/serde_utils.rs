//! Serialization helpers shared by the signed action types.

use alloy::{dyn_abi::Eip712Domain, primitives::Address, sol_types::eip712_domain};
use serde::Serializer;

use crate::consts::L1_ACTION_CHAIN_ID;

/// Domain for user-signed transactions on the given signature chain.
pub fn eip712_domain_for_chain(chain_id: u64) -> Eip712Domain {
    eip712_domain! {
        name: "HyperliquidSignTransaction",
        version: "1",
        chain_id: chain_id,
        verifying_contract: Address::ZERO,
    }
}

/// Fixed domain the `Agent` message for L1 actions is signed against.
pub fn l1_action_domain() -> Eip712Domain {
    eip712_domain! {
        name: "Exchange",
        version: "1",
        chain_id: L1_ACTION_CHAIN_ID,
        verifying_contract: Address::ZERO,
    }
}

/// Serialize a u64 as a `0x`-prefixed hex string (`signatureChainId`).
pub fn serialize_hex<S>(val: &u64, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format!("0x{val:x}"))
}

/// Addresses inside actions go over the wire as lowercase hex.
pub fn serialize_address_lowercase<S>(address: &Address, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&alloy::hex::encode_prefixed(address))
}
