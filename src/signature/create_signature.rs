use alloy::primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    eip712::Eip712, environment::Environment, prelude::*, signature::Agent, wallet::Wallet, Error,
};

/// Hash an L1 action for signing.
///
/// Layout: `msgpack(action) ‖ nonce (u64 BE) ‖ vault marker [‖ vault]`
/// `[‖ 0x00 ‖ expires_after (u64 BE)]`. The vault marker is `1` when a vault is
/// present and `0` otherwise; the expiry marker is `0` and only written when an
/// expiry is set.
pub fn create_l1_action_hash<T>(
    action: &T,
    nonce: u64,
    vault_address: Option<Address>,
    expires_after: Option<u64>,
) -> Result<B256>
where
    T: Serialize + ?Sized,
{
    let mut bytes = rmp_serde::to_vec_named(action).map_err(|e| Error::Rmp(e.to_string()))?;
    bytes.extend(nonce.to_be_bytes());
    if let Some(vault_address) = vault_address {
        bytes.push(1);
        bytes.extend(vault_address);
    } else {
        bytes.push(0);
    }
    if let Some(expires_after) = expires_after {
        bytes.push(0);
        bytes.extend(expires_after.to_be_bytes());
    }
    Ok(keccak256(bytes))
}

/// `{r, s, v}` as sent in the exchange envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureParts {
    pub r: String,
    pub s: String,
    pub v: u8,
}

/// Split a 65-byte `0x` hex signature into `r`, `s` and a `v` of 27 or 28.
pub fn split_signature(signature: &str) -> Result<SignatureParts> {
    let hex = signature.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let bytes = alloy::hex::decode(hex)
        .map_err(|e| Error::signing(format!("signature is not hex: {e}")))?;
    if bytes.len() != 65 {
        return Err(Error::signing(format!(
            "signature must be 65 bytes, got {}",
            bytes.len()
        )));
    }

    let mut v = bytes[64];
    if v < 27 {
        v += 27;
    }
    if v != 27 && v != 28 {
        // odd recovery bytes (27, EIP-155 35 + 2 * chain_id) carry parity 0
        v = 28 - (v % 2);
    }

    Ok(SignatureParts {
        r: alloy::hex::encode_prefixed(&bytes[..32]),
        s: alloy::hex::encode_prefixed(&bytes[32..64]),
        v,
    })
}

pub async fn sign_l1_action(
    wallet: &dyn Wallet,
    connection_id: B256,
    environment: Environment,
) -> Result<SignatureParts> {
    let agent = Agent {
        source: environment.agent_source().to_string(),
        connection_id,
    };
    debug!(%connection_id, source = %agent.source, "Signing L1 action");
    sign_typed_data(&agent, wallet).await
}

pub async fn sign_typed_data<T>(payload: &T, wallet: &dyn Wallet) -> Result<SignatureParts>
where
    T: Eip712 + ?Sized,
{
    let typed_data = payload.typed_data();
    let signature = wallet.sign_typed_data(&typed_data).await?;
    split_signature(&signature)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Noop {
        #[serde(rename = "type")]
        kind: &'static str,
    }

    fn noop() -> Noop {
        Noop { kind: "noop" }
    }

    fn packed(nonce: u64) -> Vec<u8> {
        let mut bytes = rmp_serde::to_vec_named(&noop()).unwrap();
        bytes.extend(nonce.to_be_bytes());
        bytes
    }

    #[test]
    fn test_hash_is_deterministic() {
        let first = create_l1_action_hash(&noop(), 1583838, None, None).unwrap();
        let second = create_l1_action_hash(&noop(), 1583838, None, None).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, create_l1_action_hash(&noop(), 1583839, None, None).unwrap());
    }

    #[test]
    fn test_hash_framing_without_vault_or_expiry() {
        let mut expected = packed(7);
        expected.push(0);
        assert_eq!(
            create_l1_action_hash(&noop(), 7, None, None).unwrap(),
            keccak256(expected)
        );
    }

    #[test]
    fn test_hash_framing_with_vault_and_expiry() {
        let vault = address!("1234567890123456789012345678901234567890");
        let mut expected = packed(7);
        expected.push(1);
        expected.extend_from_slice(vault.as_slice());
        expected.push(0);
        expected.extend(1_700_000_000_000u64.to_be_bytes());
        assert_eq!(
            create_l1_action_hash(&noop(), 7, Some(vault), Some(1_700_000_000_000)).unwrap(),
            keccak256(expected)
        );
    }

    #[test]
    fn test_split_signature() {
        let sig = "0x77957e58e70f43b6b68581f2dc42011fc384538a2e5b7bf42d5b936f19fbb67360721a8598727230f67080efee48c812a6a4442013fd3b0eed509171bef9f23f1c";
        let parts = split_signature(sig).unwrap();
        assert_eq!(
            parts.r,
            "0x77957e58e70f43b6b68581f2dc42011fc384538a2e5b7bf42d5b936f19fbb673"
        );
        assert_eq!(
            parts.s,
            "0x60721a8598727230f67080efee48c812a6a4442013fd3b0eed509171bef9f23f"
        );
        assert_eq!(parts.v, 28);
    }

    #[test]
    fn test_split_signature_normalizes_v() {
        let body = "11".repeat(64);
        assert_eq!(split_signature(&format!("0x{body}00")).unwrap().v, 27);
        assert_eq!(split_signature(&format!("0x{body}01")).unwrap().v, 28);
        assert_eq!(split_signature(&format!("0x{body}1b")).unwrap().v, 27);
        // EIP-155 on chain 1: 37 is parity 0, 38 is parity 1
        assert_eq!(split_signature(&format!("0x{body}25")).unwrap().v, 27);
        assert_eq!(split_signature(&format!("0x{body}26")).unwrap().v, 28);
    }

    #[test]
    fn test_split_signature_rejects_malformed() {
        let body = "11".repeat(64);
        let err = split_signature(&format!("0x{body}zz")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Signing);
        assert!(split_signature("0x1234").is_err());
    }
}
