use alloy::{dyn_abi::Eip712Domain, primitives::B256};

use crate::{
    eip712::{Eip712, Eip712Field, Eip712Value},
    serde_utils::l1_action_domain,
};

/// Phantom agent that carries an L1 action hash into an EIP-712 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    /// `"a"` on mainnet, `"b"` on testnet.
    pub source: String,
    pub connection_id: B256,
}

impl Eip712 for Agent {
    const PRIMARY_TYPE: &'static str = "Agent";
    const FIELDS: &'static [Eip712Field] = &[
        Eip712Field::new("source", "string"),
        Eip712Field::new("connectionId", "bytes32"),
    ];

    fn domain(&self) -> Eip712Domain {
        l1_action_domain()
    }

    fn values(&self) -> Vec<Eip712Value> {
        vec![
            Eip712Value::String(self.source.clone()),
            Eip712Value::Bytes32(self.connection_id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{b256, keccak256};

    use super::*;

    #[test]
    fn test_agent_type_string() {
        assert_eq!(Agent::encode_type(), "Agent(string source,bytes32 connectionId)");
    }

    #[test]
    fn test_agent_struct_hash_layout() {
        let connection_id =
            b256!("0de6c7a4bc8c4bd4f4e0d2ebff2d9d7e2a0ff5d1b2cc2c3f9e0e2d7bd5f1c0a1");
        let agent = Agent {
            source: "b".to_string(),
            connection_id,
        };
        let expected = keccak256(
            [
                keccak256("Agent(string source,bytes32 connectionId)").as_slice(),
                keccak256("b").as_slice(),
                connection_id.as_slice(),
            ]
            .concat(),
        );
        assert_eq!(agent.struct_hash(), expected);
    }
}
