//! Minimal EIP-712 encoder for the flat structs the venue signs.
//!
//! User-signed primary types are named `HyperliquidTransaction:<Kind>`; the
//! colon rules out `sol!`-generated structs, so type strings and struct hashes
//! are built here from a static field schema. Field order is part of the type
//! hash and must match the venue exactly.

use alloy::{
    dyn_abi::Eip712Domain,
    primitives::{keccak256, Address, B256, U256},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eip712Field {
    pub name: &'static str,
    pub kind: &'static str,
}

impl Eip712Field {
    pub const fn new(name: &'static str, kind: &'static str) -> Self {
        Self { name, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eip712Value {
    String(String),
    Address(Address),
    Uint64(u64),
    Bool(bool),
    Bytes32(B256),
}

impl Eip712Value {
    fn encode(&self) -> B256 {
        match self {
            Eip712Value::String(s) => keccak256(s.as_bytes()),
            Eip712Value::Address(address) => address.into_word(),
            Eip712Value::Uint64(n) => B256::from(U256::from(*n).to_be_bytes::<32>()),
            Eip712Value::Bool(b) => B256::from(U256::from(*b as u8).to_be_bytes::<32>()),
            Eip712Value::Bytes32(word) => *word,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Eip712Value::String(s) => Value::String(s.clone()),
            Eip712Value::Address(address) => Value::String(alloy::hex::encode_prefixed(address)),
            Eip712Value::Uint64(n) => json!(n),
            Eip712Value::Bool(b) => json!(b),
            Eip712Value::Bytes32(word) => Value::String(alloy::hex::encode_prefixed(word)),
        }
    }
}

pub trait Eip712 {
    const PRIMARY_TYPE: &'static str;
    const FIELDS: &'static [Eip712Field];

    fn domain(&self) -> Eip712Domain;

    /// Field values in `FIELDS` order.
    fn values(&self) -> Vec<Eip712Value>;

    fn encode_type() -> String {
        let fields: Vec<String> = Self::FIELDS
            .iter()
            .map(|f| format!("{} {}", f.kind, f.name))
            .collect();
        format!("{}({})", Self::PRIMARY_TYPE, fields.join(","))
    }

    fn type_hash() -> B256 {
        keccak256(Self::encode_type().as_bytes())
    }

    fn struct_hash(&self) -> B256 {
        let values = self.values();
        let mut encoded = Vec::with_capacity(32 * (values.len() + 1));
        encoded.extend_from_slice(Self::type_hash().as_slice());
        for value in &values {
            encoded.extend_from_slice(value.encode().as_slice());
        }
        keccak256(encoded)
    }

    fn eip712_signing_hash(&self) -> B256 {
        let mut digest_input = [0u8; 2 + 32 + 32];
        digest_input[0] = 0x19;
        digest_input[1] = 0x01;
        digest_input[2..34].copy_from_slice(self.domain().separator().as_slice());
        digest_input[34..66].copy_from_slice(self.struct_hash().as_slice());
        keccak256(digest_input)
    }

    fn typed_data(&self) -> TypedDataPayload {
        let message: Map<String, Value> = Self::FIELDS
            .iter()
            .zip(self.values())
            .map(|(field, value)| (field.name.to_string(), value.to_json()))
            .collect();
        TypedDataPayload {
            domain: self.domain(),
            primary_type: Self::PRIMARY_TYPE.to_string(),
            fields: Self::FIELDS.to_vec(),
            message: Value::Object(message),
            signing_hash: self.eip712_signing_hash(),
        }
    }
}

/// Everything a signer needs for one typed-data request.
///
/// Local signers only need `signing_hash`; remote signers that insist on the
/// full document can use [`TypedDataPayload::to_json`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDataPayload {
    pub domain: Eip712Domain,
    pub primary_type: String,
    pub fields: Vec<Eip712Field>,
    pub message: Value,
    pub signing_hash: B256,
}

#[derive(Serialize)]
struct TypeEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

impl TypedDataPayload {
    /// `eth_signTypedData_v4` document.
    pub fn to_json(&self) -> Value {
        let domain_types = [
            TypeEntry { name: "name", kind: "string" },
            TypeEntry { name: "version", kind: "string" },
            TypeEntry { name: "chainId", kind: "uint256" },
            TypeEntry { name: "verifyingContract", kind: "address" },
        ];
        let fields: Vec<TypeEntry<'_>> = self
            .fields
            .iter()
            .map(|f| TypeEntry { name: f.name, kind: f.kind })
            .collect();

        let mut types = Map::new();
        types.insert("EIP712Domain".to_string(), json!(domain_types));
        types.insert(self.primary_type.clone(), json!(fields));

        json!({
            "domain": {
                "name": self.domain.name.as_deref(),
                "version": self.domain.version.as_deref(),
                "chainId": self.domain.chain_id.map(|c| c.to::<u64>()),
                "verifyingContract": self.domain.verifying_contract.map(alloy::hex::encode_prefixed),
            },
            "types": types,
            "primaryType": self.primary_type,
            "message": self.message,
        })
    }
}
