//! Signing boundary. The SDK never touches key material directly: every
//! signature goes through a [`Wallet`].

use std::{fmt, sync::Arc};

use alloy::{
    primitives::{Address, B256, U256},
    signers::{local::PrivateKeySigner, SignerSync},
};
use async_trait::async_trait;

use crate::{
    eip712::TypedDataPayload,
    helpers::{MonotonicNonce, NonceSource},
    prelude::*,
    Error,
};

#[async_trait]
pub trait Wallet: Send + Sync {
    fn address(&self) -> Address;

    /// Sign an EIP-712 document, returning the 65-byte signature as `0x` hex.
    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<String>;

    /// Nonce source shared by every action signed with this wallet.
    fn nonce_source(&self) -> Option<&dyn NonceSource> {
        None
    }

    /// Send an ERC-20 transfer on the bridge chain and return its hash.
    async fn transfer_erc20(&self, token: Address, to: Address, amount: U256) -> Result<B256> {
        let _ = (token, to, amount);
        Err(Error::config("wallet cannot send ERC-20 transfers"))
    }
}

/// In-process wallet over an alloy private key.
#[derive(Clone)]
pub struct LocalWallet {
    signer: PrivateKeySigner,
    nonce_source: Option<Arc<dyn NonceSource>>,
}

impl LocalWallet {
    /// Wallet with its own [`MonotonicNonce`].
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self {
            signer,
            nonce_source: Some(Arc::new(MonotonicNonce::new())),
        }
    }

    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let signer = private_key
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|e| Error::config(format!("invalid private key: {e}")))?;
        Ok(Self::new(signer))
    }

    pub fn with_nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = Some(source);
        self
    }

    pub fn without_nonce_source(mut self) -> Self {
        self.nonce_source = None;
        self
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

// Custom Debug so the key never ends up in logs
impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.signer.address())
            .field("signer", &"<redacted>")
            .field("nonce_source", &self.nonce_source.is_some())
            .finish()
    }
}

#[async_trait]
impl Wallet for LocalWallet {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<String> {
        let signature = self
            .signer
            .sign_hash_sync(&payload.signing_hash)
            .map_err(|e| Error::signing(e.to_string()))?;
        Ok(alloy::hex::encode_prefixed(signature.as_bytes()))
    }

    fn nonce_source(&self) -> Option<&dyn NonceSource> {
        self.nonce_source.as_deref()
    }
}
