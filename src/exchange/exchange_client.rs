//! Core ExchangeClient implementation.
//!
//! The ExchangeClient signs actions with an injected [`Wallet`] and submits
//! them to `/exchange`. Methods are organized into submodules:
//! - `orders` - Order placement
//! - `cancels` - Order cancellation and the dead man's switch
//! - `modifies` - Order modification
//! - `twap` - TWAP placement and cancellation
//! - `transfers` - Transfers, withdrawals and bridge deposits
//! - `approvals` - Builder fee approval
//! - `accounts` - Account settings (leverage, margin, sub-accounts, abstraction)

use std::{
    fmt,
    sync::{Arc, RwLock},
};

use alloy::primitives::Address;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    cache::MetadataCaches,
    config::{ClientConfig, GuardPolicy},
    eip712::Eip712,
    environment::EnvironmentConfig,
    exchange::{actions::Actions, builder::BuilderInfo, exchange_responses::ExchangeResponse},
    guards::TermsAcceptance,
    helpers::{address_to_wire, resolve_nonce, NonceCandidate, NonceSource},
    info::info_client::InfoClient,
    prelude::*,
    req::{HttpClient, HttpTransport, ReqwestTransport},
    resolver::AssetResolver,
    signature::{create_l1_action_hash, sign_l1_action, sign_typed_data, SignatureParts},
    wallet::Wallet,
    Error,
};

pub struct ExchangeClient {
    pub http_client: HttpClient,
    pub(crate) resolver: AssetResolver,
    pub(crate) wallet: Arc<dyn Wallet>,
    pub(crate) environment: EnvironmentConfig,
    pub vault_address: Option<Address>,
    pub expires_after: Option<u64>,
    pub(crate) builder: Option<BuilderInfo>,
    nonce_fallback: Option<Arc<dyn NonceSource>>,
    allow_timestamp_nonce: bool,
    pub(crate) guards: GuardPolicy,
    pub(crate) terms: RwLock<Option<TermsAcceptance>>,
}

// Wallets are opaque; only their address is printed
impl fmt::Debug for ExchangeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeClient")
            .field("http_client", &self.http_client)
            .field("wallet", &self.wallet.address())
            .field("environment", &self.environment)
            .field("vault_address", &self.vault_address)
            .field("expires_after", &self.expires_after)
            .field("builder", &self.builder)
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

/// Per-call overrides for signed actions.
#[derive(Clone, Default)]
pub struct ActionOptions {
    pub nonce: Option<u64>,
    pub nonce_source: Option<Arc<dyn NonceSource>>,
    pub vault_address: Option<Address>,
    pub expires_after: Option<u64>,
}

impl fmt::Debug for ActionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionOptions")
            .field("nonce", &self.nonce)
            .field("nonce_source", &self.nonce_source.is_some())
            .field("vault_address", &self.vault_address)
            .field("expires_after", &self.expires_after)
            .finish()
    }
}

impl ActionOptions {
    pub fn with_nonce(nonce: u64) -> Self {
        Self {
            nonce: Some(nonce),
            ..Default::default()
        }
    }

    pub fn nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = Some(source);
        self
    }

    pub fn vault_address(mut self, vault_address: Address) -> Self {
        self.vault_address = Some(vault_address);
        self
    }

    pub fn expires_after(mut self, expires_after: u64) -> Self {
        self.expires_after = Some(expires_after);
        self
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ExchangePayload {
    action: Value,
    nonce: u64,
    signature: SignatureParts,
    #[serde(skip_serializing_if = "Option::is_none")]
    vault_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_after: Option<u64>,
}

impl ExchangeClient {
    /// Client over reqwest with fresh in-memory metadata caches.
    pub fn new(wallet: Arc<dyn Wallet>, config: ClientConfig) -> Result<ExchangeClient> {
        let environment = config.environment_config()?;
        let transport = Arc::new(ReqwestTransport::new(Client::new()));
        Ok(Self::from_parts(
            wallet,
            &config,
            environment,
            transport,
            MetadataCaches::in_memory(),
        ))
    }

    pub fn from_parts(
        wallet: Arc<dyn Wallet>,
        config: &ClientConfig,
        environment: EnvironmentConfig,
        transport: Arc<dyn HttpTransport>,
        caches: MetadataCaches,
    ) -> ExchangeClient {
        let http_client = HttpClient::new(transport, environment.base_url.clone());
        let info = InfoClient::new(http_client.clone());
        let resolver = AssetResolver::new(info, environment.environment, caches)
            .with_ttl(config.cache_ttl());

        ExchangeClient {
            http_client,
            resolver,
            wallet,
            environment,
            vault_address: config.vault_address,
            expires_after: config.expires_after,
            builder: config.builder_info(),
            nonce_fallback: None,
            allow_timestamp_nonce: config.allow_timestamp_nonce,
            guards: config.guards,
            terms: RwLock::new(None),
        }
    }

    /// Nonce source consulted after the wallet's own.
    pub fn with_nonce_fallback(mut self, source: Arc<dyn NonceSource>) -> Self {
        self.nonce_fallback = Some(source);
        self
    }

    pub fn info(&self) -> &InfoClient {
        self.resolver.info()
    }

    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    pub fn environment(&self) -> &EnvironmentConfig {
        &self.environment
    }

    pub fn wallet_address(&self) -> Address {
        self.wallet.address()
    }

    /// The account actions apply to: the vault when one is set, else the wallet.
    pub fn acting_user(&self, options: Option<&ActionOptions>) -> Address {
        self.vault_for(options)
            .unwrap_or_else(|| self.wallet.address())
    }

    pub(crate) fn vault_for(&self, options: Option<&ActionOptions>) -> Option<Address> {
        options
            .and_then(|o| o.vault_address)
            .or(self.vault_address)
    }

    pub(crate) fn hyperliquid_chain(&self) -> String {
        self.environment.environment.chain_label().to_string()
    }

    /// First available of: explicit nonce, call source, wallet source, client
    /// fallback, and (when allowed) the wall clock.
    pub fn next_nonce(&self, options: Option<&ActionOptions>) -> Result<u64> {
        let mut candidates = vec![
            NonceCandidate::Explicit(options.and_then(|o| o.nonce)),
            NonceCandidate::Source("call", options.and_then(|o| o.nonce_source.as_deref())),
            NonceCandidate::Source("wallet", self.wallet.nonce_source()),
            NonceCandidate::Source("client", self.nonce_fallback.as_deref()),
        ];
        if self.allow_timestamp_nonce {
            candidates.push(NonceCandidate::Timestamp);
        }
        resolve_nonce(&candidates)
    }

    /// Hash, sign as an `Agent` and submit an L1 action.
    pub async fn execute_l1_action(
        &self,
        action: Actions,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let nonce = self.next_nonce(options)?;
        let vault_address = self.vault_for(options);
        let expires_after = options
            .and_then(|o| o.expires_after)
            .or(self.expires_after);

        let connection_id = create_l1_action_hash(&action, nonce, vault_address, expires_after)?;
        let signature = sign_l1_action(
            self.wallet.as_ref(),
            connection_id,
            self.environment.environment,
        )
        .await?;

        self.post(&action, nonce, signature, vault_address, expires_after)
            .await
    }

    /// Sign a `HyperliquidTransaction:*` message and submit it as its action.
    ///
    /// These envelopes never carry `vaultAddress` or `expiresAfter`.
    pub async fn execute_user_signed_action<T>(
        &self,
        typed: T,
        nonce: u64,
    ) -> Result<ExchangeResponse>
    where
        T: Eip712 + Into<Actions> + Send + Sync,
    {
        let signature = sign_typed_data(&typed, self.wallet.as_ref()).await?;
        let action: Actions = typed.into();
        self.post(&action, nonce, signature, None, None).await
    }

    async fn post(
        &self,
        action: &Actions,
        nonce: u64,
        signature: SignatureParts,
        vault_address: Option<Address>,
        expires_after: Option<u64>,
    ) -> Result<ExchangeResponse> {
        let kind = action.type_name();
        let payload = ExchangePayload {
            action: serde_json::to_value(action).map_err(|e| Error::Json(e.to_string()))?,
            nonce,
            signature,
            vault_address: vault_address.as_ref().map(address_to_wire),
            expires_after,
        };
        debug!(action = kind, nonce, vault = payload.vault_address.is_some(), "Submitting action");

        let response = self.http_client.post_exchange(&payload).await?;
        info!(action = kind, nonce, response_type = %response.response_type, "Exchange action accepted");
        Ok(response)
    }
}
