//! Client configuration, loadable from TOML.

use std::time::Duration;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{
    consts::{BUILDER_ADDRESS, BUILDER_FEE},
    environment::{Environment, EnvironmentConfig},
    exchange::BuilderInfo,
    prelude::*,
    Error,
};

/// Preconditions checked locally before orders are submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardPolicy {
    /// Refuse orders until [`crate::ExchangeClient::accept_terms`] was called.
    pub require_terms_acceptance: bool,
    /// Refuse orders until the acting user approved the builder fee.
    pub require_builder_approval: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub address: Address,
    /// Tenths of a basis point.
    pub fee: u64,
    /// Attach the builder code to order actions.
    pub attach: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            address: BUILDER_ADDRESS,
            fee: BUILDER_FEE,
            attach: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Overrides the environment's API URL.
    pub base_url: Option<String>,
    /// Act on behalf of this vault or sub-account.
    pub vault_address: Option<Address>,
    /// Default `expiresAfter` for L1 actions, in ms since epoch.
    pub expires_after: Option<u64>,
    pub builder: BuilderConfig,
    pub cache_ttl_secs: u64,
    /// Fall back to the wall clock when no nonce source is available.
    pub allow_timestamp_nonce: bool,
    pub guards: GuardPolicy,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            vault_address: None,
            expires_after: None,
            builder: BuilderConfig::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
            allow_timestamp_nonce: false,
            guards: GuardPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn testnet() -> Self {
        Self {
            environment: Environment::Testnet,
            ..Default::default()
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::config(format!("invalid client config: {e}")))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Builder code for order actions, if attaching is enabled.
    pub fn builder_info(&self) -> Option<BuilderInfo> {
        self.builder
            .attach
            .then(|| BuilderInfo::new(self.builder.address, self.builder.fee))
    }

    /// Environment constants with env-var overrides and the `base_url` override applied.
    pub fn environment_config(&self) -> Result<EnvironmentConfig> {
        let config = EnvironmentConfig::resolve(self.environment)?;
        Ok(match &self.base_url {
            Some(url) => config.with_base_url(url.as_str()),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.environment, Environment::Mainnet);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert!(!config.allow_timestamp_nonce);
        assert_eq!(config.guards, GuardPolicy::default());
        assert_eq!(
            config.builder_info(),
            Some(BuilderInfo::new(BUILDER_ADDRESS, BUILDER_FEE))
        );
    }

    #[test]
    fn test_from_toml() {
        let config = ClientConfig::from_toml_str(
            r#"
            environment = "testnet"
            vault_address = "0x1234567890123456789012345678901234567890"
            cache_ttl_secs = 60
            allow_timestamp_nonce = true

            [builder]
            attach = false

            [guards]
            require_terms_acceptance = true
            "#,
        )
        .unwrap();
        assert_eq!(config.environment, Environment::Testnet);
        assert_eq!(
            config.vault_address,
            Some(address!("1234567890123456789012345678901234567890"))
        );
        assert_eq!(config.cache_ttl_secs, 60);
        assert!(config.allow_timestamp_nonce);
        assert!(config.builder_info().is_none());
        assert_eq!(config.builder.fee, BUILDER_FEE);
        assert!(config.guards.require_terms_acceptance);
        assert!(!config.guards.require_builder_approval);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = ClientConfig::from_toml_str("environment = \"devnet\"").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Config);
    }
}
