//! Venue environment selection and the per-environment constants it implies.

use std::fmt;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{
    consts::{
        BRIDGE_ADDRESS_ENV, MAINNET_API_URL, MAINNET_BRIDGE_ADDRESS, MAINNET_SIGNATURE_CHAIN_ID,
        MAINNET_USDC_ADDRESS, SIGNATURE_CHAIN_ID_ENV, TESTNET_API_URL, TESTNET_BRIDGE_ADDRESS,
        TESTNET_SIGNATURE_CHAIN_ID, TESTNET_USDC_ADDRESS, USDC_ADDRESS_ENV,
    },
    prelude::*,
    Error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Mainnet,
    Testnet,
}

impl Environment {
    pub fn is_mainnet(&self) -> bool {
        matches!(self, Environment::Mainnet)
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Mainnet => MAINNET_API_URL,
            Environment::Testnet => TESTNET_API_URL,
        }
    }

    /// Value of the `hyperliquidChain` field in user-signed actions.
    pub fn chain_label(&self) -> &'static str {
        match self {
            Environment::Mainnet => "Mainnet",
            Environment::Testnet => "Testnet",
        }
    }

    /// `source` field of the L1 `Agent` message.
    pub fn agent_source(&self) -> &'static str {
        match self {
            Environment::Mainnet => "a",
            Environment::Testnet => "b",
        }
    }

    pub fn default_signature_chain_id(&self) -> u64 {
        match self {
            Environment::Mainnet => MAINNET_SIGNATURE_CHAIN_ID,
            Environment::Testnet => TESTNET_SIGNATURE_CHAIN_ID,
        }
    }

    pub fn default_bridge_address(&self) -> Address {
        match self {
            Environment::Mainnet => MAINNET_BRIDGE_ADDRESS,
            Environment::Testnet => TESTNET_BRIDGE_ADDRESS,
        }
    }

    pub fn default_usdc_address(&self) -> Address {
        match self {
            Environment::Mainnet => MAINNET_USDC_ADDRESS,
            Environment::Testnet => TESTNET_USDC_ADDRESS,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Mainnet => f.write_str("mainnet"),
            Environment::Testnet => f.write_str("testnet"),
        }
    }
}

/// Constants for one environment after applying environment-variable overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub environment: Environment,
    pub base_url: String,
    pub bridge_address: Address,
    pub usdc_address: Address,
    pub signature_chain_id: u64,
}

impl EnvironmentConfig {
    /// Built-in constants with no overrides applied.
    pub fn defaults(environment: Environment) -> Self {
        Self {
            environment,
            base_url: environment.base_url().to_string(),
            bridge_address: environment.default_bridge_address(),
            usdc_address: environment.default_usdc_address(),
            signature_chain_id: environment.default_signature_chain_id(),
        }
    }

    /// Resolve against the process environment.
    pub fn resolve(environment: Environment) -> Result<Self> {
        Self::resolve_with(environment, |key| std::env::var(key).ok())
    }

    /// Load `.env` (if any) before resolving against the process environment.
    pub fn from_dotenv(environment: Environment) -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::resolve(environment)
    }

    pub fn resolve_with<F>(environment: Environment, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::defaults(environment);
        if let Some(raw) = non_empty(lookup(BRIDGE_ADDRESS_ENV)) {
            config.bridge_address = parse_address(BRIDGE_ADDRESS_ENV, &raw)?;
        }
        if let Some(raw) = non_empty(lookup(USDC_ADDRESS_ENV)) {
            config.usdc_address = parse_address(USDC_ADDRESS_ENV, &raw)?;
        }
        if let Some(raw) = non_empty(lookup(SIGNATURE_CHAIN_ID_ENV)) {
            config.signature_chain_id = parse_chain_id(&raw)?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_address(var: &str, raw: &str) -> Result<Address> {
    raw.parse::<Address>()
        .map_err(|e| Error::config(format!("{var} is not an address ({raw}): {e}")))
}

/// Accepts `0x`-prefixed hex or plain decimal.
pub(crate) fn parse_chain_id(raw: &str) -> Result<u64> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse::<u64>(),
    };
    parsed.map_err(|e| Error::config(format!("{SIGNATURE_CHAIN_ID_ENV} is not a chain id ({raw}): {e}")))
}
