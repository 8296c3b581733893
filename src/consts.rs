use std::time::Duration;

use alloy::primitives::{address, Address};

pub const MAINNET_API_URL: &str = "https://api.hyperliquid.xyz";
pub const TESTNET_API_URL: &str = "https://api.hyperliquid-testnet.xyz";
pub const LOCAL_API_URL: &str = "http://localhost:3001";

/// USDC bridge on Arbitrum One.
pub const MAINNET_BRIDGE_ADDRESS: Address = address!("2df1c51e09aecf9cacb7bc98cb1742757f163df7");
/// USDC bridge on Arbitrum Sepolia.
pub const TESTNET_BRIDGE_ADDRESS: Address = address!("08cfc1b6b2dcf36a1480b99353a354aa8ac56f89");

pub const MAINNET_USDC_ADDRESS: Address = address!("af88d065e77c8cc2239327c5edb3a432268e5831");
pub const TESTNET_USDC_ADDRESS: Address = address!("1baabb04529d43a73232b713c0fe471f7c7334d5");

/// Chain id carried in `signatureChainId` for user-signed actions (Arbitrum One).
pub const MAINNET_SIGNATURE_CHAIN_ID: u64 = 0xa4b1;
/// Chain id carried in `signatureChainId` for user-signed actions (Arbitrum Sepolia).
pub const TESTNET_SIGNATURE_CHAIN_ID: u64 = 0x66eee;

/// Fixed chain id of the `Exchange` domain used for L1 action signatures.
pub const L1_ACTION_CHAIN_ID: u64 = 1337;

/// Builder that order flow is attributed to.
pub const BUILDER_ADDRESS: Address = address!("1ab189b7801140900c711e458212f9c76f8dac79");
/// Builder fee, in the units of the order action's `f` field (tenths of a basis point).
pub const BUILDER_FEE: u64 = 100;

pub const META_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

pub const SPOT_ASSET_OFFSET: u32 = 10_000;
pub const PERP_DEX_ASSET_OFFSET: u32 = 100_000;
pub const PERP_DEX_ASSET_STRIDE: u32 = 10_000;

pub const MIN_DEPOSIT_USDC: u64 = 5;
pub const USDC_DECIMALS: u32 = 6;

pub const BRIDGE_ADDRESS_ENV: &str = "HYPERLIQUID_BRIDGE_ADDRESS";
pub const USDC_ADDRESS_ENV: &str = "HYPERLIQUID_USDC_ADDRESS";
pub const SIGNATURE_CHAIN_ID_ENV: &str = "HYPERLIQUID_SIGNATURE_CHAIN_ID";
