#![deny(unreachable_pub)]

// Core modules
mod consts;
mod eip712;
mod errors;
mod helpers;
mod prelude;
mod req;

// Shared utilities
pub mod cache;
pub mod config;
pub mod decimal;
pub mod environment;
pub mod logging;
pub mod market;
pub mod serde_utils;

// Feature modules
mod exchange;
mod guards;
pub mod info;
mod meta;
pub mod resolver;
mod signature;
pub mod wallet;

#[cfg(test)]
mod testing;

// Re-exports
pub use cache::{CacheEntry, CacheKey, InMemoryCache, MetadataCache, MetadataCaches};
pub use config::{BuilderConfig, ClientConfig, GuardPolicy};
pub use consts::*;
pub use decimal::{
    format_price, format_size, positive_decimal, round_price_to_tick, to_api_decimal,
    to_base_units, DecimalInput, TickSize,
};
pub use eip712::{Eip712, Eip712Field, Eip712Value, TypedDataPayload};
pub use environment::{Environment, EnvironmentConfig};
pub use errors::{Error, ErrorKind, GuardError, GuardKind, ResponseBody};
pub use exchange::*;
pub use guards::TermsAcceptance;
pub use helpers::{
    new_cloid, now_timestamp_ms, uuid_to_hex_string, validate_cloid, MonotonicNonce, NonceSource,
};
pub use info::info_client::*;
pub use info::response_structs::*;
pub use logging::{init_logging, LogConfig, LogFormat};
pub use market::{MarketIdentity, MarketType, Side, SymbolKind};
pub use meta::{
    AssetContext, AssetMeta, Meta, PerpDex, SpotAssetContext, SpotAssetMeta, SpotMeta, TokenInfo,
};
pub use req::{HttpClient, HttpResponse, HttpTransport, ReqwestTransport};
pub use resolver::AssetResolver;
pub use signature::{
    create_l1_action_hash, sign_l1_action, sign_typed_data, split_signature, Agent,
    SignatureParts,
};
pub use wallet::{LocalWallet, Wallet};
