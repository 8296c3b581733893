//! Symbol to asset-index resolution over cached venue metadata.

use std::{future::Future, sync::Arc, time::Duration};

use futures_util::future::try_join_all;
use tracing::debug;

use crate::{
    cache::{CacheEntry, CacheKey, MetadataCache, MetadataCaches, PerpDexList},
    consts::{META_CACHE_TTL, PERP_DEX_ASSET_OFFSET, PERP_DEX_ASSET_STRIDE, SPOT_ASSET_OFFSET},
    environment::Environment,
    info::info_client::InfoClient,
    market::SymbolKind,
    meta::{Meta, SpotMeta, TokenInfo},
    prelude::*,
    Error,
};

pub struct AssetResolver {
    info: InfoClient,
    environment: Environment,
    caches: MetadataCaches,
    ttl: Duration,
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("base_url", &self.info.http_client.base_url)
            .field("environment", &self.environment)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl AssetResolver {
    pub fn new(info: InfoClient, environment: Environment, caches: MetadataCaches) -> Self {
        Self {
            info,
            environment,
            caches,
            ttl: META_CACHE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn info(&self) -> &InfoClient {
        &self.info
    }

    /// Asset index for a venue symbol.
    ///
    /// - `@N` is spot market `N` and needs no metadata.
    /// - `dex:NAME` is a perp on a builder-deployed dex.
    /// - `BASE/QUOTE` or `BASE-QUOTE` is a spot pair.
    /// - anything else is a perp on the default dex.
    pub async fn resolve(&self, symbol: &str) -> Result<u32> {
        match SymbolKind::parse(symbol)? {
            SymbolKind::SpotIndex(index) => spot_asset(symbol, index),
            SymbolKind::DexAsset { dex, name } => self.resolve_dex_asset(&dex, &name).await,
            SymbolKind::SpotPair { base, quote } => {
                let spot_meta = self.spot_meta().await?;
                let index = find_spot_market(&spot_meta, &base, &quote)
                    .ok_or_else(|| Error::UnknownSpotSymbol(symbol.trim().to_string()))?;
                spot_asset(symbol, index)
            }
            SymbolKind::Perp(name) => {
                let meta = self.meta(None).await?;
                meta.position_of(&name, None)
                    .ok_or_else(|| Error::UnknownAsset(name))
            }
        }
    }

    /// Resolve several symbols concurrently; fails on the first unknown symbol.
    pub async fn resolve_many<S: AsRef<str>>(&self, symbols: &[S]) -> Result<Vec<u32>> {
        try_join_all(symbols.iter().map(|s| self.resolve(s.as_ref()))).await
    }

    async fn resolve_dex_asset(&self, dex: &str, name: &str) -> Result<u32> {
        let dexs = self.perp_dexs().await?;
        let dex_index = dexs
            .iter()
            .position(|entry| {
                entry
                    .as_ref()
                    .is_some_and(|d| d.name.eq_ignore_ascii_case(dex))
            })
            .ok_or_else(|| Error::UnknownDex(dex.to_string()))?;
        let dex_index = u32::try_from(dex_index)
            .map_err(|_| Error::validation("symbol", format!("dex index {dex_index} out of range")))?;

        let meta = self.meta(Some(dex)).await?;
        let asset_index = meta
            .position_of(name, Some(dex))
            .ok_or_else(|| Error::UnknownDexAsset {
                dex: dex.to_string(),
                asset: name.to_string(),
            })?;

        dex_index
            .checked_mul(PERP_DEX_ASSET_STRIDE)
            .and_then(|base| base.checked_add(PERP_DEX_ASSET_OFFSET))
            .and_then(|base| base.checked_add(asset_index))
            .ok_or_else(|| {
                Error::validation(
                    "symbol",
                    format!("{dex}:{name} asset index overflows (dex {dex_index}, asset {asset_index})"),
                )
            })
    }

    pub async fn meta(&self, dex: Option<&str>) -> Result<Arc<Meta>> {
        let key = self.key(dex);
        self.cached(self.caches.meta.as_ref(), key, "meta", || {
            self.info.meta_for_dex(dex)
        })
        .await
    }

    pub async fn spot_meta(&self) -> Result<Arc<SpotMeta>> {
        let key = self.key(None);
        self.cached(self.caches.spot_meta.as_ref(), key, "spotMeta", || {
            self.info.spot_meta()
        })
        .await
    }

    pub async fn perp_dexs(&self) -> Result<Arc<PerpDexList>> {
        let key = self.key(None);
        self.cached(self.caches.perp_dexs.as_ref(), key, "perpDexs", || {
            self.info.perp_dexs()
        })
        .await
    }

    fn key(&self, dex: Option<&str>) -> CacheKey {
        CacheKey::new(self.environment, &self.info.http_client.base_url, dex)
    }

    // Concurrent misses for one key each fetch; the last write wins.
    async fn cached<V, F, Fut>(
        &self,
        cache: &dyn MetadataCache<V>,
        key: CacheKey,
        name: &'static str,
        fetch: F,
    ) -> Result<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        match cache.get(&key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                debug!(cache = name, %key, "Metadata cache hit");
                return Ok(entry.value);
            }
            Some(_) => debug!(cache = name, %key, "Metadata cache entry expired, refreshing"),
            None => debug!(cache = name, %key, "Metadata cache miss"),
        }

        let entry = CacheEntry::new(fetch().await?);
        let value = Arc::clone(&entry.value);
        cache.set(key, entry);
        Ok(value)
    }
}

fn spot_asset(symbol: &str, index: u32) -> Result<u32> {
    SPOT_ASSET_OFFSET.checked_add(index).ok_or_else(|| {
        Error::validation("symbol", format!("{:?}: spot index {index} is out of range", symbol.trim()))
    })
}

/// Spellings a token may go by: the literal name, the name without a trailing
/// `0` (`USDT0`), and either with the leading `U` removed or one added.
fn token_aliases(name: &str) -> Vec<String> {
    let upper = name.trim().to_uppercase();
    let mut stems = vec![upper.clone()];
    if let Some(stem) = upper.strip_suffix('0').filter(|s| !s.is_empty()) {
        stems.push(stem.to_string());
    }

    let mut aliases = Vec::with_capacity(stems.len() * 2);
    for stem in stems {
        let flipped = match stem.strip_prefix('U') {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => format!("U{stem}"),
        };
        aliases.push(stem);
        aliases.push(flipped);
    }
    aliases.dedup();
    aliases
}

/// Token indices a side of a pair may refer to; literal matches come first.
fn token_candidates(tokens: &[TokenInfo], query: &str) -> Vec<usize> {
    let literal: Vec<usize> = tokens
        .iter()
        .filter(|t| t.name.eq_ignore_ascii_case(query))
        .map(|t| t.index)
        .collect();
    if !literal.is_empty() {
        return literal;
    }

    let query_aliases = token_aliases(query);
    tokens
        .iter()
        .filter(|t| {
            token_aliases(&t.name)
                .iter()
                .any(|a| query_aliases.contains(a))
        })
        .map(|t| t.index)
        .collect()
}

fn find_spot_market(spot_meta: &SpotMeta, base: &str, quote: &str) -> Option<u32> {
    let pair_name = format!("{base}/{quote}");
    if let Some(market) = spot_meta
        .universe
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(&pair_name))
    {
        return u32::try_from(market.index).ok();
    }

    let bases = token_candidates(&spot_meta.tokens, base);
    let quotes = token_candidates(&spot_meta.tokens, quote);
    bases.iter().find_map(|b| {
        quotes.iter().find_map(|q| {
            spot_meta
                .universe
                .iter()
                .find(|m| m.tokens == [*b, *q])
                .and_then(|m| u32::try_from(m.index).ok())
        })
    })
}
