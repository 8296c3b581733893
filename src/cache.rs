//! TTL-checked metadata caches owned by a client instance.
//!
//! Entries are overwritten whole on refresh and never evicted. Freshness is
//! decided by the reader against a TTL; there is no background expiry.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};

use tokio::time::Instant;

use crate::{
    environment::Environment,
    meta::{Meta, PerpDex, SpotMeta},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub environment: Environment,
    pub base_url: String,
    pub dex: Option<String>,
}

impl CacheKey {
    pub fn new(environment: Environment, base_url: &str, dex: Option<&str>) -> Self {
        Self {
            environment,
            base_url: base_url.to_string(),
            dex: dex.map(|d| d.to_lowercase()),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.environment, self.base_url)?;
        if let Some(dex) = &self.dex {
            write!(f, "|{dex}")?;
        }
        Ok(())
    }
}

pub struct CacheEntry<V> {
    pub fetched_at: Instant,
    pub value: Arc<V>,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V) -> Self {
        Self {
            fetched_at: Instant::now(),
            value: Arc::new(value),
        }
    }

    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

impl<V> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            fetched_at: self.fetched_at,
            value: Arc::clone(&self.value),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for CacheEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("fetched_at", &self.fetched_at)
            .field("value", &self.value)
            .finish()
    }
}

/// Storage seam for venue metadata. Implementations decide where entries live;
/// the resolver decides whether they are fresh.
pub trait MetadataCache<V>: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry<V>>;
    fn set(&self, key: CacheKey, entry: CacheEntry<V>);
}

pub struct InMemoryCache<V> {
    entries: RwLock<HashMap<CacheKey, CacheEntry<V>>>,
}

impl<V> InMemoryCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for InMemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Send + Sync> MetadataCache<V> for InMemoryCache<V> {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry<V>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: CacheKey, entry: CacheEntry<V>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }
}

pub type PerpDexList = Vec<Option<PerpDex>>;

/// The three metadata caches behind symbol resolution.
#[derive(Clone)]
pub struct MetadataCaches {
    pub meta: Arc<dyn MetadataCache<Meta>>,
    pub spot_meta: Arc<dyn MetadataCache<SpotMeta>>,
    pub perp_dexs: Arc<dyn MetadataCache<PerpDexList>>,
}

impl MetadataCaches {
    pub fn in_memory() -> Self {
        Self {
            meta: Arc::new(InMemoryCache::<Meta>::new()),
            spot_meta: Arc::new(InMemoryCache::<SpotMeta>::new()),
            perp_dexs: Arc::new(InMemoryCache::<PerpDexList>::new()),
        }
    }
}

impl Default for MetadataCaches {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for MetadataCaches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataCaches").finish_non_exhaustive()
    }
}
