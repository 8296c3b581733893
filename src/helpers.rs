use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use alloy::primitives::Address;
use tracing::debug;
use uuid::Uuid;

use crate::{prelude::*, Error};

pub fn now_timestamp_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Supplier of action nonces for one signing key.
pub trait NonceSource: Send + Sync {
    fn next_nonce(&self) -> u64;
}

impl<F> NonceSource for F
where
    F: Fn() -> u64 + Send + Sync,
{
    fn next_nonce(&self) -> u64 {
        self()
    }
}

/// Millisecond-clock nonce that never repeats or goes backwards, even under
/// concurrent calls or a clock step back.
#[derive(Default)]
pub struct MonotonicNonce {
    last: AtomicU64,
}

impl MonotonicNonce {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_after(&self, now: u64) -> u64 {
        let prev = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| {
                Some(now.max(prev.saturating_add(1)))
            })
            .unwrap_or_else(|prev| prev);
        now.max(prev.saturating_add(1))
    }
}

impl NonceSource for MonotonicNonce {
    fn next_nonce(&self) -> u64 {
        self.next_after(now_timestamp_ms())
    }
}

impl fmt::Debug for MonotonicNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonotonicNonce")
            .field("last", &self.last.load(Ordering::Relaxed))
            .finish()
    }
}

/// One place a nonce may come from, listed in priority order.
pub(crate) enum NonceCandidate<'a> {
    Explicit(Option<u64>),
    Source(&'static str, Option<&'a dyn NonceSource>),
    Timestamp,
}

/// First candidate that yields a value wins; no candidate is a config error.
pub(crate) fn resolve_nonce(candidates: &[NonceCandidate<'_>]) -> Result<u64> {
    for candidate in candidates {
        match candidate {
            NonceCandidate::Explicit(Some(nonce)) => return Ok(*nonce),
            NonceCandidate::Source(name, Some(source)) => {
                let nonce = source.next_nonce();
                debug!(source = *name, nonce, "Resolved nonce");
                return Ok(nonce);
            }
            NonceCandidate::Timestamp => return Ok(now_timestamp_ms()),
            _ => continue,
        }
    }
    Err(Error::config(
        "no nonce source available: pass a nonce, a nonce source, or use a wallet that provides one",
    ))
}

pub fn uuid_to_hex_string(uuid: Uuid) -> String {
    format!("0x{}", uuid.simple())
}

/// Fresh random client order id.
pub fn new_cloid() -> String {
    uuid_to_hex_string(Uuid::new_v4())
}

/// Client order ids are 16 bytes of `0x`-prefixed hex.
pub fn validate_cloid(cloid: &str) -> Result<String> {
    let hex = cloid
        .strip_prefix("0x")
        .ok_or_else(|| Error::validation("cloid", format!("{cloid:?} must be 0x-prefixed")))?;
    if hex.len() != 32 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::validation(
            "cloid",
            format!("{cloid:?} must be 16 bytes of hex"),
        ));
    }
    Ok(format!("0x{}", hex.to_ascii_lowercase()))
}

/// Lowercase `0x` hex form used for addresses inside actions.
pub(crate) fn address_to_wire(address: &Address) -> String {
    alloy::hex::encode_prefixed(address)
}

pub(crate) fn require_non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(trimmed)
}
