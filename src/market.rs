//! Venue symbol syntax and the market identity derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{environment::Environment, prelude::*, Error};

pub const VENUE: &str = "hyperliquid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    Perp,
    Spot,
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketType::Perp => f.write_str("perp"),
            MarketType::Spot => f.write_str("spot"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }
}

/// Syntactic form of a raw symbol, in resolution precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// `@<index>`: spot market by universe index.
    SpotIndex(u32),
    /// `<dex>:<name>`: perp listed on a builder-deployed dex.
    DexAsset { dex: String, name: String },
    /// `<base>/<quote>` or `<base>-<quote>`.
    SpotPair { base: String, quote: String },
    /// Bare perp name.
    Perp(String),
}

impl SymbolKind {
    pub fn parse(raw: &str) -> Result<Self> {
        let symbol = raw.trim();
        if symbol.is_empty() {
            return Err(Error::validation("symbol", "symbol is empty"));
        }

        if let Some(index) = symbol.strip_prefix('@') {
            return index
                .parse::<u32>()
                .map(SymbolKind::SpotIndex)
                .map_err(|_| Error::validation("symbol", format!("{symbol:?} is not a spot index")));
        }

        if let Some((dex, name)) = symbol.split_once(':') {
            let (dex, name) = (dex.trim(), name.trim());
            if dex.is_empty() || name.is_empty() {
                return Err(Error::validation("symbol", format!("{symbol:?} is not a dex symbol")));
            }
            return Ok(SymbolKind::DexAsset {
                dex: dex.to_string(),
                name: name.to_string(),
            });
        }

        if let Some((base, quote)) = symbol.split_once(['/', '-']) {
            let (base, quote) = (base.trim(), quote.trim());
            if base.is_empty() || quote.is_empty() {
                return Err(Error::validation("symbol", format!("{symbol:?} is not a spot pair")));
            }
            return Ok(SymbolKind::SpotPair {
                base: base.to_string(),
                quote: quote.to_string(),
            });
        }

        Ok(SymbolKind::Perp(symbol.to_string()))
    }

    pub fn market_type(&self) -> MarketType {
        match self {
            SymbolKind::SpotIndex(_) | SymbolKind::SpotPair { .. } => MarketType::Spot,
            SymbolKind::DexAsset { .. } | SymbolKind::Perp(_) => MarketType::Perp,
        }
    }
}

/// Stable identity of a market, derived from its raw venue symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketIdentity {
    pub market_type: MarketType,
    pub venue: &'static str,
    pub environment: Environment,
    pub base: String,
    pub quote: Option<String>,
    pub dex: Option<String>,
    pub raw_symbol: String,
    pub canonical_symbol: String,
}

impl MarketIdentity {
    pub fn from_symbol(environment: Environment, raw_symbol: &str) -> Result<Self> {
        let kind = SymbolKind::parse(raw_symbol)?;
        let market_type = kind.market_type();
        let (base, quote, dex, tail) = match kind {
            SymbolKind::SpotIndex(index) => {
                let base = format!("@{index}");
                (base.clone(), None, None, base)
            }
            SymbolKind::SpotPair { base, quote } => {
                let (base, quote) = (base.to_uppercase(), quote.to_uppercase());
                let tail = format!("{base}/{quote}");
                (base, Some(quote), None, tail)
            }
            SymbolKind::DexAsset { dex, name } => {
                let (dex, base) = (dex.to_lowercase(), name.to_uppercase());
                let tail = format!("{dex}:{base}");
                (base, None, Some(dex), tail)
            }
            SymbolKind::Perp(name) => {
                let base = name.to_uppercase();
                (base.clone(), None, None, base)
            }
        };

        Ok(Self {
            market_type,
            venue: VENUE,
            environment,
            base,
            quote,
            dex,
            raw_symbol: raw_symbol.to_string(),
            canonical_symbol: format!("{VENUE}:{market_type}:{tail}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_precedence() {
        assert_eq!(SymbolKind::parse("@5").unwrap(), SymbolKind::SpotIndex(5));
        assert_eq!(
            SymbolKind::parse("xyz:BTC").unwrap(),
            SymbolKind::DexAsset {
                dex: "xyz".into(),
                name: "BTC".into()
            }
        );
        assert_eq!(
            SymbolKind::parse("PURR-USDC").unwrap(),
            SymbolKind::SpotPair {
                base: "PURR".into(),
                quote: "USDC".into()
            }
        );
        assert_eq!(SymbolKind::parse(" ETH ").unwrap(), SymbolKind::Perp("ETH".into()));
    }

    #[test]
    fn test_malformed_symbols() {
        assert!(SymbolKind::parse("").is_err());
        assert!(SymbolKind::parse("@abc").is_err());
        assert!(SymbolKind::parse(":BTC").is_err());
        assert!(SymbolKind::parse("PURR/").is_err());
    }

    #[test]
    fn test_market_identity() {
        let spot = MarketIdentity::from_symbol(Environment::Mainnet, "purr/usdc").unwrap();
        assert_eq!(spot.market_type, MarketType::Spot);
        assert_eq!(spot.canonical_symbol, "hyperliquid:spot:PURR/USDC");
        assert_eq!(spot.quote.as_deref(), Some("USDC"));

        let dex = MarketIdentity::from_symbol(Environment::Testnet, "XYZ:btc").unwrap();
        assert_eq!(dex.canonical_symbol, "hyperliquid:perp:xyz:BTC");
        assert_eq!(dex.dex.as_deref(), Some("xyz"));
        assert_eq!(dex.raw_symbol, "XYZ:btc");

        let indexed = MarketIdentity::from_symbol(Environment::Mainnet, "@107").unwrap();
        assert_eq!(indexed.canonical_symbol, "hyperliquid:spot:@107");

        let perp = MarketIdentity::from_symbol(Environment::Mainnet, "eth").unwrap();
        assert_eq!(perp.canonical_symbol, "hyperliquid:perp:ETH");
    }
}
