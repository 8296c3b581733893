//! TWAP methods for ExchangeClient.

use crate::{
    decimal::{positive_decimal, DecimalInput},
    exchange::{
        actions::{Actions, TwapCancel, TwapOrder, TwapSpec},
        exchange_client::{ActionOptions, ExchangeClient},
        exchange_responses::ExchangeResponse,
    },
    helpers::require_non_empty,
    market::Side,
    prelude::*,
    Error,
};

/// A TWAP to be sliced by the venue over `minutes`.
#[derive(Debug, Clone, PartialEq)]
pub struct TwapIntent {
    pub symbol: String,
    pub side: Side,
    pub size: DecimalInput,
    pub minutes: u32,
    pub reduce_only: bool,
    pub randomize: bool,
}

impl TwapIntent {
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        size: impl Into<DecimalInput>,
        minutes: u32,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            size: size.into(),
            minutes,
            reduce_only: false,
            randomize: false,
        }
    }

    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    pub fn randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }
}

impl ExchangeClient {
    /// Start a TWAP. The running TWAP id is available via
    /// [`ExchangeResponse::twap_id`].
    pub async fn place_twap(
        &self,
        twap: TwapIntent,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        require_non_empty("symbol", &twap.symbol)?;
        let sz = positive_decimal("size", twap.size.clone())?;
        if twap.minutes == 0 {
            return Err(Error::validation("minutes", "must be at least 1"));
        }
        let asset = self.resolver.resolve(&twap.symbol).await?;

        let action = Actions::TwapOrder(TwapOrder {
            twap: TwapSpec {
                asset,
                is_buy: twap.side.is_buy(),
                sz,
                reduce_only: twap.reduce_only,
                minutes: twap.minutes,
                randomize: twap.randomize,
            },
        });
        self.execute_l1_action(action, options).await
    }

    pub async fn cancel_twap(
        &self,
        symbol: &str,
        twap_id: u64,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        require_non_empty("symbol", symbol)?;
        let asset = self.resolver.resolve(symbol).await?;
        let action = Actions::TwapCancel(TwapCancel { asset, twap_id });
        self.execute_l1_action(action, options).await
    }
}
