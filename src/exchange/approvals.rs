//! Builder fee approval for ExchangeClient.

use alloy::primitives::Address;

use crate::{
    decimal::positive_decimal,
    exchange::{
        actions::ApproveBuilderFee,
        exchange_client::{ActionOptions, ExchangeClient},
        exchange_responses::ExchangeResponse,
    },
    prelude::*,
    Error,
};

/// Validate a percentage string such as `"0.01%"`.
fn checked_fee_rate(max_fee_rate: &str) -> Result<String> {
    let rate = max_fee_rate.trim();
    let number = rate
        .strip_suffix('%')
        .ok_or_else(|| Error::validation("max_fee_rate", format!("{rate:?} must end with '%'")))?;
    positive_decimal("max_fee_rate", number)?;
    Ok(rate.to_string())
}

impl ExchangeClient {
    /// Approve `builder` to charge up to `max_fee_rate` on this user's orders.
    pub async fn approve_builder_fee(
        &self,
        builder: Address,
        max_fee_rate: &str,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let max_fee_rate = checked_fee_rate(max_fee_rate)?;
        let nonce = self.next_nonce(options)?;

        let action = ApproveBuilderFee {
            signature_chain_id: self.environment.signature_chain_id,
            hyperliquid_chain: self.hyperliquid_chain(),
            max_fee_rate,
            builder,
            nonce,
        };
        self.execute_user_signed_action(action, nonce).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_fee_rate() {
        assert_eq!(checked_fee_rate(" 0.1% ").unwrap(), "0.1%");
        assert!(matches!(
            checked_fee_rate("0.1"),
            Err(Error::Validation { field: "max_fee_rate", .. })
        ));
        assert!(matches!(
            checked_fee_rate("0%"),
            Err(Error::Validation { field: "max_fee_rate", .. })
        ));
    }
}
