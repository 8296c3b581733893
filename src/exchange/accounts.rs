//! Account-related methods for ExchangeClient.
//!
//! This module contains methods for account management:
//! - Leverage and isolated margin updates
//! - Sub-account creation and transfers
//! - Portfolio margin, dex abstraction and account abstraction toggles

use alloy::primitives::Address;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::{
    consts::USDC_DECIMALS,
    decimal::{parse_decimal, to_base_units, DecimalInput},
    exchange::{
        actions::{
            Actions, CreateSubAccount, SubAccountTransfer, UpdateIsolatedMargin, UpdateLeverage,
            UserDexAbstraction, UserPortfolioMargin, UserSetAbstraction,
        },
        exchange_client::{ActionOptions, ExchangeClient},
        exchange_responses::ExchangeResponse,
    },
    helpers::{address_to_wire, require_non_empty},
    prelude::*,
    Error,
};

/// Account abstraction modes accepted by `userSetAbstraction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbstractionMode {
    Disabled,
    UnifiedAccount,
    PortfolioMargin,
}

impl AbstractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbstractionMode::Disabled => "disabled",
            AbstractionMode::UnifiedAccount => "unifiedAccount",
            AbstractionMode::PortfolioMargin => "portfolioMargin",
        }
    }
}

/// Signed USD amount scaled to the venue's 1e6 integer units, truncated.
fn usd_to_ntli(amount: impl Into<DecimalInput>) -> Result<i64> {
    let amount = parse_decimal(amount)?;
    let scaled = amount
        .checked_mul(Decimal::from(1_000_000u64))
        .ok_or_else(|| Error::Numeric(format!("amount {amount} overflows")))?
        .trunc();
    if scaled.is_zero() {
        return Err(Error::validation("amount", format!("{amount} is zero at 1e-6 precision")));
    }
    scaled
        .to_i64()
        .ok_or_else(|| Error::Numeric(format!("amount {amount} overflows")))
}

impl ExchangeClient {
    /// Set leverage for a perp; `is_cross` selects cross margin.
    pub async fn update_leverage(
        &self,
        symbol: &str,
        leverage: u32,
        is_cross: bool,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        require_non_empty("symbol", symbol)?;
        if leverage == 0 {
            return Err(Error::validation("leverage", "must be at least 1"));
        }
        let asset = self.resolver.resolve(symbol).await?;

        let action = Actions::UpdateLeverage(UpdateLeverage {
            asset,
            is_cross,
            leverage,
        });
        self.execute_l1_action(action, options).await
    }

    /// Add (positive) or remove (negative) USD margin on an isolated position.
    pub async fn update_isolated_margin(
        &self,
        symbol: &str,
        is_buy: bool,
        amount: impl Into<DecimalInput>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        require_non_empty("symbol", symbol)?;
        let ntli = usd_to_ntli(amount)?;
        let asset = self.resolver.resolve(symbol).await?;

        let action = Actions::UpdateIsolatedMargin(UpdateIsolatedMargin {
            asset,
            is_buy,
            ntli,
        });
        self.execute_l1_action(action, options).await
    }

    pub async fn create_sub_account(
        &self,
        name: &str,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let name = require_non_empty("name", name)?.trim().to_string();
        let action = Actions::CreateSubAccount(CreateSubAccount { name });
        self.execute_l1_action(action, options).await
    }

    /// Move USD between the master account and `sub_account`.
    pub async fn sub_account_transfer(
        &self,
        sub_account: Address,
        is_deposit: bool,
        usd: impl Into<DecimalInput>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let usd = to_base_units("usd", usd, USDC_DECIMALS)?;
        let usd = u64::try_from(usd).map_err(|_| Error::Numeric(format!("usd {usd} overflows")))?;

        let action = Actions::SubAccountTransfer(SubAccountTransfer {
            sub_account_user: address_to_wire(&sub_account),
            is_deposit,
            usd,
        });
        self.execute_l1_action(action, options).await
    }

    pub async fn set_portfolio_margin(
        &self,
        enabled: bool,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let nonce = self.next_nonce(options)?;
        let action = UserPortfolioMargin {
            signature_chain_id: self.environment.signature_chain_id,
            hyperliquid_chain: self.hyperliquid_chain(),
            user: self.wallet_address(),
            enabled,
            nonce,
        };
        self.execute_user_signed_action(action, nonce).await
    }

    pub async fn set_dex_abstraction(
        &self,
        enabled: bool,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let nonce = self.next_nonce(options)?;
        let action = UserDexAbstraction {
            signature_chain_id: self.environment.signature_chain_id,
            hyperliquid_chain: self.hyperliquid_chain(),
            user: self.wallet_address(),
            enabled,
            nonce,
        };
        self.execute_user_signed_action(action, nonce).await
    }

    pub async fn set_account_abstraction(
        &self,
        mode: AbstractionMode,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let nonce = self.next_nonce(options)?;
        let action = UserSetAbstraction {
            signature_chain_id: self.environment.signature_chain_id,
            hyperliquid_chain: self.hyperliquid_chain(),
            user: self.wallet_address(),
            abstraction: mode.as_str().to_string(),
            nonce,
        };
        self.execute_user_signed_action(action, nonce).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_to_ntli() {
        assert_eq!(usd_to_ntli("10").unwrap(), 10_000_000);
        assert_eq!(usd_to_ntli("-2.5").unwrap(), -2_500_000);
        assert_eq!(usd_to_ntli("0.0000019").unwrap(), 1);
        assert!(matches!(
            usd_to_ntli("0.0000001"),
            Err(Error::Validation { field: "amount", .. })
        ));
    }

    #[test]
    fn test_abstraction_mode_wire_names() {
        assert_eq!(AbstractionMode::UnifiedAccount.as_str(), "unifiedAccount");
        assert_eq!(
            serde_json::to_value(AbstractionMode::PortfolioMargin).unwrap(),
            "portfolioMargin"
        );
    }
}
