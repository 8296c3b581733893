//! Transfer methods for ExchangeClient.
//!
//! This module contains methods for various transfer operations:
//! - USDC transfers
//! - Spot token transfers
//! - Bridge withdrawals and deposits
//! - Class transfers (perp <-> spot)

use alloy::primitives::{Address, B256, U256};
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    consts::{MIN_DEPOSIT_USDC, USDC_DECIMALS},
    decimal::{parse_decimal, positive_decimal, to_base_units, DecimalInput},
    exchange::{
        actions::{SpotSend, UsdClassTransfer, UsdSend, Withdraw3},
        exchange_client::{ActionOptions, ExchangeClient},
        exchange_responses::ExchangeResponse,
    },
    helpers::{address_to_wire, require_non_empty},
    prelude::*,
    Error,
};

impl ExchangeClient {
    /// Transfer USDC to another address.
    pub async fn usd_send(
        &self,
        destination: Address,
        amount: impl Into<DecimalInput>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let amount = positive_decimal("amount", amount)?;
        let time = self.next_nonce(options)?;
        let action = UsdSend {
            signature_chain_id: self.environment.signature_chain_id,
            hyperliquid_chain: self.hyperliquid_chain(),
            destination: address_to_wire(&destination),
            amount,
            time,
        };
        self.execute_user_signed_action(action, time).await
    }

    /// Send a spot token. `token` is `NAME:0x<tokenId>`.
    pub async fn spot_send(
        &self,
        destination: Address,
        token: &str,
        amount: impl Into<DecimalInput>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let token = require_non_empty("token", token)?.trim().to_string();
        let amount = positive_decimal("amount", amount)?;
        let time = self.next_nonce(options)?;
        let action = SpotSend {
            signature_chain_id: self.environment.signature_chain_id,
            hyperliquid_chain: self.hyperliquid_chain(),
            destination: address_to_wire(&destination),
            token,
            amount,
            time,
        };
        self.execute_user_signed_action(action, time).await
    }

    /// Withdraw USDC to `destination` on the bridge chain.
    pub async fn withdraw(
        &self,
        destination: Address,
        amount: impl Into<DecimalInput>,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let amount = positive_decimal("amount", amount)?;
        let time = self.next_nonce(options)?;
        let action = Withdraw3 {
            signature_chain_id: self.environment.signature_chain_id,
            hyperliquid_chain: self.hyperliquid_chain(),
            destination: address_to_wire(&destination),
            amount,
            time,
        };
        self.execute_user_signed_action(action, time).await
    }

    /// Move USDC between the spot and perp balances.
    ///
    /// With a vault set, the amount is tagged `" subaccount:<vault>"`.
    pub async fn usd_class_transfer(
        &self,
        amount: impl Into<DecimalInput>,
        to_perp: bool,
        options: Option<&ActionOptions>,
    ) -> Result<ExchangeResponse> {
        let mut amount = positive_decimal("amount", amount)?;
        if let Some(vault) = self.vault_for(options) {
            amount = format!("{amount} subaccount:{}", address_to_wire(&vault));
        }
        let nonce = self.next_nonce(options)?;
        let action = UsdClassTransfer {
            signature_chain_id: self.environment.signature_chain_id,
            hyperliquid_chain: self.hyperliquid_chain(),
            amount,
            to_perp,
            nonce,
        };
        self.execute_user_signed_action(action, nonce).await
    }

    /// Deposit USDC by transferring it to the bridge contract.
    ///
    /// Amounts below the bridge minimum are rejected before the wallet is
    /// touched. Returns the transfer's transaction hash.
    pub async fn deposit_to_bridge(&self, amount: impl Into<DecimalInput>) -> Result<B256> {
        let amount = positive_decimal("amount", amount)?;
        if parse_decimal(amount.as_str())? < Decimal::from(MIN_DEPOSIT_USDC) {
            return Err(Error::validation(
                "amount",
                format!("minimum deposit is {MIN_DEPOSIT_USDC} USDC, got {amount}"),
            ));
        }
        let units = to_base_units("amount", amount.as_str(), USDC_DECIMALS)?;

        let tx_hash = self
            .wallet
            .transfer_erc20(
                self.environment.usdc_address,
                self.environment.bridge_address,
                U256::from(units),
            )
            .await?;
        info!(%amount, %tx_hash, bridge = %self.environment.bridge_address, "Bridge deposit sent");
        Ok(tx_hash)
    }
}
