//! Exchange module for submitting signed actions to Hyperliquid.
//!
//! This module provides the `ExchangeClient` and related types for:
//! - Order placement and management
//! - Order cancellation
//! - TWAPs
//! - Asset transfers and bridge deposits
//! - Account settings
//!
//! # Submodules
//! - `accounts` - Account settings (leverage, margin, sub-accounts, abstraction)
//! - `approvals` - Builder fee approval
//! - `cancels` - Order cancellation methods
//! - `modifies` - Order modification methods
//! - `orders` - Order placement
//! - `transfers` - Transfers, withdrawals and deposits
//! - `twap` - TWAP placement and cancellation

// Type definition modules
mod actions;
mod builder;
mod cancel;
mod exchange_client;
mod exchange_responses;
mod modify;
mod order;

// Method implementation modules (impl ExchangeClient)
mod accounts;
mod approvals;
mod cancels;
mod modifies;
mod orders;
mod transfers;
mod twap;

#[cfg(test)]
mod tests;

pub use accounts::AbstractionMode;
pub use actions::*;
pub use builder::BuilderInfo;
pub use cancel::{CancelByCloidIntent, CancelIntent, CancelRequest, CancelRequestCloid};
pub use exchange_client::{ActionOptions, ExchangeClient};
pub use exchange_responses::*;
pub use modify::{ModifyIntent, ModifyRequest, OrderRef};
pub use order::{Limit, Order, OrderIntent, OrderKind, OrderRequest, TimeInForce, TpSl, Trigger};
pub use twap::TwapIntent;
