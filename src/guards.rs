//! Local preconditions on order flow: terms acceptance and builder-fee approval.

use std::sync::PoisonError;

use alloy::primitives::Address;
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    errors::GuardKind,
    exchange::ExchangeClient,
    helpers::{address_to_wire, now_timestamp_ms},
    prelude::*,
    Error,
};

/// Record of the caller accepting the venue's terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermsAcceptance {
    pub accepted_at: u64,
}

impl ExchangeClient {
    /// Record terms acceptance at `timestamp` (ms), or now.
    pub fn accept_terms(&self, timestamp: Option<u64>) -> TermsAcceptance {
        let acceptance = TermsAcceptance {
            accepted_at: timestamp.unwrap_or_else(now_timestamp_ms),
        };
        *self.terms.write().unwrap_or_else(PoisonError::into_inner) = Some(acceptance);
        debug!(accepted_at = acceptance.accepted_at, "Terms accepted");
        acceptance
    }

    pub fn terms_acceptance(&self) -> Option<TermsAcceptance> {
        *self.terms.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ensure_terms_accepted(&self) -> Result<TermsAcceptance> {
        self.terms_acceptance().ok_or_else(|| {
            Error::guard(
                GuardKind::Terms,
                "terms must be accepted before trading",
                None,
            )
        })
    }

    /// Check that the acting user approved at least the attached builder fee.
    ///
    /// Returns the approved fee; `None` when no builder code is attached.
    pub async fn ensure_builder_approval(&self) -> Result<Option<u64>> {
        let Some(builder) = &self.builder else {
            return Ok(None);
        };
        let builder_address = builder
            .builder
            .parse::<Address>()
            .map_err(|e| Error::config(format!("invalid builder address {}: {e}", builder.builder)))?;
        let user = self.acting_user(None);
        let approved = self.info().max_builder_fee(user, builder_address).await?;
        if approved < builder.fee {
            warn!(%user, approved, required = builder.fee, "Builder fee not approved");
            return Err(Error::guard(
                GuardKind::BuilderApproval,
                format!(
                    "builder fee approval required: approved {approved}, required {}",
                    builder.fee
                ),
                Some(json!({
                    "user": address_to_wire(&user),
                    "builder": builder.builder,
                    "approved": approved,
                    "required": builder.fee,
                })),
            ));
        }
        Ok(Some(approved))
    }

    /// Apply the client's [`GuardPolicy`](crate::config::GuardPolicy) before order flow.
    pub(crate) async fn enforce_order_guards(&self) -> Result<()> {
        if self.guards.require_terms_acceptance {
            self.ensure_terms_accepted()?;
        }
        if self.guards.require_builder_approval {
            self.ensure_builder_approval().await?;
        }
        Ok(())
    }
}
