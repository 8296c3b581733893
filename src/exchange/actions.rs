use alloy::{dyn_abi::Eip712Domain, primitives::Address};
use serde::{Deserialize, Serialize};

use crate::{
    eip712::{Eip712, Eip712Field, Eip712Value},
    exchange::{
        builder::BuilderInfo,
        cancel::{CancelRequest, CancelRequestCloid},
        modify::{ModifyRequest, OrderRef},
        order::OrderRequest,
    },
    serde_utils::{eip712_domain_for_chain, serialize_address_lowercase, serialize_hex},
};

/// Every action the client can submit, tagged with its wire `type`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum Actions {
    Order(BulkOrder),
    Cancel(BulkCancel),
    CancelByCloid(BulkCancelCloid),
    Modify(ModifyRequest),
    BatchModify(BulkModify),
    ScheduleCancel(ScheduleCancel),
    TwapOrder(TwapOrder),
    TwapCancel(TwapCancel),
    UpdateLeverage(UpdateLeverage),
    UpdateIsolatedMargin(UpdateIsolatedMargin),
    CreateSubAccount(CreateSubAccount),
    SubAccountTransfer(SubAccountTransfer),
    UsdSend(UsdSend),
    SpotSend(SpotSend),
    Withdraw3(Withdraw3),
    UsdClassTransfer(UsdClassTransfer),
    ApproveBuilderFee(ApproveBuilderFee),
    UserPortfolioMargin(UserPortfolioMargin),
    UserDexAbstraction(UserDexAbstraction),
    UserSetAbstraction(UserSetAbstraction),
}

impl Actions {
    pub fn type_name(&self) -> &'static str {
        match self {
            Actions::Order(_) => "order",
            Actions::Cancel(_) => "cancel",
            Actions::CancelByCloid(_) => "cancelByCloid",
            Actions::Modify(_) => "modify",
            Actions::BatchModify(_) => "batchModify",
            Actions::ScheduleCancel(_) => "scheduleCancel",
            Actions::TwapOrder(_) => "twapOrder",
            Actions::TwapCancel(_) => "twapCancel",
            Actions::UpdateLeverage(_) => "updateLeverage",
            Actions::UpdateIsolatedMargin(_) => "updateIsolatedMargin",
            Actions::CreateSubAccount(_) => "createSubAccount",
            Actions::SubAccountTransfer(_) => "subAccountTransfer",
            Actions::UsdSend(_) => "usdSend",
            Actions::SpotSend(_) => "spotSend",
            Actions::Withdraw3(_) => "withdraw3",
            Actions::UsdClassTransfer(_) => "usdClassTransfer",
            Actions::ApproveBuilderFee(_) => "approveBuilderFee",
            Actions::UserPortfolioMargin(_) => "userPortfolioMargin",
            Actions::UserDexAbstraction(_) => "userDexAbstraction",
            Actions::UserSetAbstraction(_) => "userSetAbstraction",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BulkOrder {
    pub orders: Vec<OrderRequest>,
    pub grouping: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderInfo>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BulkCancel {
    pub cancels: Vec<CancelRequest>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BulkCancelCloid {
    pub cancels: Vec<CancelRequestCloid>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BulkModify {
    pub modifies: Vec<ModifyRequest>,
}

/// Dead man's switch. `None` clears a scheduled cancel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleCancel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TwapSpec {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "b")]
    pub is_buy: bool,
    #[serde(rename = "s")]
    pub sz: String,
    #[serde(rename = "r")]
    pub reduce_only: bool,
    /// Duration in minutes.
    #[serde(rename = "m")]
    pub minutes: u32,
    #[serde(rename = "t")]
    pub randomize: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TwapOrder {
    pub twap: TwapSpec,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TwapCancel {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "t")]
    pub twap_id: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeverage {
    pub asset: u32,
    pub is_cross: bool,
    pub leverage: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIsolatedMargin {
    pub asset: u32,
    pub is_buy: bool,
    /// Signed USD amount scaled by 1e6.
    pub ntli: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateSubAccount {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubAccountTransfer {
    pub sub_account_user: String,
    pub is_deposit: bool,
    /// USD scaled by 1e6.
    pub usd: u64,
}

// User-signed actions. Each carries its own chain fields and is signed as
// `HyperliquidTransaction:<Kind>` rather than through the L1 agent.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsdSend {
    #[serde(serialize_with = "serialize_hex")]
    pub signature_chain_id: u64,
    pub hyperliquid_chain: String,
    pub destination: String,
    pub amount: String,
    pub time: u64,
}

impl Eip712 for UsdSend {
    const PRIMARY_TYPE: &'static str = "HyperliquidTransaction:UsdSend";
    const FIELDS: &'static [Eip712Field] = &[
        Eip712Field::new("hyperliquidChain", "string"),
        Eip712Field::new("destination", "string"),
        Eip712Field::new("amount", "string"),
        Eip712Field::new("time", "uint64"),
    ];

    fn domain(&self) -> Eip712Domain {
        eip712_domain_for_chain(self.signature_chain_id)
    }

    fn values(&self) -> Vec<Eip712Value> {
        vec![
            Eip712Value::String(self.hyperliquid_chain.clone()),
            Eip712Value::String(self.destination.clone()),
            Eip712Value::String(self.amount.clone()),
            Eip712Value::Uint64(self.time),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpotSend {
    #[serde(serialize_with = "serialize_hex")]
    pub signature_chain_id: u64,
    pub hyperliquid_chain: String,
    pub destination: String,
    /// `NAME:0x<tokenId>`
    pub token: String,
    pub amount: String,
    pub time: u64,
}

impl Eip712 for SpotSend {
    const PRIMARY_TYPE: &'static str = "HyperliquidTransaction:SpotSend";
    const FIELDS: &'static [Eip712Field] = &[
        Eip712Field::new("hyperliquidChain", "string"),
        Eip712Field::new("destination", "string"),
        Eip712Field::new("token", "string"),
        Eip712Field::new("amount", "string"),
        Eip712Field::new("time", "uint64"),
    ];

    fn domain(&self) -> Eip712Domain {
        eip712_domain_for_chain(self.signature_chain_id)
    }

    fn values(&self) -> Vec<Eip712Value> {
        vec![
            Eip712Value::String(self.hyperliquid_chain.clone()),
            Eip712Value::String(self.destination.clone()),
            Eip712Value::String(self.token.clone()),
            Eip712Value::String(self.amount.clone()),
            Eip712Value::Uint64(self.time),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Withdraw3 {
    #[serde(serialize_with = "serialize_hex")]
    pub signature_chain_id: u64,
    pub hyperliquid_chain: String,
    pub destination: String,
    pub amount: String,
    pub time: u64,
}

impl Eip712 for Withdraw3 {
    const PRIMARY_TYPE: &'static str = "HyperliquidTransaction:Withdraw";
    const FIELDS: &'static [Eip712Field] = &[
        Eip712Field::new("hyperliquidChain", "string"),
        Eip712Field::new("destination", "string"),
        Eip712Field::new("amount", "string"),
        Eip712Field::new("time", "uint64"),
    ];

    fn domain(&self) -> Eip712Domain {
        eip712_domain_for_chain(self.signature_chain_id)
    }

    fn values(&self) -> Vec<Eip712Value> {
        vec![
            Eip712Value::String(self.hyperliquid_chain.clone()),
            Eip712Value::String(self.destination.clone()),
            Eip712Value::String(self.amount.clone()),
            Eip712Value::Uint64(self.time),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsdClassTransfer {
    #[serde(serialize_with = "serialize_hex")]
    pub signature_chain_id: u64,
    pub hyperliquid_chain: String,
    pub amount: String,
    pub to_perp: bool,
    pub nonce: u64,
}

impl Eip712 for UsdClassTransfer {
    const PRIMARY_TYPE: &'static str = "HyperliquidTransaction:UsdClassTransfer";
    const FIELDS: &'static [Eip712Field] = &[
        Eip712Field::new("hyperliquidChain", "string"),
        Eip712Field::new("amount", "string"),
        Eip712Field::new("toPerp", "bool"),
        Eip712Field::new("nonce", "uint64"),
    ];

    fn domain(&self) -> Eip712Domain {
        eip712_domain_for_chain(self.signature_chain_id)
    }

    fn values(&self) -> Vec<Eip712Value> {
        vec![
            Eip712Value::String(self.hyperliquid_chain.clone()),
            Eip712Value::String(self.amount.clone()),
            Eip712Value::Bool(self.to_perp),
            Eip712Value::Uint64(self.nonce),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBuilderFee {
    #[serde(serialize_with = "serialize_hex")]
    pub signature_chain_id: u64,
    pub hyperliquid_chain: String,
    /// Percentage string, e.g. `"0.01%"`.
    pub max_fee_rate: String,
    #[serde(serialize_with = "serialize_address_lowercase")]
    pub builder: Address,
    pub nonce: u64,
}

impl Eip712 for ApproveBuilderFee {
    const PRIMARY_TYPE: &'static str = "HyperliquidTransaction:ApproveBuilderFee";
    const FIELDS: &'static [Eip712Field] = &[
        Eip712Field::new("hyperliquidChain", "string"),
        Eip712Field::new("maxFeeRate", "string"),
        Eip712Field::new("builder", "address"),
        Eip712Field::new("nonce", "uint64"),
    ];

    fn domain(&self) -> Eip712Domain {
        eip712_domain_for_chain(self.signature_chain_id)
    }

    fn values(&self) -> Vec<Eip712Value> {
        vec![
            Eip712Value::String(self.hyperliquid_chain.clone()),
            Eip712Value::String(self.max_fee_rate.clone()),
            Eip712Value::Address(self.builder),
            Eip712Value::Uint64(self.nonce),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPortfolioMargin {
    #[serde(serialize_with = "serialize_hex")]
    pub signature_chain_id: u64,
    pub hyperliquid_chain: String,
    #[serde(serialize_with = "serialize_address_lowercase")]
    pub user: Address,
    pub enabled: bool,
    pub nonce: u64,
}

impl Eip712 for UserPortfolioMargin {
    const PRIMARY_TYPE: &'static str = "HyperliquidTransaction:UserPortfolioMargin";
    const FIELDS: &'static [Eip712Field] = &[
        Eip712Field::new("hyperliquidChain", "string"),
        Eip712Field::new("user", "address"),
        Eip712Field::new("enabled", "bool"),
        Eip712Field::new("nonce", "uint64"),
    ];

    fn domain(&self) -> Eip712Domain {
        eip712_domain_for_chain(self.signature_chain_id)
    }

    fn values(&self) -> Vec<Eip712Value> {
        vec![
            Eip712Value::String(self.hyperliquid_chain.clone()),
            Eip712Value::Address(self.user),
            Eip712Value::Bool(self.enabled),
            Eip712Value::Uint64(self.nonce),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDexAbstraction {
    #[serde(serialize_with = "serialize_hex")]
    pub signature_chain_id: u64,
    pub hyperliquid_chain: String,
    #[serde(serialize_with = "serialize_address_lowercase")]
    pub user: Address,
    pub enabled: bool,
    pub nonce: u64,
}

impl Eip712 for UserDexAbstraction {
    const PRIMARY_TYPE: &'static str = "HyperliquidTransaction:UserDexAbstraction";
    const FIELDS: &'static [Eip712Field] = &[
        Eip712Field::new("hyperliquidChain", "string"),
        Eip712Field::new("user", "address"),
        Eip712Field::new("enabled", "bool"),
        Eip712Field::new("nonce", "uint64"),
    ];

    fn domain(&self) -> Eip712Domain {
        eip712_domain_for_chain(self.signature_chain_id)
    }

    fn values(&self) -> Vec<Eip712Value> {
        vec![
            Eip712Value::String(self.hyperliquid_chain.clone()),
            Eip712Value::Address(self.user),
            Eip712Value::Bool(self.enabled),
            Eip712Value::Uint64(self.nonce),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSetAbstraction {
    #[serde(serialize_with = "serialize_hex")]
    pub signature_chain_id: u64,
    pub hyperliquid_chain: String,
    #[serde(serialize_with = "serialize_address_lowercase")]
    pub user: Address,
    pub abstraction: String,
    pub nonce: u64,
}

impl Eip712 for UserSetAbstraction {
    const PRIMARY_TYPE: &'static str = "HyperliquidTransaction:UserSetAbstraction";
    const FIELDS: &'static [Eip712Field] = &[
        Eip712Field::new("hyperliquidChain", "string"),
        Eip712Field::new("user", "address"),
        Eip712Field::new("abstraction", "string"),
        Eip712Field::new("nonce", "uint64"),
    ];

    fn domain(&self) -> Eip712Domain {
        eip712_domain_for_chain(self.signature_chain_id)
    }

    fn values(&self) -> Vec<Eip712Value> {
        vec![
            Eip712Value::String(self.hyperliquid_chain.clone()),
            Eip712Value::Address(self.user),
            Eip712Value::String(self.abstraction.clone()),
            Eip712Value::Uint64(self.nonce),
        ]
    }
}

macro_rules! impl_into_action {
    ($($kind:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$kind> for Actions {
                fn from(action: $kind) -> Self {
                    Actions::$variant(action)
                }
            }
        )*
    };
}

impl_into_action!(
    ModifyRequest => Modify,
    UsdSend => UsdSend,
    SpotSend => SpotSend,
    Withdraw3 => Withdraw3,
    UsdClassTransfer => UsdClassTransfer,
    ApproveBuilderFee => ApproveBuilderFee,
    UserPortfolioMargin => UserPortfolioMargin,
    UserDexAbstraction => UserDexAbstraction,
    UserSetAbstraction => UserSetAbstraction,
);

impl ModifyRequest {
    pub fn by_oid(oid: u64, order: OrderRequest) -> Self {
        Self {
            oid: OrderRef::Oid(oid),
            order,
        }
    }
}
