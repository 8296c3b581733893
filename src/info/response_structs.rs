use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrdersResponse {
    pub coin: String,
    pub limit_px: String,
    pub oid: u64,
    pub side: String,
    pub sz: String,
    pub timestamp: u64,
    #[serde(default)]
    pub cloid: Option<String>,
}

/// Open order with trigger and tif details, as shown in the web frontend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrontendOpenOrder {
    pub coin: String,
    pub side: String,
    pub limit_px: String,
    pub sz: String,
    pub oid: u64,
    pub timestamp: u64,
    pub orig_sz: String,
    #[serde(default)]
    pub trigger_condition: Option<String>,
    #[serde(default)]
    pub is_trigger: bool,
    #[serde(default)]
    pub trigger_px: Option<String>,
    #[serde(default)]
    pub is_position_tpsl: bool,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub tif: Option<String>,
    #[serde(default)]
    pub cloid: Option<String>,
}

/// An order together with its lifecycle status.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithStatus {
    pub order: FrontendOpenOrder,
    pub status: String,
    pub status_timestamp: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OrderStatusResponse {
    pub status: String,
    /// `None` if the order is not found
    #[serde(default)]
    pub order: Option<OrderWithStatus>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserFill {
    pub coin: String,
    pub px: String,
    pub sz: String,
    pub side: String,
    pub time: u64,
    pub start_position: String,
    pub dir: String,
    pub closed_pnl: String,
    pub hash: String,
    pub oid: u64,
    pub crossed: bool,
    pub fee: String,
    pub tid: u64,
    #[serde(default)]
    pub fee_token: Option<String>,
    #[serde(default)]
    pub builder_fee: Option<String>,
    #[serde(default)]
    pub cloid: Option<String>,
    #[serde(default)]
    pub twap_id: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BookLevel {
    pub px: String,
    pub sz: String,
    pub n: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct L2BookResponse {
    pub coin: String,
    /// `[bids, asks]`
    pub levels: Vec<Vec<BookLevel>>,
    pub time: u64,
}

impl L2BookResponse {
    pub fn bids(&self) -> &[BookLevel] {
        self.levels.first().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn asks(&self) -> &[BookLevel] {
        self.levels.get(1).map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRateLimitResponse {
    pub cum_vlm: String,
    pub n_requests_used: u64,
    pub n_requests_cap: u64,
    #[serde(default)]
    pub n_requests_surplus: u64,
}

impl UserRateLimitResponse {
    pub fn remaining_requests(&self) -> u64 {
        self.n_requests_cap.saturating_sub(self.n_requests_used)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.n_requests_used >= self.n_requests_cap
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreTransferCheckResponse {
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub is_sanctioned: bool,
    #[serde(default)]
    pub user_exists: bool,
    #[serde(default)]
    pub user_has_sent_tx: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpotBalance {
    pub coin: String,
    pub token: u32,
    pub hold: String,
    pub total: String,
    #[serde(default)]
    pub entry_ntl: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SpotClearinghouseState {
    pub balances: Vec<SpotBalance>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    pub account_value: String,
    pub total_margin_used: String,
    pub total_ntl_pos: String,
    pub total_raw_usd: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Leverage {
    #[serde(rename = "type")]
    pub type_string: String,
    pub value: u32,
    #[serde(default)]
    pub raw_usd: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionData {
    pub coin: String,
    pub szi: String,
    #[serde(default)]
    pub entry_px: Option<String>,
    pub position_value: String,
    pub unrealized_pnl: String,
    pub return_on_equity: String,
    pub leverage: Leverage,
    #[serde(default)]
    pub liquidation_px: Option<String>,
    pub margin_used: String,
    #[serde(default)]
    pub max_leverage: Option<u32>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AssetPosition {
    pub position: PositionData,
    #[serde(rename = "type")]
    pub type_string: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    pub asset_positions: Vec<AssetPosition>,
    pub margin_summary: MarginSummary,
    pub cross_margin_summary: MarginSummary,
    pub withdrawable: String,
    #[serde(default)]
    pub time: Option<u64>,
}
