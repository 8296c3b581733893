use serde::{Deserialize, Serialize};

/// Perp universe, for the default dex or a builder-deployed one.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Meta {
    pub universe: Vec<AssetMeta>,
}

impl Meta {
    /// Position of the asset named `name` (case-insensitive, exact).
    ///
    /// Builder-dex universes list names as `dex:NAME`; `dex` lets a bare name
    /// match those entries too.
    pub fn position_of(&self, name: &str, dex: Option<&str>) -> Option<u32> {
        let prefixed = dex.map(|d| format!("{d}:{name}"));
        self.universe
            .iter()
            .position(|asset| {
                asset.name.eq_ignore_ascii_case(name)
                    || prefixed
                        .as_deref()
                        .is_some_and(|p| asset.name.eq_ignore_ascii_case(p))
            })
            .and_then(|i| u32::try_from(i).ok())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetMeta {
    pub name: String,
    pub sz_decimals: u32,
    #[serde(default)]
    pub max_leverage: Option<u32>,
    #[serde(default)]
    pub only_isolated: Option<bool>,
    #[serde(default)]
    pub is_delisted: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SpotMeta {
    pub universe: Vec<SpotAssetMeta>,
    pub tokens: Vec<TokenInfo>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpotAssetMeta {
    pub tokens: [usize; 2],
    pub name: String,
    pub index: usize,
    #[serde(default)]
    pub is_canonical: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub name: String,
    pub sz_decimals: u32,
    pub wei_decimals: u32,
    pub index: usize,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub is_canonical: bool,
}

/// Entry of the `perpDexs` list. Position 0 is the default dex and is `null`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerpDex {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub deployer: Option<String>,
    #[serde(default)]
    pub oracle_updater: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetContext {
    pub day_ntl_vlm: String,
    pub funding: String,
    pub impact_pxs: Option<Vec<String>>,
    pub mark_px: String,
    pub mid_px: Option<String>,
    pub open_interest: String,
    pub oracle_px: String,
    pub premium: Option<String>,
    pub prev_day_px: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpotAssetContext {
    pub day_ntl_vlm: String,
    pub mark_px: String,
    pub mid_px: Option<String>,
    pub prev_day_px: String,
    #[serde(default)]
    pub circulating_supply: Option<String>,
    pub coin: String,
}
