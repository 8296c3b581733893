use std::{collections::HashMap, sync::Arc};

use alloy::primitives::Address;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    environment::EnvironmentConfig,
    exchange::OrderRef,
    info::response_structs::{
        ClearinghouseState, FrontendOpenOrder, L2BookResponse, OpenOrdersResponse,
        OrderStatusResponse, OrderWithStatus, PreTransferCheckResponse, SpotClearinghouseState,
        UserFill, UserRateLimitResponse,
    },
    meta::{AssetContext, Meta, PerpDex, SpotAssetContext, SpotMeta},
    prelude::*,
    req::{HttpClient, HttpTransport},
};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum InfoRequest {
    /// Perp universe. `dex` selects a builder-deployed dex.
    Meta {
        #[serde(skip_serializing_if = "Option::is_none")]
        dex: Option<String>,
    },
    MetaAndAssetCtxs {
        #[serde(skip_serializing_if = "Option::is_none")]
        dex: Option<String>,
    },
    SpotMeta,
    SpotMetaAndAssetCtxs,
    PerpDexs,
    AllMids {
        #[serde(skip_serializing_if = "Option::is_none")]
        dex: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    L2Book {
        coin: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        n_sig_figs: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        mantissa: Option<u32>,
    },
    OpenOrders {
        user: Address,
        #[serde(skip_serializing_if = "Option::is_none")]
        dex: Option<String>,
    },
    FrontendOpenOrders {
        user: Address,
        #[serde(skip_serializing_if = "Option::is_none")]
        dex: Option<String>,
    },
    /// `oid` is either a venue order id or a `0x` cloid.
    OrderStatus {
        user: Address,
        oid: OrderRef,
    },
    HistoricalOrders {
        user: Address,
    },
    UserFills {
        user: Address,
    },
    #[serde(rename_all = "camelCase")]
    UserFillsByTime {
        user: Address,
        start_time: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_time: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        aggregate_by_time: Option<bool>,
    },
    UserRateLimit {
        user: Address,
    },
    PreTransferCheck {
        user: Address,
        source: Address,
    },
    SpotClearinghouseState {
        user: Address,
    },
    ClearinghouseState {
        user: Address,
        #[serde(skip_serializing_if = "Option::is_none")]
        dex: Option<String>,
    },
    MaxBuilderFee {
        user: Address,
        builder: Address,
    },
}

impl InfoRequest {
    fn type_name(&self) -> &'static str {
        match self {
            InfoRequest::Meta { .. } => "meta",
            InfoRequest::MetaAndAssetCtxs { .. } => "metaAndAssetCtxs",
            InfoRequest::SpotMeta => "spotMeta",
            InfoRequest::SpotMetaAndAssetCtxs => "spotMetaAndAssetCtxs",
            InfoRequest::PerpDexs => "perpDexs",
            InfoRequest::AllMids { .. } => "allMids",
            InfoRequest::L2Book { .. } => "l2Book",
            InfoRequest::OpenOrders { .. } => "openOrders",
            InfoRequest::FrontendOpenOrders { .. } => "frontendOpenOrders",
            InfoRequest::OrderStatus { .. } => "orderStatus",
            InfoRequest::HistoricalOrders { .. } => "historicalOrders",
            InfoRequest::UserFills { .. } => "userFills",
            InfoRequest::UserFillsByTime { .. } => "userFillsByTime",
            InfoRequest::UserRateLimit { .. } => "userRateLimit",
            InfoRequest::PreTransferCheck { .. } => "preTransferCheck",
            InfoRequest::SpotClearinghouseState { .. } => "spotClearinghouseState",
            InfoRequest::ClearinghouseState { .. } => "clearinghouseState",
            InfoRequest::MaxBuilderFee { .. } => "maxBuilderFee",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InfoClient {
    pub http_client: HttpClient,
}

impl InfoClient {
    pub fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    pub fn with_transport(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        Self::new(HttpClient::new(transport, base_url))
    }

    /// Client over reqwest for an environment's base URL.
    pub fn for_environment(config: &EnvironmentConfig, client: Option<Client>) -> Self {
        Self::new(HttpClient::with_reqwest(
            client.unwrap_or_default(),
            config.base_url.clone(),
        ))
    }

    async fn send_info_request<T: for<'a> Deserialize<'a>>(
        &self,
        info_request: InfoRequest,
    ) -> Result<T> {
        debug!(query = info_request.type_name(), "Info request");
        self.http_client.post_info(&info_request).await
    }

    pub async fn meta(&self) -> Result<Meta> {
        self.meta_for_dex(None).await
    }

    pub async fn meta_for_dex(&self, dex: Option<&str>) -> Result<Meta> {
        let input = InfoRequest::Meta {
            dex: dex.map(String::from),
        };
        self.send_info_request(input).await
    }

    pub async fn meta_and_asset_ctxs(&self, dex: Option<&str>) -> Result<(Meta, Vec<AssetContext>)> {
        let input = InfoRequest::MetaAndAssetCtxs {
            dex: dex.map(String::from),
        };
        self.send_info_request(input).await
    }

    /// Asset contexts alone, in universe order.
    pub async fn asset_ctxs(&self, dex: Option<&str>) -> Result<Vec<AssetContext>> {
        let (_, ctxs) = self.meta_and_asset_ctxs(dex).await?;
        Ok(ctxs)
    }

    pub async fn spot_meta(&self) -> Result<SpotMeta> {
        self.send_info_request(InfoRequest::SpotMeta).await
    }

    pub async fn spot_meta_and_asset_ctxs(&self) -> Result<(SpotMeta, Vec<SpotAssetContext>)> {
        self.send_info_request(InfoRequest::SpotMetaAndAssetCtxs)
            .await
    }

    pub async fn spot_asset_ctxs(&self) -> Result<Vec<SpotAssetContext>> {
        let (_, ctxs) = self.spot_meta_and_asset_ctxs().await?;
        Ok(ctxs)
    }

    /// Registered perp dexs. Position 0 is the default dex and comes back `None`.
    pub async fn perp_dexs(&self) -> Result<Vec<Option<PerpDex>>> {
        self.send_info_request(InfoRequest::PerpDexs).await
    }

    pub async fn all_mids(&self, dex: Option<&str>) -> Result<HashMap<String, String>> {
        let input = InfoRequest::AllMids {
            dex: dex.map(String::from),
        };
        self.send_info_request(input).await
    }

    pub async fn l2_book(&self, coin: &str) -> Result<L2BookResponse> {
        let input = InfoRequest::L2Book {
            coin: coin.to_string(),
            n_sig_figs: None,
            mantissa: None,
        };
        self.send_info_request(input).await
    }

    /// Book aggregated to `n_sig_figs` significant figures (2..=5).
    pub async fn l2_book_aggregated(
        &self,
        coin: &str,
        n_sig_figs: u32,
        mantissa: Option<u32>,
    ) -> Result<L2BookResponse> {
        let input = InfoRequest::L2Book {
            coin: coin.to_string(),
            n_sig_figs: Some(n_sig_figs),
            mantissa,
        };
        self.send_info_request(input).await
    }

    pub async fn open_orders(
        &self,
        user: Address,
        dex: Option<&str>,
    ) -> Result<Vec<OpenOrdersResponse>> {
        let input = InfoRequest::OpenOrders {
            user,
            dex: dex.map(String::from),
        };
        self.send_info_request(input).await
    }

    pub async fn frontend_open_orders(
        &self,
        user: Address,
        dex: Option<&str>,
    ) -> Result<Vec<FrontendOpenOrder>> {
        let input = InfoRequest::FrontendOpenOrders {
            user,
            dex: dex.map(String::from),
        };
        self.send_info_request(input).await
    }

    pub async fn order_status(&self, user: Address, oid: OrderRef) -> Result<OrderStatusResponse> {
        let input = InfoRequest::OrderStatus { user, oid };
        self.send_info_request(input).await
    }

    pub async fn historical_orders(&self, user: Address) -> Result<Vec<OrderWithStatus>> {
        let input = InfoRequest::HistoricalOrders { user };
        self.send_info_request(input).await
    }

    pub async fn user_fills(&self, user: Address) -> Result<Vec<UserFill>> {
        let input = InfoRequest::UserFills { user };
        self.send_info_request(input).await
    }

    pub async fn user_fills_by_time(
        &self,
        user: Address,
        start_time: u64,
        end_time: Option<u64>,
        aggregate_by_time: Option<bool>,
    ) -> Result<Vec<UserFill>> {
        let input = InfoRequest::UserFillsByTime {
            user,
            start_time,
            end_time,
            aggregate_by_time,
        };
        self.send_info_request(input).await
    }

    pub async fn user_rate_limit(&self, user: Address) -> Result<UserRateLimitResponse> {
        let input = InfoRequest::UserRateLimit { user };
        self.send_info_request(input).await
    }

    pub async fn pre_transfer_check(
        &self,
        user: Address,
        source: Address,
    ) -> Result<PreTransferCheckResponse> {
        let input = InfoRequest::PreTransferCheck { user, source };
        self.send_info_request(input).await
    }

    pub async fn spot_clearinghouse_state(&self, user: Address) -> Result<SpotClearinghouseState> {
        let input = InfoRequest::SpotClearinghouseState { user };
        self.send_info_request(input).await
    }

    pub async fn clearinghouse_state(
        &self,
        user: Address,
        dex: Option<&str>,
    ) -> Result<ClearinghouseState> {
        let input = InfoRequest::ClearinghouseState {
            user,
            dex: dex.map(String::from),
        };
        self.send_info_request(input).await
    }

    /// Approved builder fee for `user`, in tenths of a basis point.
    pub async fn max_builder_fee(&self, user: Address, builder: Address) -> Result<u64> {
        let input = InfoRequest::MaxBuilderFee { user, builder };
        self.send_info_request(input).await
    }
}
