//! BTCMarkets wire DTOs. Prices and volumes travel as integers scaled by 1e8.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BtcMarketsSide {
    Bid,
    Ask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BtcMarketsOrderKind {
    Limit,
    Market,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsPlaceOrderRequest {
    /// Counter currency, e.g. "AUD".
    pub currency: String,
    /// Base currency, e.g. "BTC".
    pub instrument: String,
    /// 1e8 fixed point; zero for market orders.
    pub price: i64,
    /// 1e8 fixed point.
    pub volume: i64,
    pub order_side: BtcMarketsSide,
    #[serde(rename = "ordertype")]
    pub order_kind: BtcMarketsOrderKind,
    pub client_request_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsPlaceOrderResponse {
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: i32,
    #[serde(default)]
    pub client_request_id: Option<String>,
    #[serde(default)]
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsCancelOrderRequest {
    pub order_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsCancelOrderResponse {
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: i32,
    #[serde(default)]
    pub responses: Vec<BtcMarketsCancelResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsCancelResult {
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: i32,
    #[serde(default)]
    pub id: i64,
}

/// Shared request body of /order/open and /order/trade/history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsHistoryRequest {
    pub currency: String,
    pub instrument: String,
    pub limit: u32,
    /// Epoch millis lower bound; omitted when no time-span filter is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsOrderDetailRequest {
    pub order_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsOrdersResponse {
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: i32,
    #[serde(default)]
    pub orders: Vec<BtcMarketsOrderDetail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsOrderDetail {
    pub id: i64,
    pub currency: String,
    pub instrument: String,
    pub order_side: BtcMarketsSide,
    #[serde(rename = "ordertype")]
    pub order_kind: BtcMarketsOrderKind,
    /// Epoch millis.
    pub creation_time: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    pub volume: i64,
    #[serde(default)]
    pub open_volume: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsTradeHistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: i32,
    #[serde(default)]
    pub trades: Vec<BtcMarketsUserTrade>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BtcMarketsUserTrade {
    pub id: i64,
    /// Epoch millis.
    pub creation_time: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub price: i64,
    pub volume: i64,
    pub side: BtcMarketsSide,
    #[serde(default)]
    pub fee: Option<i64>,
    pub order_id: i64,
}
