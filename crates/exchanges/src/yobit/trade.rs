//! YoBit implementation of the shared trading interface.
//!
//! YoBit's trade API is one POST endpoint dispatched on a `method` form
//! field; the builders below are pure so outbound field sets are testable
//! without a network.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use interface::{
    CancelOrderParams, ExchangeError, ExchangeId, LimitOrder, MarketOrder, OpenOrdersParams,
    Order, SortOrder, TradeHistoryParams, UserTrades,
};

use super::adapter;
use super::dto::YoBitResponse;
use super::YoBitClient;
use crate::TradeService;

const METHOD_ACTIVE_ORDERS: &str = "ActiveOrders";
const METHOD_TRADE: &str = "Trade";
const METHOD_CANCEL_ORDER: &str = "CancelOrder";
const METHOD_TRADE_HISTORY: &str = "TradeHistory";
const METHOD_ORDER_INFO: &str = "OrderInfo";

/// Documented defaults the exchange requires when the caller leaves the
/// corresponding capability unset.
pub const DEFAULT_COUNT: u32 = 1000;
pub const DEFAULT_OFFSET: u64 = 0;
pub const DEFAULT_ORDER: &str = "DESC";

#[async_trait]
impl TradeService for YoBitClient {
    fn id(&self) -> ExchangeId {
        ExchangeId::YoBit
    }

    async fn open_orders(
        &self,
        params: &OpenOrdersParams,
    ) -> Result<Vec<LimitOrder>, ExchangeError> {
        let pair = params.pair.as_ref().ok_or_else(|| {
            ExchangeError::InvalidUsage("open orders query needs a currency pair".to_string())
        })?;

        let fields = [("pair", adapter::to_market_symbol(pair))];
        let response = self.post_signed(METHOD_ACTIVE_ORDERS, &fields).await?;
        if !response.is_success() {
            return Err(ExchangeError::Exchange(response.error_message()));
        }

        let mut orders = Vec::new();
        if let Some(rows) = &response.return_data {
            for (id, row) in rows {
                orders.push(adapter::adapt_order(id, row)?);
            }
        }
        Ok(orders)
    }

    async fn place_market_order(&self, _order: &MarketOrder) -> Result<String, ExchangeError> {
        Err(ExchangeError::NotAvailable("market orders"))
    }

    async fn place_limit_order(&self, order: &LimitOrder) -> Result<String, ExchangeError> {
        let fields = build_trade_fields(order)?;
        info!("placing limit order on {}", order.pair);
        let response = self.post_signed(METHOD_TRADE, &fields).await?;
        if !response.is_success() {
            return Err(ExchangeError::Exchange(response.error_message()));
        }

        response
            .return_data
            .as_ref()
            .and_then(|data| data.get("order_id"))
            .map(value_to_string)
            .ok_or_else(|| {
                ExchangeError::Malformed("placement response carries no order_id".to_string())
            })
    }

    async fn cancel_order(&self, params: &CancelOrderParams) -> Result<bool, ExchangeError> {
        let order_id = params.order_id.as_deref().ok_or_else(|| {
            ExchangeError::InvalidUsage("cancel needs an order id".to_string())
        })?;

        let fields = [("order_id", parse_order_id(order_id)?.to_string())];
        let response = self.post_signed(METHOD_CANCEL_ORDER, &fields).await?;
        Ok(cancel_verdict(&response))
    }

    async fn trade_history(
        &self,
        params: &TradeHistoryParams,
    ) -> Result<UserTrades, ExchangeError> {
        let fields = build_history_fields(params);
        let response = self.post_signed(METHOD_TRADE_HISTORY, &fields).await?;
        if !response.is_success() {
            return Err(ExchangeError::Exchange(response.error_message()));
        }

        let mut trades = Vec::new();
        if let Some(rows) = &response.return_data {
            for (id, row) in rows {
                trades.push(adapter::adapt_trade(id, row)?);
            }
        }
        Ok(UserTrades::sorted_by_timestamp(trades))
    }

    async fn orders_by_id(&self, ids: &[&str]) -> Result<Vec<Order>, ExchangeError> {
        let mut orders = Vec::new();

        // OrderInfo is single-id, so this is one round trip per id. An id the
        // exchange knows nothing about is skipped, not an error.
        for id in ids {
            let fields = [("order_id", parse_order_id(id)?.to_string())];
            let response = self.post_signed(METHOD_ORDER_INFO, &fields).await?;
            if !response.is_success() {
                continue;
            }

            if let Some(row) = response.return_data.as_ref().and_then(|data| data.get(*id)) {
                orders.push(Order::Limit(adapter::adapt_order(id, row)?));
            }
        }

        Ok(orders)
    }

    fn trade_history_params(&self) -> TradeHistoryParams {
        TradeHistoryParams::new()
            .offset(DEFAULT_OFFSET)
            .page_length(DEFAULT_COUNT)
            .sort(SortOrder::Descending)
    }

    fn open_orders_params(&self) -> OpenOrdersParams {
        OpenOrdersParams::default()
    }
}

/// The envelope's flag is the cancellation verdict; a refusal is data, not an
/// error.
pub(crate) fn cancel_verdict(response: &YoBitResponse) -> bool {
    response.is_success()
}

pub(crate) fn build_trade_fields(
    order: &LimitOrder,
) -> Result<Vec<(&'static str, String)>, ExchangeError> {
    if order.amount.is_sign_negative() || order.amount.is_zero() {
        return Err(ExchangeError::InvalidUsage(format!(
            "order amount must be positive, got {}",
            order.amount
        )));
    }
    if order.limit_price.is_sign_negative() || order.limit_price.is_zero() {
        return Err(ExchangeError::InvalidUsage(format!(
            "limit price must be positive, got {}",
            order.limit_price
        )));
    }

    Ok(vec![
        ("pair", adapter::to_market_symbol(&order.pair)),
        ("type", adapter::side_param(order.order_type).to_string()),
        ("rate", format_decimal(order.limit_price)),
        ("amount", format_decimal(order.amount)),
    ])
}

/// TradeHistory fields from whichever capabilities are set. Offset, count and
/// sort order are required by the exchange and fall back to its documented
/// defaults; id-span, time-span and pair are omitted entirely when unset.
pub(crate) fn build_history_fields(params: &TradeHistoryParams) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("from", params.offset.unwrap_or(DEFAULT_OFFSET).to_string()),
        (
            "count",
            params.page_length.unwrap_or(DEFAULT_COUNT).to_string(),
        ),
    ];
    if let Some(start_id) = &params.start_id {
        fields.push(("from_id", start_id.clone()));
    }
    if let Some(end_id) = &params.end_id {
        fields.push(("end_id", end_id.clone()));
    }
    fields.push((
        "order",
        match params.sort {
            Some(SortOrder::Ascending) => "ASC".to_string(),
            Some(SortOrder::Descending) | None => DEFAULT_ORDER.to_string(),
        },
    ));
    if let Some(start_time) = params.start_time {
        fields.push(("since", start_time.timestamp().to_string()));
    }
    if let Some(end_time) = params.end_time {
        fields.push(("end", end_time.timestamp().to_string()));
    }
    if let Some(pair) = &params.pair {
        fields.push(("pair", adapter::to_market_symbol(pair)));
    }
    fields
}

fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

fn parse_order_id(order_id: &str) -> Result<i64, ExchangeError> {
    order_id.parse::<i64>().map_err(|_| {
        ExchangeError::InvalidUsage(format!("YoBit order ids are numeric, got {:?}", order_id))
    })
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
