//! BTCMarkets implementation of the shared trading interface.
//!
//! Request building and response extraction are pure functions so the
//! exchange's success-flag and id-extraction conventions are testable without
//! a network.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use interface::{
    CancelOrderParams, CurrencyPair, ExchangeError, ExchangeId, LimitOrder, MarketOrder,
    OpenOrdersParams, Order, TradeHistoryParams, UserTrades,
};

use super::adapter;
use super::dto::{
    BtcMarketsCancelOrderRequest, BtcMarketsCancelOrderResponse, BtcMarketsHistoryRequest,
    BtcMarketsOrderDetailRequest, BtcMarketsOrderKind, BtcMarketsOrdersResponse,
    BtcMarketsPlaceOrderRequest, BtcMarketsPlaceOrderResponse, BtcMarketsTradeHistoryResponse,
};
use super::BtcMarketsClient;
use crate::TradeService;

const ORDER_CREATE: &str = "/order/create";
const ORDER_CANCEL: &str = "/order/cancel";
const ORDER_OPEN: &str = "/order/open";
const ORDER_HISTORY: &str = "/order/trade/history";
const ORDER_DETAIL: &str = "/order/detail";

/// Documented default page length for history and open-order queries.
pub const DEFAULT_PAGE_LENGTH: u32 = 200;

#[async_trait]
impl TradeService for BtcMarketsClient {
    fn id(&self) -> ExchangeId {
        ExchangeId::BtcMarkets
    }

    async fn open_orders(
        &self,
        params: &OpenOrdersParams,
    ) -> Result<Vec<LimitOrder>, ExchangeError> {
        let pair = params.pair.as_ref().ok_or_else(|| {
            ExchangeError::InvalidUsage("open orders query needs a currency pair".to_string())
        })?;

        let request = BtcMarketsHistoryRequest {
            currency: pair.counter.code().to_string(),
            instrument: pair.base.code().to_string(),
            limit: DEFAULT_PAGE_LENGTH,
            since: None,
        };

        let response: BtcMarketsOrdersResponse = self.post_signed(ORDER_OPEN, &request).await?;
        if !response.success {
            return Err(exchange_error(
                response.error_message.as_deref(),
                response.error_code,
            ));
        }

        let mut orders = Vec::new();
        for detail in &response.orders {
            // Open market orders cannot exist; only limit rows are reported.
            if detail.order_kind == BtcMarketsOrderKind::Limit {
                if let Order::Limit(order) = adapter::adapt_order(detail)? {
                    orders.push(order);
                }
            }
        }
        Ok(orders)
    }

    async fn place_market_order(&self, order: &MarketOrder) -> Result<String, ExchangeError> {
        let request = build_market_order_request(order)?;
        info!("placing market order on {}", order.pair);
        let response: BtcMarketsPlaceOrderResponse =
            self.post_signed(ORDER_CREATE, &request).await?;
        extract_order_id(&response)
    }

    async fn place_limit_order(&self, order: &LimitOrder) -> Result<String, ExchangeError> {
        let request = build_limit_order_request(order)?;
        info!("placing limit order on {}", order.pair);
        let response: BtcMarketsPlaceOrderResponse =
            self.post_signed(ORDER_CREATE, &request).await?;
        extract_order_id(&response)
    }

    async fn cancel_order(&self, params: &CancelOrderParams) -> Result<bool, ExchangeError> {
        let order_id = params.order_id.as_deref().ok_or_else(|| {
            ExchangeError::InvalidUsage("cancel needs an order id".to_string())
        })?;
        let request = BtcMarketsCancelOrderRequest {
            order_ids: vec![parse_order_id(order_id)?],
        };
        let response: BtcMarketsCancelOrderResponse =
            self.post_signed(ORDER_CANCEL, &request).await?;
        extract_cancel_result(&response)
    }

    async fn trade_history(
        &self,
        params: &TradeHistoryParams,
    ) -> Result<UserTrades, ExchangeError> {
        let (request, pair) = build_history_request(params, &self.default_pair);
        let response: BtcMarketsTradeHistoryResponse =
            self.post_signed(ORDER_HISTORY, &request).await?;
        if !response.success {
            return Err(exchange_error(
                response.error_message.as_deref(),
                response.error_code,
            ));
        }

        let trades = response
            .trades
            .iter()
            .map(|row| adapter::adapt_trade(row, &pair))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(UserTrades::sorted_by_timestamp(trades))
    }

    async fn orders_by_id(&self, ids: &[&str]) -> Result<Vec<Order>, ExchangeError> {
        let order_ids = ids
            .iter()
            .map(|id| parse_order_id(id))
            .collect::<Result<Vec<_>, _>>()?;

        // The detail endpoint is a batch lookup; unmatched ids simply do not
        // appear in the response.
        let request = BtcMarketsOrderDetailRequest { order_ids };
        let response: BtcMarketsOrdersResponse = self.post_signed(ORDER_DETAIL, &request).await?;
        if !response.success {
            return Err(exchange_error(
                response.error_message.as_deref(),
                response.error_code,
            ));
        }

        response.orders.iter().map(adapter::adapt_order).collect()
    }

    fn trade_history_params(&self) -> TradeHistoryParams {
        TradeHistoryParams::new()
            .pair(self.default_pair.clone())
            .page_length(DEFAULT_PAGE_LENGTH)
    }

    fn open_orders_params(&self) -> OpenOrdersParams {
        OpenOrdersParams::for_pair(self.default_pair.clone())
    }
}

fn verify_order(
    amount: &Decimal,
    pair: &CurrencyPair,
    limit_price: Option<&Decimal>,
) -> Result<(), ExchangeError> {
    if amount.is_sign_negative() || amount.is_zero() {
        return Err(ExchangeError::InvalidUsage(format!(
            "order amount must be positive, got {}",
            amount
        )));
    }
    if !adapter::is_supported(pair) {
        return Err(ExchangeError::InvalidUsage(format!(
            "{} is not traded on BTCMarkets",
            pair
        )));
    }
    if let Some(price) = limit_price {
        if price.is_sign_negative() || price.is_zero() {
            return Err(ExchangeError::InvalidUsage(format!(
                "limit price must be positive, got {}",
                price
            )));
        }
    }
    Ok(())
}

pub(crate) fn build_market_order_request(
    order: &MarketOrder,
) -> Result<BtcMarketsPlaceOrderRequest, ExchangeError> {
    verify_order(&order.amount, &order.pair, None)?;
    Ok(BtcMarketsPlaceOrderRequest {
        currency: order.pair.counter.code().to_string(),
        instrument: order.pair.base.code().to_string(),
        price: 0,
        volume: adapter::to_fixed8(order.amount)?,
        order_side: adapter::adapt_side(order.order_type),
        order_kind: BtcMarketsOrderKind::Market,
        client_request_id: Uuid::new_v4().to_string(),
    })
}

pub(crate) fn build_limit_order_request(
    order: &LimitOrder,
) -> Result<BtcMarketsPlaceOrderRequest, ExchangeError> {
    verify_order(&order.amount, &order.pair, Some(&order.limit_price))?;
    Ok(BtcMarketsPlaceOrderRequest {
        currency: order.pair.counter.code().to_string(),
        instrument: order.pair.base.code().to_string(),
        price: adapter::to_fixed8(order.limit_price)?,
        volume: adapter::to_fixed8(order.amount)?,
        order_side: adapter::adapt_side(order.order_type),
        order_kind: BtcMarketsOrderKind::Limit,
        client_request_id: Uuid::new_v4().to_string(),
    })
}

/// The exchange-assigned id from a placement response, or the exchange's own
/// failure message when the success flag is false.
pub(crate) fn extract_order_id(
    response: &BtcMarketsPlaceOrderResponse,
) -> Result<String, ExchangeError> {
    if !response.success {
        return Err(exchange_error(
            response.error_message.as_deref(),
            response.error_code,
        ));
    }
    Ok(response.id.to_string())
}

/// Cancel verdict: the per-id inner flag decides. An outer failure is an
/// exchange error; a missing per-id entry reads as not cancelled.
pub(crate) fn extract_cancel_result(
    response: &BtcMarketsCancelOrderResponse,
) -> Result<bool, ExchangeError> {
    if !response.success {
        return Err(exchange_error(
            response.error_message.as_deref(),
            response.error_code,
        ));
    }
    Ok(response
        .responses
        .first()
        .map(|result| result.success)
        .unwrap_or(false))
}

/// History request from whichever capabilities are set. The exchange requires
/// a market and a limit, so those fall back to the configured default pair and
/// the documented page length; everything else stays unset when absent.
pub(crate) fn build_history_request(
    params: &TradeHistoryParams,
    default_pair: &CurrencyPair,
) -> (BtcMarketsHistoryRequest, CurrencyPair) {
    let pair = params.pair.clone().unwrap_or_else(|| default_pair.clone());
    let request = BtcMarketsHistoryRequest {
        currency: pair.counter.code().to_string(),
        instrument: pair.base.code().to_string(),
        limit: params.page_length.unwrap_or(DEFAULT_PAGE_LENGTH),
        since: params.start_time.map(|t| t.timestamp_millis()),
    };
    (request, pair)
}

fn parse_order_id(order_id: &str) -> Result<i64, ExchangeError> {
    order_id.parse::<i64>().map_err(|_| {
        ExchangeError::InvalidUsage(format!(
            "BTCMarkets order ids are numeric, got {:?}",
            order_id
        ))
    })
}

fn exchange_error(message: Option<&str>, code: i32) -> ExchangeError {
    match message {
        Some(msg) => ExchangeError::Exchange(msg.to_string()),
        None => ExchangeError::Exchange(format!("error code {}", code)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use interface::{Credentials, OrderType};

    use super::super::dto::BtcMarketsSide;
    use super::*;

    fn client() -> BtcMarketsClient {
        BtcMarketsClient::new(Credentials::new("test-key", "dGVzdC1zZWNyZXQ="))
    }

    #[test]
    fn market_order_maps_declared_side_and_type() {
        let order = MarketOrder::new(OrderType::Bid, dec!(10.00000000), CurrencyPair::btc_aud());
        let request = build_market_order_request(&order).unwrap();

        assert_eq!(request.order_side, BtcMarketsSide::Bid);
        assert_eq!(request.order_kind, BtcMarketsOrderKind::Market);
        assert_eq!(request.volume, 1_000_000_000);
        assert_eq!(request.price, 0);
        assert_eq!(request.instrument, "BTC");
        assert_eq!(request.currency, "AUD");
    }

    #[test]
    fn limit_order_maps_price_amount_side_and_type() {
        let order = LimitOrder::new(
            OrderType::Ask,
            dec!(10),
            CurrencyPair::btc_aud(),
            dec!(20),
        );
        let request = build_limit_order_request(&order).unwrap();

        assert_eq!(request.order_side, BtcMarketsSide::Ask);
        assert_eq!(request.order_kind, BtcMarketsOrderKind::Limit);
        assert_eq!(request.price, 2_000_000_000);
        assert_eq!(request.volume, 1_000_000_000);
    }

    #[test]
    fn successful_placement_extracts_the_numeric_id() {
        let response: BtcMarketsPlaceOrderResponse = serde_json::from_str(
            r#"{"success":true,"errorCode":0,"errorMessage":null,"clientRequestId":"11111","id":12345}"#,
        )
        .unwrap();
        assert_eq!(extract_order_id(&response).unwrap(), "12345");
    }

    #[test]
    fn failed_placement_propagates_the_exchange_message() {
        let response: BtcMarketsPlaceOrderResponse = serde_json::from_str(
            r#"{"success":false,"errorCode":3,"errorMessage":"Insufficient funds","id":0}"#,
        )
        .unwrap();
        match extract_order_id(&response).unwrap_err() {
            ExchangeError::Exchange(message) => assert_eq!(message, "Insufficient funds"),
            other => panic!("expected an exchange error, got {:?}", other),
        }
    }

    #[test]
    fn cancel_reads_the_per_id_success_flag() {
        let cancelled: BtcMarketsCancelOrderResponse = serde_json::from_str(
            r#"{"success":true,"errorCode":0,"responses":[{"success":true,"errorCode":0,"id":111}]}"#,
        )
        .unwrap();
        assert!(extract_cancel_result(&cancelled).unwrap());

        let refused: BtcMarketsCancelOrderResponse = serde_json::from_str(
            r#"{"success":true,"errorCode":0,"responses":[{"success":false,"errorCode":3,"errorMessage":"order not found","id":111}]}"#,
        )
        .unwrap();
        assert!(!extract_cancel_result(&refused).unwrap());
    }

    #[test]
    fn cancel_with_no_per_id_entry_reads_as_not_cancelled() {
        let empty: BtcMarketsCancelOrderResponse =
            serde_json::from_str(r#"{"success":true,"errorCode":0,"responses":[]}"#).unwrap();
        assert!(!extract_cancel_result(&empty).unwrap());
    }

    #[test]
    fn zero_amount_is_rejected_before_any_network_call() {
        let order = MarketOrder::new(OrderType::Bid, dec!(0), CurrencyPair::btc_aud());
        assert!(matches!(
            build_market_order_request(&order),
            Err(ExchangeError::InvalidUsage(_))
        ));
    }

    #[test]
    fn unsupported_pair_is_rejected_before_any_network_call() {
        let order = MarketOrder::new(OrderType::Bid, dec!(1), CurrencyPair::new("DOGE", "KRW"));
        assert!(matches!(
            build_market_order_request(&order),
            Err(ExchangeError::InvalidUsage(_))
        ));
    }

    #[test]
    fn non_numeric_order_id_is_caller_misuse() {
        assert!(matches!(
            parse_order_id("not-a-number"),
            Err(ExchangeError::InvalidUsage(_))
        ));
    }

    #[test]
    fn default_history_params_use_the_documented_page_length() {
        let params = client().trade_history_params();
        assert_eq!(params.page_length, Some(DEFAULT_PAGE_LENGTH));
        assert_eq!(params.page_length, Some(200));
        assert_eq!(params.pair, Some(CurrencyPair::btc_aud()));
    }

    #[test]
    fn time_span_capability_sets_since_and_nothing_else() {
        let start = Utc.timestamp_opt(1_500_000_000, 0).single().unwrap();
        let params = TradeHistoryParams::new().time_span(Some(start), None);
        let (request, _) = build_history_request(&params, &CurrencyPair::btc_aud());

        assert_eq!(request.since, Some(1_500_000_000_000));
        assert_eq!(request.limit, DEFAULT_PAGE_LENGTH);
        assert_eq!(request.instrument, "BTC");

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(json["since"], 1_500_000_000_000i64);
    }

    #[test]
    fn empty_params_build_a_valid_default_request() {
        let params = TradeHistoryParams::new();
        let (request, pair) = build_history_request(&params, &CurrencyPair::btc_aud());

        assert_eq!(request.since, None);
        assert_eq!(request.limit, 200);
        assert_eq!(pair, CurrencyPair::btc_aud());
    }

    #[test]
    fn unset_time_span_leaves_since_out_of_the_signed_body() {
        let (request, _) =
            build_history_request(&TradeHistoryParams::new(), &CurrencyPair::btc_aud());
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();

        assert!(json.get("since").is_none());
        assert_eq!(json["currency"], "AUD");
        assert_eq!(json["instrument"], "BTC");
        assert_eq!(json["limit"], 200);
    }
}
