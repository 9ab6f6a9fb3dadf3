//! Pure mapping between YoBit's keyed-map payloads and the shared domain
//! model. No I/O here.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use interface::{CurrencyPair, ExchangeError, LimitOrder, OrderStatus, OrderType, UserTrade};

/// Markets exercised by the round-trip tests; YoBit itself lists thousands of
/// pairs in this same lowercase underscore format.
pub const CLAIMED_SYMBOLS: &[&str] = &[
    "btc_usd", "ltc_btc", "eth_btc", "doge_btc", "dash_btc", "ltc_usd", "eth_usd",
];

pub fn to_market_symbol(pair: &CurrencyPair) -> String {
    format!(
        "{}_{}",
        pair.base.code().to_lowercase(),
        pair.counter.code().to_lowercase()
    )
}

pub fn from_market_symbol(symbol: &str) -> Result<CurrencyPair, ExchangeError> {
    match symbol.split_once('_') {
        Some((base, counter)) if !base.is_empty() && !counter.is_empty() => {
            Ok(CurrencyPair::new(base, counter))
        }
        _ => Err(ExchangeError::Malformed(format!(
            "unrecognized YoBit pair: {}",
            symbol
        ))),
    }
}

pub fn side_param(order_type: OrderType) -> &'static str {
    match order_type {
        OrderType::Bid => "buy",
        OrderType::Ask => "sell",
    }
}

pub fn adapt_type(side: &str) -> Result<OrderType, ExchangeError> {
    match side {
        "buy" => Ok(OrderType::Bid),
        "sell" => Ok(OrderType::Ask),
        other => Err(ExchangeError::Malformed(format!(
            "unrecognized YoBit order type: {}",
            other
        ))),
    }
}

/// 0 active, 1 fulfilled, 2 canceled, 3 canceled with a partial fill.
pub fn adapt_status(status: i64) -> OrderStatus {
    match status {
        0 => OrderStatus::New,
        1 => OrderStatus::Filled,
        2 => OrderStatus::Canceled,
        3 => OrderStatus::PartiallyFilled,
        _ => OrderStatus::Unknown,
    }
}

pub fn adapt_timestamp_secs(secs: i64) -> Result<DateTime<Utc>, ExchangeError> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| ExchangeError::Malformed(format!("invalid epoch seconds: {}", secs)))
}

/// One ActiveOrders/OrderInfo row (keyed by order id) into a limit-order
/// snapshot.
pub fn adapt_order(id: &str, row: &Value) -> Result<LimitOrder, ExchangeError> {
    let pair = from_market_symbol(&str_field(row, "pair")?)?;
    let order_type = adapt_type(&str_field(row, "type")?)?;
    let amount = decimal_field(row, "amount")?;
    let rate = decimal_field(row, "rate")?;

    let mut order = LimitOrder::new(order_type, amount, pair, rate).with_id(id);
    order.timestamp = Some(adapt_timestamp_secs(int_field(row, "timestamp_created")?)?);
    order.status = match row.get("status") {
        Some(value) => Some(adapt_status(int_value(value, "status")?)),
        None => None,
    };
    Ok(order)
}

/// One TradeHistory row (keyed by trade id) into a UserTrade, including the
/// epoch-seconds timestamp conversion.
pub fn adapt_trade(id: &str, row: &Value) -> Result<UserTrade, ExchangeError> {
    Ok(UserTrade {
        order_type: adapt_type(&str_field(row, "type")?)?,
        amount: decimal_field(row, "amount")?,
        pair: from_market_symbol(&str_field(row, "pair")?)?,
        price: decimal_field(row, "rate")?,
        timestamp: adapt_timestamp_secs(int_field(row, "timestamp")?)?,
        id: id.to_string(),
        order_id: str_field(row, "order_id")?,
    })
}

// YoBit serializes numbers inconsistently (bare or quoted), so field readers
// accept both.

fn field<'a>(row: &'a Value, key: &str) -> Result<&'a Value, ExchangeError> {
    row.get(key)
        .ok_or_else(|| ExchangeError::Malformed(format!("missing field `{}`", key)))
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn str_field(row: &Value, key: &str) -> Result<String, ExchangeError> {
    Ok(value_to_string(field(row, key)?))
}

fn decimal_field(row: &Value, key: &str) -> Result<Decimal, ExchangeError> {
    let raw = value_to_string(field(row, key)?);
    raw.parse::<Decimal>().map_err(|_| {
        ExchangeError::Malformed(format!("field `{}` is not numeric: {}", key, raw))
    })
}

fn int_field(row: &Value, key: &str) -> Result<i64, ExchangeError> {
    int_value(field(row, key)?, key)
}

fn int_value(value: &Value, key: &str) -> Result<i64, ExchangeError> {
    let raw = value_to_string(value);
    raw.parse::<i64>().map_err(|_| {
        ExchangeError::Malformed(format!("field `{}` is not an integer: {}", key, raw))
    })
}
