//! Pure mapping between BTCMarkets wire shapes and the shared domain model.
//! No I/O here.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use interface::{
    CurrencyPair, ExchangeError, LimitOrder, MarketOrder, Order, OrderStatus, OrderType,
    UserTrade,
};

use super::dto::{BtcMarketsOrderDetail, BtcMarketsOrderKind, BtcMarketsSide, BtcMarketsUserTrade};

/// Markets BTCMarkets lists for trading.
pub const SUPPORTED_SYMBOLS: &[&str] = &[
    "BTC/AUD", "LTC/AUD", "ETH/AUD", "ETC/AUD", "XRP/AUD", "BCH/AUD", "LTC/BTC", "ETH/BTC",
    "ETC/BTC", "XRP/BTC", "BCH/BTC",
];

const FIXED_POINT_SCALE: u32 = 8;

pub fn to_market_symbol(pair: &CurrencyPair) -> String {
    format!("{}/{}", pair.base, pair.counter)
}

pub fn from_market_symbol(symbol: &str) -> Result<CurrencyPair, ExchangeError> {
    match symbol.split_once('/') {
        Some((base, counter)) if !base.is_empty() && !counter.is_empty() => {
            Ok(CurrencyPair::new(base, counter))
        }
        _ => Err(ExchangeError::Malformed(format!(
            "unrecognized BTCMarkets symbol: {}",
            symbol
        ))),
    }
}

pub fn is_supported(pair: &CurrencyPair) -> bool {
    let symbol = to_market_symbol(pair);
    SUPPORTED_SYMBOLS.contains(&symbol.as_str())
}

pub fn adapt_side(order_type: OrderType) -> BtcMarketsSide {
    match order_type {
        OrderType::Bid => BtcMarketsSide::Bid,
        OrderType::Ask => BtcMarketsSide::Ask,
    }
}

pub fn adapt_order_type(side: BtcMarketsSide) -> OrderType {
    match side {
        BtcMarketsSide::Bid => OrderType::Bid,
        BtcMarketsSide::Ask => OrderType::Ask,
    }
}

/// Scale a decimal onto the exchange's 1e-8 integer grid, truncating below
/// the grid. A positive value that truncates to zero is rejected rather than
/// silently sent as nothing.
pub fn to_fixed8(value: Decimal) -> Result<i64, ExchangeError> {
    let scaled = (value * Decimal::from(100_000_000i64)).trunc();
    let fixed = scaled.to_i64().ok_or_else(|| {
        ExchangeError::InvalidUsage(format!("value {} overflows the wire format", value))
    })?;
    if fixed == 0 && !value.is_zero() {
        return Err(ExchangeError::InvalidUsage(format!(
            "value {} is below the exchange's 1e-8 resolution",
            value
        )));
    }
    Ok(fixed)
}

pub fn from_fixed8(value: i64) -> Decimal {
    Decimal::new(value, FIXED_POINT_SCALE)
}

pub fn adapt_status(status: &str) -> OrderStatus {
    match status {
        "New" | "Placed" => OrderStatus::New,
        "Partially Matched" => OrderStatus::PartiallyFilled,
        "Fully Matched" => OrderStatus::Filled,
        "Cancelled" | "Partially Cancelled" => OrderStatus::Canceled,
        _ => OrderStatus::Unknown,
    }
}

pub fn adapt_timestamp_millis(millis: i64) -> Result<DateTime<Utc>, ExchangeError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ExchangeError::Malformed(format!("invalid epoch millis: {}", millis)))
}

/// One order-detail row into a shared order snapshot.
pub fn adapt_order(detail: &BtcMarketsOrderDetail) -> Result<Order, ExchangeError> {
    let pair = CurrencyPair::new(&detail.instrument, &detail.currency);
    let order_type = adapt_order_type(detail.order_side);
    let amount = from_fixed8(detail.volume);
    let timestamp = adapt_timestamp_millis(detail.creation_time)?;
    let id = detail.id.to_string();

    match detail.order_kind {
        BtcMarketsOrderKind::Limit => {
            let mut order = LimitOrder::new(
                order_type,
                amount,
                pair,
                from_fixed8(detail.price.unwrap_or(0)),
            )
            .with_id(&id);
            order.timestamp = Some(timestamp);
            order.status = detail.status.as_deref().map(adapt_status);
            Ok(Order::Limit(order))
        }
        BtcMarketsOrderKind::Market => {
            let mut order = MarketOrder::new(order_type, amount, pair);
            order.id = Some(id);
            order.timestamp = Some(timestamp);
            Ok(Order::Market(order))
        }
    }
}

/// One trade-history row. The row carries no market, so the queried pair is
/// passed through.
pub fn adapt_trade(
    row: &BtcMarketsUserTrade,
    pair: &CurrencyPair,
) -> Result<UserTrade, ExchangeError> {
    Ok(UserTrade {
        order_type: adapt_order_type(row.side),
        amount: from_fixed8(row.volume),
        pair: pair.clone(),
        price: from_fixed8(row.price),
        timestamp: adapt_timestamp_millis(row.creation_time)?,
        id: row.id.to_string(),
        order_id: row.order_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn market_symbol_round_trips_for_every_supported_symbol() {
        for symbol in SUPPORTED_SYMBOLS {
            let pair = from_market_symbol(symbol).unwrap();
            assert_eq!(to_market_symbol(&pair), *symbol);
        }
    }

    #[test]
    fn unsupported_pair_is_detected() {
        assert!(is_supported(&CurrencyPair::btc_aud()));
        assert!(!is_supported(&CurrencyPair::new("DOGE", "KRW")));
    }

    #[test]
    fn fixed_point_scaling_is_exact() {
        assert_eq!(to_fixed8(dec!(10.00000000)).unwrap(), 1_000_000_000);
        assert_eq!(to_fixed8(dec!(20)).unwrap(), 2_000_000_000);
        assert_eq!(to_fixed8(dec!(0.00000001)).unwrap(), 1);
        assert_eq!(from_fixed8(1_000_000_000), dec!(10.00000000));
    }

    #[test]
    fn sub_resolution_amounts_are_rejected() {
        assert!(matches!(
            to_fixed8(dec!(0.000000001)),
            Err(ExchangeError::InvalidUsage(_))
        ));
    }

    #[test]
    fn status_strings_map_to_snapshot_statuses() {
        assert_eq!(adapt_status("Placed"), OrderStatus::New);
        assert_eq!(adapt_status("Partially Matched"), OrderStatus::PartiallyFilled);
        assert_eq!(adapt_status("Fully Matched"), OrderStatus::Filled);
        assert_eq!(adapt_status("Partially Cancelled"), OrderStatus::Canceled);
        assert_eq!(adapt_status("Error"), OrderStatus::Unknown);
    }

    #[test]
    fn order_detail_becomes_limit_order_snapshot() {
        let detail = BtcMarketsOrderDetail {
            id: 12345,
            currency: "AUD".into(),
            instrument: "BTC".into(),
            order_side: BtcMarketsSide::Ask,
            order_kind: BtcMarketsOrderKind::Limit,
            creation_time: 1_234_567_890_000,
            status: Some("Partially Matched".into()),
            price: Some(2_000_000_000),
            volume: 1_000_000_000,
            open_volume: Some(500_000_000),
        };

        let order = adapt_order(&detail).unwrap();
        match order {
            Order::Limit(limit) => {
                assert_eq!(limit.id.as_deref(), Some("12345"));
                assert_eq!(limit.pair, CurrencyPair::btc_aud());
                assert_eq!(limit.amount, dec!(10));
                assert_eq!(limit.limit_price, dec!(20));
                assert_eq!(limit.status, Some(OrderStatus::PartiallyFilled));
            }
            Order::Market(_) => panic!("expected a limit order"),
        }
    }

    #[test]
    fn trade_row_becomes_user_trade() {
        let row = BtcMarketsUserTrade {
            id: 45118157,
            creation_time: 1_234_567_890_000,
            description: None,
            price: 2_000_000_000,
            volume: 1_000_000_000,
            side: BtcMarketsSide::Bid,
            fee: Some(100_000),
            order_id: 12345,
        };

        let trade = adapt_trade(&row, &CurrencyPair::btc_aud()).unwrap();
        assert_eq!(trade.order_type, OrderType::Bid);
        assert_eq!(trade.amount, dec!(10));
        assert_eq!(trade.price, dec!(20));
        assert_eq!(trade.id, "45118157");
        assert_eq!(trade.order_id, "12345");
        assert_eq!(trade.timestamp.timestamp_millis(), 1_234_567_890_000);
    }
}
