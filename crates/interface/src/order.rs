use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CurrencyPair;

/// Side of an order: Bid buys the base currency, Ask sells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Bid,
    Ask,
}

/// Point-in-time status reported by an exchange. Orders are snapshotted per
/// call; no lifecycle is tracked on this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    New,
    PartiallyFilled,
    Filled,
    Canceled,
    Unknown,
}

/// Market order: executes at whatever price the exchange matches.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketOrder {
    pub order_type: OrderType,
    pub amount: Decimal,
    pub pair: CurrencyPair,
    /// Assigned by the exchange on placement; absent before.
    pub id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl MarketOrder {
    pub fn new(order_type: OrderType, amount: Decimal, pair: CurrencyPair) -> Self {
        Self {
            order_type,
            amount,
            pair,
            id: None,
            timestamp: None,
        }
    }
}

/// Limit order: executes at `limit_price` or better.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitOrder {
    pub order_type: OrderType,
    pub amount: Decimal,
    pub pair: CurrencyPair,
    pub limit_price: Decimal,
    pub id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub status: Option<OrderStatus>,
}

impl LimitOrder {
    pub fn new(
        order_type: OrderType,
        amount: Decimal,
        pair: CurrencyPair,
        limit_price: Decimal,
    ) -> Self {
        Self {
            order_type,
            amount,
            pair,
            limit_price,
            id: None,
            timestamp: None,
            status: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

/// Either kind of order, as returned by id lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum Order {
    Limit(LimitOrder),
    Market(MarketOrder),
}

impl Order {
    pub fn id(&self) -> Option<&str> {
        match self {
            Order::Limit(o) => o.id.as_deref(),
            Order::Market(o) => o.id.as_deref(),
        }
    }

    pub fn pair(&self) -> &CurrencyPair {
        match self {
            Order::Limit(o) => &o.pair,
            Order::Market(o) => &o.pair,
        }
    }
}
