use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CurrencyPair, OrderType};

/// One executed trade belonging to the account. Immutable once built from an
/// exchange response.
#[derive(Debug, Clone, PartialEq)]
pub struct UserTrade {
    pub order_type: OrderType,
    pub amount: Decimal,
    pub pair: CurrencyPair,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
    pub id: String,
    pub order_id: String,
}

/// Sort key the trades are declared to follow. Declared for the caller's
/// benefit; exchanges that do not guarantee the order are not re-sorted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSortKey {
    SortedByTimestamp,
    SortedById,
    Unsorted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserTrades {
    pub trades: Vec<UserTrade>,
    pub sort_key: TradeSortKey,
}

impl UserTrades {
    pub fn sorted_by_timestamp(trades: Vec<UserTrade>) -> Self {
        Self {
            trades,
            sort_key: TradeSortKey::SortedByTimestamp,
        }
    }
}
