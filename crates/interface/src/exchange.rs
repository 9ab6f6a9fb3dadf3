use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one supported exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeId {
    BtcMarkets,
    YoBit,
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExchangeId::BtcMarkets => "btcmarkets",
            ExchangeId::YoBit => "yobit",
        };
        f.write_str(name)
    }
}
