mod credentials;
mod currency;
mod error;
mod exchange;
mod nonce;
mod order;
mod params;
mod trade;

pub use credentials::Credentials;
pub use currency::{Currency, CurrencyPair};
pub use error::ExchangeError;
pub use exchange::ExchangeId;
pub use nonce::NonceFactory;
pub use order::{LimitOrder, MarketOrder, Order, OrderStatus, OrderType};
pub use params::{CancelOrderParams, OpenOrdersParams, SortOrder, TradeHistoryParams};
pub use trade::{TradeSortKey, UserTrade, UserTrades};
