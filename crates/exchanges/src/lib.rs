use async_trait::async_trait;

use interface::{
    CancelOrderParams, ExchangeError, ExchangeId, LimitOrder, MarketOrder, OpenOrdersParams,
    Order, TradeHistoryParams, UserTrades,
};

pub mod btcmarkets;
pub mod yobit;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the library (loads environment variables from .env file)
fn init() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
    });
}

// Automatically initialize when the library is loaded
#[ctor::ctor]
fn setup() {
    init();
}

/// Shared trading operations, implemented once per exchange.
///
/// Every operation issues exactly one network round trip (`orders_by_id` may
/// issue one per id where the exchange API is single-id). No retries, no
/// caching, no rate limiting happen at this layer.
#[async_trait]
pub trait TradeService: Send + Sync {
    fn id(&self) -> ExchangeId;

    /// Open orders for the market named in `params`. Both exchanges here can
    /// only list per market, so a missing pair is invalid usage.
    async fn open_orders(
        &self,
        params: &OpenOrdersParams,
    ) -> Result<Vec<LimitOrder>, ExchangeError>;

    /// Place a market order; returns the exchange-assigned order id.
    async fn place_market_order(&self, order: &MarketOrder) -> Result<String, ExchangeError>;

    /// Place a limit order; returns the exchange-assigned order id.
    async fn place_limit_order(&self, order: &LimitOrder) -> Result<String, ExchangeError>;

    /// Cancel by id. The returned bool is the exchange's verdict; a false
    /// success flag on the cancel itself maps to `Ok(false)`, not an error.
    async fn cancel_order(&self, params: &CancelOrderParams) -> Result<bool, ExchangeError>;

    /// Trade history narrowed by whichever capabilities are set in `params`.
    async fn trade_history(&self, params: &TradeHistoryParams)
        -> Result<UserTrades, ExchangeError>;

    /// Batch lookup. Ids the exchange returns no data for are skipped.
    async fn orders_by_id(&self, ids: &[&str]) -> Result<Vec<Order>, ExchangeError>;

    /// Empty parameter objects carrying this exchange's documented defaults.
    fn trade_history_params(&self) -> TradeHistoryParams;

    fn open_orders_params(&self) -> OpenOrdersParams;
}

// Convenience re-exports
pub use btcmarkets::BtcMarketsClient;
pub use yobit::YoBitClient;
