use chrono::{DateTime, Utc};

use crate::CurrencyPair;

/// Requested order of trade-history results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Trade-history query capabilities. Every field is optional: an unset field
/// means the corresponding filter is omitted from the outbound request, except
/// where an exchange requires a value and substitutes its documented default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeHistoryParams {
    pub pair: Option<CurrencyPair>,
    pub page_length: Option<u32>,
    pub offset: Option<u64>,
    pub start_id: Option<String>,
    pub end_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub sort: Option<SortOrder>,
}

impl TradeHistoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pair(mut self, pair: CurrencyPair) -> Self {
        self.pair = Some(pair);
        self
    }

    pub fn page_length(mut self, limit: u32) -> Self {
        self.page_length = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn id_span(mut self, start_id: Option<&str>, end_id: Option<&str>) -> Self {
        self.start_id = start_id.map(str::to_string);
        self.end_id = end_id.map(str::to_string);
        self
    }

    pub fn time_span(
        mut self,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// Open-orders query. Both exchanges here require a market, so the pair is
/// effectively mandatory; it stays optional so callers get an explicit
/// invalid-usage error instead of a silent default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenOrdersParams {
    pub pair: Option<CurrencyPair>,
}

impl OpenOrdersParams {
    pub fn for_pair(pair: CurrencyPair) -> Self {
        Self { pair: Some(pair) }
    }
}

/// Cancel-order parameters. An absent id is caller misuse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancelOrderParams {
    pub order_id: Option<String>,
}

impl CancelOrderParams {
    pub fn by_id(order_id: &str) -> Self {
        Self {
            order_id: Some(order_id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn default_params_satisfy_no_capabilities() {
        let params = TradeHistoryParams::new();
        assert!(params.pair.is_none());
        assert!(params.page_length.is_none());
        assert!(params.offset.is_none());
        assert!(params.start_id.is_none());
        assert!(params.end_id.is_none());
        assert!(params.start_time.is_none());
        assert!(params.end_time.is_none());
        assert!(params.sort.is_none());
    }

    #[test]
    fn builder_sets_only_requested_capabilities() {
        let since = Utc.timestamp_opt(1_500_000_000, 0).single().unwrap();
        let params = TradeHistoryParams::new()
            .pair(CurrencyPair::btc_usd())
            .time_span(Some(since), None);

        assert_eq!(params.pair, Some(CurrencyPair::btc_usd()));
        assert_eq!(params.start_time, Some(since));
        assert!(params.end_time.is_none());
        assert!(params.start_id.is_none());
        assert!(params.offset.is_none());
    }
}
