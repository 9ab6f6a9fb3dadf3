use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper-case currency code (e.g. "BTC", "AUD").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Self {
        Self(code.to_uppercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Ordered (base, counter) pair of currencies. Exchange adapters translate
/// between this and the exchange's native market-symbol string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub counter: Currency,
}

impl CurrencyPair {
    pub fn new(base: &str, counter: &str) -> Self {
        Self {
            base: Currency::new(base),
            counter: Currency::new(counter),
        }
    }

    pub fn btc_aud() -> Self {
        Self::new("BTC", "AUD")
    }

    pub fn btc_usd() -> Self {
        Self::new("BTC", "USD")
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_codes_are_normalized_to_uppercase() {
        assert_eq!(Currency::new("btc").code(), "BTC");
        assert_eq!(Currency::from("Aud").code(), "AUD");
    }

    #[test]
    fn pair_display_uses_slash() {
        assert_eq!(CurrencyPair::btc_aud().to_string(), "BTC/AUD");
        assert_eq!(CurrencyPair::new("eth", "usd").to_string(), "ETH/USD");
    }
}
