use thiserror::Error;

/// Error taxonomy shared by every exchange client.
///
/// `Exchange` carries the exchange's own failure message (success flag false),
/// `NotAvailable` marks operations an exchange permanently does not offer, and
/// `InvalidUsage` is raised before any network call when the supplied
/// parameters cannot produce a valid request. None of these are retried here.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("exchange rejected request: {0}")]
    Exchange(String),

    #[error("not available on this exchange: {0}")]
    NotAvailable(&'static str),

    #[error("invalid usage: {0}")]
    InvalidUsage(String),

    #[error("malformed exchange response: {0}")]
    Malformed(String),

    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ExchangeError {
    /// True when retrying the identical call can never succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ExchangeError::NotAvailable(_) | ExchangeError::InvalidUsage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_errors_are_distinguishable_from_transient() {
        assert!(ExchangeError::NotAvailable("market orders").is_permanent());
        assert!(ExchangeError::InvalidUsage("order id required".into()).is_permanent());
        assert!(!ExchangeError::Exchange("insufficient funds".into()).is_permanent());
        assert!(!ExchangeError::Malformed("bad json".into()).is_permanent());
    }
}
