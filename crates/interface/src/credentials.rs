use std::env;

use crate::ExchangeError;

/// API key/secret pair for one exchange account.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }
    }

    /// Load from environment variables, e.g.
    /// `Credentials::from_env("BTCMARKETS_API_KEY", "BTCMARKETS_API_SECRET")`.
    pub fn from_env(key_var: &str, secret_var: &str) -> Result<Self, ExchangeError> {
        let api_key = env::var(key_var)
            .map_err(|_| ExchangeError::InvalidUsage(format!("{} not set", key_var)))?;
        let api_secret = env::var(secret_var)
            .map_err(|_| ExchangeError::InvalidUsage(format!("{} not set", secret_var)))?;
        Ok(Self {
            api_key,
            api_secret,
        })
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_secrets() {
        let creds = Credentials::new("key-1234", "secret-5678");
        let printed = format!("{:?}", creds);
        assert!(!printed.contains("key-1234"));
        assert!(!printed.contains("secret-5678"));
    }
}
