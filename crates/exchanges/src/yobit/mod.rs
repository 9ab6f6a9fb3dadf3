use std::env;

use hmac::{Hmac, Mac};
use sha2::Sha512;
use tracing::info;

use interface::{Credentials, ExchangeError, NonceFactory};

pub mod adapter;
pub mod dto;
pub mod trade;

pub const BASE_URL: &str = "https://yobit.net/tapi";

type HmacSha512 = Hmac<Sha512>;

/// YoBit trade-API client.
pub struct YoBitClient {
    pub(crate) http: reqwest::Client,
    pub(crate) credentials: Credentials,
    pub(crate) nonce: NonceFactory,
}

impl YoBitClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            nonce: NonceFactory::new(),
        }
    }

    /// Credentials from YOBIT_API_KEY / YOBIT_API_SECRET.
    pub fn with_credentials() -> Result<Self, ExchangeError> {
        Ok(Self::new(get_api_credentials()?))
    }

    /// Signed POST of a form-encoded method call. `fields` must not contain
    /// `method` or `nonce`; both are appended here.
    pub(crate) async fn post_signed(
        &self,
        method: &str,
        fields: &[(&str, String)],
    ) -> Result<dto::YoBitResponse, ExchangeError> {
        let nonce = self.nonce.next();
        let mut body = format!("method={}&nonce={}", method, nonce);
        for (key, value) in fields {
            body.push_str(&format!("&{}={}", key, value));
        }
        let signature = generate_signature(&body, &self.credentials.api_secret)?;

        info!("POST {} method {} nonce {}", BASE_URL, method, nonce);

        let response = self
            .http
            .post(BASE_URL)
            .header("Key", &self.credentials.api_key)
            .header("Sign", signature)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ExchangeError::Exchange(format!(
                "YoBit HTTP error: status {}, response: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            ExchangeError::Malformed(format!(
                "failed to parse YoBit response: {}, payload: {}",
                e,
                text.chars().take(200).collect::<String>()
            ))
        })
    }
}

/// YoBit authentication digest: hex HMAC-SHA512 of the form-encoded body.
pub fn generate_signature(body: &str, api_secret: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha512::new_from_slice(api_secret.as_bytes())
        .map_err(|e| ExchangeError::InvalidUsage(format!("unusable HMAC key: {}", e)))?;
    mac.update(body.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// API credentials from environment variables.
pub fn get_api_credentials() -> Result<Credentials, ExchangeError> {
    Credentials::from_env("YOBIT_API_KEY", "YOBIT_API_SECRET")
}

pub fn has_api_credentials() -> bool {
    env::var("YOBIT_API_KEY").is_ok() && env::var("YOBIT_API_SECRET").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_deterministic() {
        let a = generate_signature("method=Trade&nonce=1", "secret").unwrap();
        let b = generate_signature("method=Trade&nonce=1", "secret").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signature_changes_with_nonce() {
        let a = generate_signature("method=Trade&nonce=1", "secret").unwrap();
        let b = generate_signature("method=Trade&nonce=2", "secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn signature_is_hex_of_sha512_width() {
        let sig =
            generate_signature("method=ActiveOrders&nonce=7&pair=btc_usd", "secret").unwrap();
        // 64 raw bytes -> 128 hex chars
        assert_eq!(sig.len(), 128);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
