use std::env;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha512;
use tracing::info;

use interface::{Credentials, CurrencyPair, ExchangeError, NonceFactory};

pub mod adapter;
pub mod dto;
pub mod trade;

pub const BASE_URL: &str = "https://api.btcmarkets.net";

type HmacSha512 = Hmac<Sha512>;

/// BTCMarkets private-API client.
pub struct BtcMarketsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) credentials: Credentials,
    pub(crate) nonce: NonceFactory,
    /// Market used when a query requires one and the caller left it unset.
    pub(crate) default_pair: CurrencyPair,
}

impl BtcMarketsClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_default_pair(credentials, CurrencyPair::btc_aud())
    }

    pub fn with_default_pair(credentials: Credentials, default_pair: CurrencyPair) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            nonce: NonceFactory::new(),
            default_pair,
        }
    }

    /// Credentials from BTCMARKETS_API_KEY / BTCMARKETS_API_SECRET.
    pub fn with_credentials() -> Result<Self, ExchangeError> {
        Ok(Self::new(get_api_credentials()?))
    }

    /// Signed POST. One call, one round trip; the caller owns retry policy.
    pub(crate) async fn post_signed<B, R>(&self, path: &str, body: &B) -> Result<R, ExchangeError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body_json = serde_json::to_string(body)
            .map_err(|e| ExchangeError::Malformed(format!("failed to encode request: {}", e)))?;
        let nonce = self.nonce.next();
        let signature = generate_signature(path, nonce, &body_json, &self.credentials.api_secret)?;
        let url = format!("{}{}", BASE_URL, path);

        info!("POST {} nonce {}", url, nonce);

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .header("Accept-Charset", "UTF-8")
            .header("Content-Type", "application/json")
            .header("apikey", &self.credentials.api_key)
            .header("timestamp", nonce.to_string())
            .header("signature", signature)
            .body(body_json)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ExchangeError::Exchange(format!(
                "BTCMarkets HTTP error: status {}, response: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            ExchangeError::Malformed(format!(
                "failed to parse BTCMarkets response: {}, payload: {}",
                e,
                text.chars().take(200).collect::<String>()
            ))
        })
    }
}

/// BTCMarkets authentication digest: Base64(HMAC-SHA512(key, payload)) where
/// the key is the Base64-decoded API secret (BTCMarkets hands secrets out
/// Base64-encoded) and the payload is `path \n nonce \n body`.
pub fn generate_signature(
    path: &str,
    nonce: u64,
    body: &str,
    api_secret: &str,
) -> Result<String, ExchangeError> {
    let key = BASE64.decode(api_secret).map_err(|e| {
        ExchangeError::InvalidUsage(format!("BTCMarkets API secret is not valid base64: {}", e))
    })?;
    let payload = format!("{}\n{}\n{}", path, nonce, body);
    let mut mac = HmacSha512::new_from_slice(&key)
        .map_err(|e| ExchangeError::InvalidUsage(format!("unusable HMAC key: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// API credentials from environment variables.
pub fn get_api_credentials() -> Result<Credentials, ExchangeError> {
    Credentials::from_env("BTCMARKETS_API_KEY", "BTCMARKETS_API_SECRET")
}

pub fn has_api_credentials() -> bool {
    env::var("BTCMARKETS_API_KEY").is_ok() && env::var("BTCMARKETS_API_SECRET").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_secret() -> String {
        BASE64.encode(b"super secret key")
    }

    #[test]
    fn signature_is_deterministic() {
        let secret = test_secret();
        let a = generate_signature("/order/create", 1234567890, "{}", &secret).unwrap();
        let b = generate_signature("/order/create", 1234567890, "{}", &secret).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn signature_changes_with_nonce() {
        let secret = test_secret();
        let a = generate_signature("/order/create", 1, "{}", &secret).unwrap();
        let b = generate_signature("/order/create", 2, "{}", &secret).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn signature_is_base64_of_sha512_width() {
        let secret = test_secret();
        let sig = generate_signature("/order/open", 42, "", &secret).unwrap();
        // 64 raw bytes -> 88 base64 chars including padding
        assert_eq!(sig.len(), 88);
        assert!(BASE64.decode(&sig).is_ok());
    }

    #[test]
    fn invalid_secret_is_reported_before_any_network_call() {
        let err = generate_signature("/order/create", 1, "{}", "not base64 !!!").unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidUsage(_)));
    }
}
