//! YoBit response envelope. Every trade-API method answers
//! `{"success": 1|0, "return": {...}, "error": "..."}`; the shape under
//! `return` differs per method, so it stays a keyed map of raw values and the
//! adapter gives it a type.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct YoBitResponse {
    #[serde(default)]
    pub success: u8,
    #[serde(rename = "return", default)]
    pub return_data: Option<HashMap<String, Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl YoBitResponse {
    pub fn is_success(&self) -> bool {
        self.success == 1
    }

    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "unspecified YoBit error".to_string())
    }
}
