use serde::Serialize;
use serde_json::{Map, Value};
use std::time::SystemTime;

use super::constants::fields;
use super::error::ApiError;

/// System information as returned by the PBX; the shape is owned by the remote side
pub type SystemInfo = Map<String, Value>;

/// One configured extension on the PBX
pub type ExtensionRecord = Map<String, Value>;

/// Cached token information
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub access_token: String,
    /// `None` when the TTL runs past what `SystemTime` can represent
    pub expires_at: Option<SystemTime>,
}

/// Body of the token exchange request
#[derive(Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Check the errcode convention every PBX response follows.
///
/// Returns the full response object when errcode is 0.
pub fn check_errcode(body: Map<String, Value>) -> Result<Map<String, Value>, ApiError> {
    let code = body
        .get(fields::ERRCODE)
        .and_then(errcode_value)
        .ok_or_else(|| ApiError::Malformed("response has no errcode".to_string()))?;

    if code == 0 {
        return Ok(body);
    }

    let message = body
        .get(fields::ERRMSG)
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();

    Err(ApiError::Api { code, message })
}

/// errcode as an integer; an integral float such as `0.0` counts too
fn errcode_value(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}
