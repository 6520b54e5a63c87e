//! Decoding of KuCoin's `{code, msg, data}` response envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, KucoinError, error_codes};

/// Raw reply produced by a [`Transport`](crate::rest::Transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as received.
    pub body: String,
}

impl RawResponse {
    /// Create a raw response from a status and a body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check if the HTTP status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Internal response wrapper for KuCoin API responses.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: Value,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Decode a response whose `data` field carries the payload.
///
/// A missing or `null` payload is an error, never a default value.
pub fn decode<T>(raw: &RawResponse) -> Result<T, KucoinError>
where
    T: DeserializeOwned,
{
    match open_envelope(raw)? {
        None | Some(Value::Null) => Err(KucoinError::InvalidResponse(
            "Response missing 'data' field".to_string(),
        )),
        Some(data) => serde_json::from_value(data).map_err(|e| {
            tracing::warn!(error = %e, "failed to decode KuCoin payload");
            KucoinError::InvalidResponse(format!(
                "Failed to parse response: {}. Body: {}",
                e, raw.body
            ))
        }),
    }
}

/// Decode a response that carries no payload.
pub fn decode_empty(raw: &RawResponse) -> Result<(), KucoinError> {
    open_envelope(raw).map(|_| ())
}

fn open_envelope(raw: &RawResponse) -> Result<Option<Value>, KucoinError> {
    let envelope: Envelope = match serde_json::from_str(&raw.body) {
        Ok(envelope) => envelope,
        Err(e) if raw.is_success() => {
            return Err(KucoinError::InvalidResponse(format!(
                "Failed to parse response: {}. Body: {}",
                e, raw.body
            )));
        }
        Err(_) => {
            return Err(KucoinError::Api(
                ApiError::new(raw.status.to_string(), raw.body.clone()).with_status(raw.status),
            ));
        }
    };

    let code = match envelope.code {
        Value::String(code) => code,
        other => other.to_string(),
    };

    if code != error_codes::SUCCESS {
        let api_error = ApiError::new(code, envelope.msg.unwrap_or_default()).with_status(raw.status);
        if api_error.is_rate_limit() {
            return Err(KucoinError::RateLimitExceeded {
                message: api_error.message,
            });
        }
        return Err(KucoinError::Api(api_error));
    }

    if !raw.is_success() {
        return Err(KucoinError::Api(
            ApiError::new(code, format!("HTTP {}", raw.status)).with_status(raw.status),
        ));
    }

    Ok(envelope.data)
}
