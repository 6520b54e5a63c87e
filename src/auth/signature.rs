//! HMAC-SHA256 signature generation for KuCoin API authentication.
//!
//! KuCoin private endpoints require a signature computed as:
//! ```text
//! base64(HMAC-SHA256(timestamp + METHOD + endpoint + body, api_secret))
//! ```
//!
//! where `endpoint` includes the query string for GET requests. The signature is
//! sent in the `KC-API-SIGN` header. With key version 2 the passphrase is also
//! signed with the secret and sent in `KC-API-PASSPHRASE`.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::KucoinError;

type HmacSha256 = Hmac<Sha256>;

fn hmac_base64(secret: &str, message: &[u8]) -> Result<String, KucoinError> {
    let mut hmac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| KucoinError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(message);
    Ok(BASE64.encode(hmac.finalize().into_bytes()))
}

/// Sign a request for KuCoin's private API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `timestamp_ms` - The value sent in `KC-API-TIMESTAMP`
/// * `method` - Upper-case HTTP method
/// * `endpoint` - Path plus query string (e.g., "/api/v3/margin/borrow?currency=BTC")
/// * `body` - The JSON body (empty string for GET requests)
///
/// # Example
///
/// ```rust
/// use kucoin_margin_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret", "passphrase");
/// let signature = sign_request(
///     &credentials,
///     1_700_000_000_000,
///     "POST",
///     "/api/v3/margin/borrow",
///     r#"{"currency":"USDT","size":"10","timeInForce":"IOC"}"#,
/// )?;
/// assert_eq!(signature.len(), 44);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    timestamp_ms: u64,
    method: &str,
    endpoint: &str,
    body: &str,
) -> Result<String, KucoinError> {
    let message = format!("{}{}{}{}", timestamp_ms, method, endpoint, body);
    hmac_base64(credentials.expose_secret(), message.as_bytes())
}

/// Sign the passphrase for the `KC-API-PASSPHRASE` header (key version 2).
pub fn sign_passphrase(credentials: &Credentials) -> Result<String, KucoinError> {
    hmac_base64(
        credentials.expose_secret(),
        credentials.expose_passphrase().as_bytes(),
    )
}
