//! Error types for the KuCoin margin client library.

use thiserror::Error;

/// The main error type for all KuCoin client operations.
#[derive(Error, Debug)]
pub enum KucoinError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error, from a malformed base URL
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// KuCoin API rejected the request
    #[error("KuCoin API error: {0}")]
    Api(ApiError),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Message returned by the exchange
        message: String,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A parameter was rejected before any request was sent
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// The caller cancelled the operation before it completed
    #[error("Operation cancelled")]
    Cancelled,

    /// Missing required credentials
    #[error("Missing credentials: API key, secret and passphrase required for private endpoints")]
    MissingCredentials,
}

/// Coarse classification of a [`KucoinError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request could not be delivered or the reply could not be read.
    Transport,
    /// The exchange answered with a rejection or an unusable payload.
    Remote,
    /// The request was refused locally before anything was sent.
    Local,
    /// The caller cancelled the operation.
    Cancelled,
}

impl KucoinError {
    /// Build an [`KucoinError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            KucoinError::Http(_) | KucoinError::HttpMiddleware(_) | KucoinError::Timeout => {
                ErrorCategory::Transport
            }
            KucoinError::Api(_)
            | KucoinError::RateLimitExceeded { .. }
            | KucoinError::InvalidResponse(_) => ErrorCategory::Remote,
            KucoinError::Json(_)
            | KucoinError::Url(_)
            | KucoinError::Auth(_)
            | KucoinError::InvalidParameter { .. }
            | KucoinError::MissingCredentials => ErrorCategory::Local,
            KucoinError::Cancelled => ErrorCategory::Cancelled,
        }
    }

    /// Check if the operation was cancelled by the caller.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, KucoinError::Cancelled)
    }

    /// The API error, if the exchange rejected the request.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            KucoinError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// KuCoin API error codes and messages.
///
/// These are errors returned by the KuCoin API itself in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response, when one was received
    pub http_status: Option<u16>,
    /// The error code from KuCoin (e.g., "400100")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.http_status {
            Some(status) => write!(f, "[HTTP {}] {}: {}", status, self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            http_status: None,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Attach the HTTP status the error arrived with.
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        self.code == error_codes::RATE_LIMIT_EXCEEDED || self.http_status == Some(429)
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == error_codes::INVALID_SIGNATURE
    }

    /// Check if this is an invalid key or passphrase error.
    pub fn is_invalid_key(&self) -> bool {
        self.code == error_codes::INVALID_API_KEY || self.code == error_codes::INVALID_PASSPHRASE
    }

    /// Check if the account lacks funds for the operation.
    pub fn is_insufficient_balance(&self) -> bool {
        self.code == error_codes::INSUFFICIENT_BALANCE
    }

    /// Check if the request parameters were rejected.
    pub fn is_invalid_parameter(&self) -> bool {
        self.code == error_codes::INVALID_PARAMETER
    }

    /// Check if the API key lacks the required permission.
    pub fn is_permission_denied(&self) -> bool {
        self.code == error_codes::PERMISSION_DENIED
    }
}

/// Known KuCoin error codes for pattern matching.
pub mod error_codes {
    /// Success code carried by every accepted response.
    pub const SUCCESS: &str = "200000";

    /// Request errors
    pub const INVALID_PARAMETER: &str = "400100";
    pub const INSUFFICIENT_BALANCE: &str = "200004";

    /// Authentication errors
    pub const MISSING_HEADERS: &str = "400001";
    pub const INVALID_TIMESTAMP: &str = "400002";
    pub const INVALID_API_KEY: &str = "400003";
    pub const INVALID_PASSPHRASE: &str = "400004";
    pub const INVALID_SIGNATURE: &str = "400005";
    pub const IP_NOT_WHITELISTED: &str = "400006";
    pub const PERMISSION_DENIED: &str = "400007";

    /// Rate limiting
    pub const RATE_LIMIT_EXCEEDED: &str = "429000";

    /// Server errors
    pub const INTERNAL_ERROR: &str = "500000";
}
