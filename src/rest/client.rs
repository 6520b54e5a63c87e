//! KuCoin REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest::{Method, StatusCode};
use reqwest_retry::{
    RetryError, RetryTransientMiddleware, Retryable, RetryableStrategy, default_on_request_failure,
    default_on_request_success, policies::ExponentialBackoff,
};
use reqwest_tracing::TracingMiddleware;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::auth::{
    CredentialsProvider, MonotonicTimestamp, TimestampProvider, sign_passphrase, sign_request,
};
use crate::error::KucoinError;
use crate::rest::endpoints::KUCOIN_BASE_URL;
use crate::rest::{RawResponse, RestRequest, Transport};
use crate::spot::margin::MarginClient;

/// Value of the `KC-API-KEY-VERSION` header; version 2 signs the passphrase.
const API_KEY_VERSION: &str = "2";

/// The KuCoin REST API client.
///
/// This is the default [`Transport`]. It handles authentication, request
/// tracing, and automatic retries of transient failures. Only `GET` requests
/// are retried; every other method is sent exactly once.
///
/// # Example
///
/// ```rust,no_run
/// use kucoin_margin_client::auth::StaticCredentials;
/// use kucoin_margin_client::rest::KucoinRestClient;
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret", "passphrase"));
///     let client = KucoinRestClient::builder()
///         .credentials(credentials)
///         .build();
///
///     let config = client
///         .margin()
///         .get_margin_configuration(&CancellationToken::new())
///         .await?;
///     println!("Max leverage: {}", config.max_leverage);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KucoinRestClient {
    http_client: ClientWithMiddleware,
    send_once_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    timestamp_provider: Arc<dyn TimestampProvider>,
}

impl KucoinRestClient {
    /// Create a new client with default settings.
    ///
    /// This client has no credentials, so authenticated endpoints fail with
    /// [`KucoinError::MissingCredentials`].
    /// Use [`KucoinRestClient::builder()`] to configure credentials.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> KucoinRestClientBuilder {
        KucoinRestClientBuilder::new()
    }

    /// Margin endpoint bindings backed by this client.
    pub fn margin(&self) -> MarginClient<KucoinRestClient> {
        MarginClient::new(self.clone())
    }

    /// Send a request and collect the raw reply.
    async fn send(&self, request: &RestRequest) -> Result<RawResponse, KucoinError> {
        let endpoint = request.endpoint()?;
        let body = request.body()?;
        let url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;

        let client = if request.method == Method::GET {
            &self.http_client
        } else {
            &self.send_once_client
        };
        let mut builder = client.request(request.method.clone(), url);

        if request.authenticated {
            let credentials = self
                .credentials
                .as_ref()
                .ok_or(KucoinError::MissingCredentials)?;
            let creds = credentials.get_credentials();
            let timestamp = self.timestamp_provider.timestamp_ms();

            let signature =
                sign_request(creds, timestamp, request.method.as_str(), &endpoint, &body)?;
            let passphrase = sign_passphrase(creds)?;

            builder = builder
                .header("KC-API-KEY", &creds.api_key)
                .header("KC-API-SIGN", signature)
                .header("KC-API-TIMESTAMP", timestamp.to_string())
                .header("KC-API-PASSPHRASE", passphrase)
                .header("KC-API-KEY-VERSION", API_KEY_VERSION);
        }

        if !body.is_empty() {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        tracing::debug!(method = %request.method, endpoint = %endpoint, "sending KuCoin request");

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        tracing::debug!(status, endpoint = %endpoint, "received KuCoin response");
        Ok(RawResponse { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> KucoinError {
    if e.is_timeout() {
        KucoinError::Timeout
    } else {
        KucoinError::Http(e)
    }
}

fn map_send_error(e: reqwest_middleware::Error) -> KucoinError {
    if is_timeout(&e) {
        return KucoinError::Timeout;
    }
    match e {
        reqwest_middleware::Error::Reqwest(e) => KucoinError::Http(e),
        other => KucoinError::HttpMiddleware(other),
    }
}

/// Look through the retry middleware's wrapper for a timed-out attempt.
fn is_timeout(e: &reqwest_middleware::Error) -> bool {
    match e {
        reqwest_middleware::Error::Reqwest(e) => e.is_timeout(),
        reqwest_middleware::Error::Middleware(e) => match e.downcast_ref::<RetryError>() {
            Some(RetryError::WithRetries { err, .. } | RetryError::Error(err)) => is_timeout(err),
            None => e
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout),
        },
    }
}

/// Transient failures are retried, except `429` which is reported at once.
struct KucoinRetryStrategy;

impl RetryableStrategy for KucoinRetryStrategy {
    fn handle(
        &self,
        res: &Result<reqwest::Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match res {
            Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => None,
            Ok(response) => default_on_request_success(response),
            Err(error) => default_on_request_failure(error),
        }
    }
}

impl Transport for KucoinRestClient {
    async fn execute(
        &self,
        request: RestRequest,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, KucoinError> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::warn!(path = %request.path, "KuCoin request cancelled");
                Err(KucoinError::Cancelled)
            }
            result = self.send(&request) => result,
        }
    }
}

impl Default for KucoinRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KucoinRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KucoinRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .finish()
    }
}

/// Builder for [`KucoinRestClient`].
pub struct KucoinRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
    user_agent: Option<String>,
    max_retries: u32,
    timeout: Option<Duration>,
}

impl KucoinRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KUCOIN_BASE_URL.to_string(),
            credentials: None,
            timestamp_provider: None,
            user_agent: None,
            max_retries: 3,
            timeout: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom timestamp provider.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the maximum number of retries of a `GET` request on transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set a timeout for each HTTP attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> KucoinRestClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("kucoin-margin-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("kucoin-margin-client"));
        headers.insert(USER_AGENT, header_value);

        // Build the HTTP client with middleware.
        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(self.max_retries);

        let client = ClientBuilder::new(reqwest_client.clone())
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                retry_policy,
                KucoinRetryStrategy,
            ))
            .build();

        // Resending a POST could open a second loan or subscription.
        let send_once_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let timestamp_provider = self
            .timestamp_provider
            .unwrap_or_else(|| Arc::new(MonotonicTimestamp::new()));

        KucoinRestClient {
            http_client: client,
            send_once_client,
            base_url: self.base_url,
            credentials: self.credentials,
            timestamp_provider,
        }
    }
}

impl Default for KucoinRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
