//! REST transport for the KuCoin API.
//!
//! The [`Transport`] trait is the seam between endpoint bindings and HTTP.
//! [`KucoinRestClient`] is the production implementation: it signs requests,
//! traces them, and retries transient failures of `GET` requests.
//!
//! ```rust,ignore
//! use kucoin_margin_client::rest::{RestRequest, Transport, decode};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn fetch<T: Transport>(transport: &T) -> kucoin_margin_client::Result<()> {
//!     let raw = transport
//!         .execute(RestRequest::get("/api/v1/margin/config"), &CancellationToken::new())
//!         .await?;
//!     let config: serde_json::Value = decode(&raw)?;
//!     println!("{config}");
//!     Ok(())
//! }
//! ```

mod client;
pub mod endpoints;
mod request;
mod response;
mod transport;

pub use client::{KucoinRestClient, KucoinRestClientBuilder};
pub use endpoints::KUCOIN_BASE_URL;
pub use request::RestRequest;
pub use response::{RawResponse, decode, decode_empty};
pub use transport::Transport;
