//! # KuCoin Margin Client
//!
//! An async Rust client library for the KuCoin spot margin REST API.
//!
//! ## Features
//!
//! - Borrow and repay on cross and isolated margin accounts
//! - Borrow, repay and interest history with pagination
//! - Lending market subscriptions, redemptions and rate edits
//! - Risk limit and margin configuration queries
//! - Cancellation of in-flight calls through [`CancellationToken`]
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kucoin_margin_client::auth::EnvCredentials;
//! use kucoin_margin_client::rest::KucoinRestClient;
//! use kucoin_margin_client::{CancellationToken, KucoinError};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KucoinRestClient::builder()
//!         .credentials(Arc::new(
//!             EnvCredentials::try_from_env().ok_or(KucoinError::MissingCredentials)?,
//!         ))
//!         .build();
//!
//!     let cancel = CancellationToken::new();
//!     let assets = client.margin().get_lending_assets(&Default::default(), &cancel).await?;
//!     for asset in assets {
//!         println!("{}: {:?}", asset.asset, asset.market_interest_rate);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod spot;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ErrorCategory, KucoinError};
pub use tokio_util::sync::CancellationToken;
pub use types::common::{BorrowStatus, LendingOrderStatus, TimeInForce};

/// Result type alias using KucoinError
pub type Result<T> = std::result::Result<T, KucoinError>;
