//! KuCoin spot account APIs.
//!
//! - [`margin`] - cross and isolated margin borrowing, repayment and lending

pub mod margin;

pub use margin::MarginClient;
