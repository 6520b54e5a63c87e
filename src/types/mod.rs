//! Common types used across the KuCoin margin client library.

pub mod common;
pub mod paginated;
pub mod serde_helpers;

pub use common::*;
pub use paginated::Paginated;
