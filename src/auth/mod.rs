//! Authentication module for KuCoin API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Millisecond timestamps for request signing
//! - HMAC-SHA256 signatures for authenticated requests

mod credentials;
mod signature;
mod timestamp;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use signature::{sign_passphrase, sign_request};
pub use timestamp::{MonotonicTimestamp, TimestampProvider};
