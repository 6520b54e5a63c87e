//! The transport abstraction used by endpoint bindings.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::KucoinError;
use crate::rest::{RawResponse, RestRequest};

/// Executes [`RestRequest`]s against the exchange.
///
/// This trait enables:
/// - Mock implementations for testing
/// - Decorators (e.g., request recording or throttling)
/// - Alternative HTTP stacks
///
/// Implementations must resolve with [`KucoinError::Cancelled`] once `cancel`
/// fires, without waiting for the remote reply. Transport failures are errors;
/// any HTTP reply, including error statuses, is returned as a [`RawResponse`].
pub trait Transport: Send + Sync {
    /// Execute a single request. No retries beyond the transport's own policy.
    fn execute(
        &self,
        request: RestRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<RawResponse, KucoinError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(
        &self,
        request: RestRequest,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<RawResponse, KucoinError>> + Send {
        self.as_ref().execute(request, cancel)
    }
}
