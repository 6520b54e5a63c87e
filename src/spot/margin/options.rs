//! Optional parameters of the margin and lending endpoints.
//!
//! Every field defaults to `None`, in which case the parameter is left off the
//! request and the exchange applies its own default.

use serde::Serialize;
use serde_with::{TimestampMilliSeconds, serde_as};
use time::OffsetDateTime;

use crate::error::KucoinError;

/// Options of [`borrow`](super::MarginClient::borrow) and
/// [`repay`](super::MarginClient::repay).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowOptions {
    /// `true` for isolated margin, `false` for cross margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_isolated: Option<bool>,
    /// Isolated margin symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// Options of [`repay`](super::MarginClient::repay).
pub type RepayOptions = BorrowOptions;

impl BorrowOptions {
    /// Options targeting the isolated margin account of `symbol`.
    pub fn isolated(symbol: impl Into<String>) -> Self {
        Self {
            is_isolated: Some(true),
            symbol: Some(symbol.into()),
        }
    }

    /// Options targeting the cross margin account.
    pub fn cross() -> Self {
        Self {
            is_isolated: Some(false),
            symbol: None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), KucoinError> {
        check_optional_non_empty("symbol", self.symbol.as_deref())
    }
}

/// Options of the borrow and repay history queries.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryOptions {
    /// `true` for isolated margin, `false` for cross margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_isolated: Option<bool>,
    /// Isolated margin symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Restrict to a single order.
    #[serde(rename = "orderNo", skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Earliest creation time.
    #[serde_as(as = "Option<TimestampMilliSeconds<i64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<OffsetDateTime>,
    /// Latest creation time.
    #[serde_as(as = "Option<TimestampMilliSeconds<i64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<OffsetDateTime>,
    /// Page number, starting at 1.
    #[serde(rename = "currentPage", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl HistoryOptions {
    pub(crate) fn validate(&self) -> Result<(), KucoinError> {
        check_optional_non_empty("symbol", self.symbol.as_deref())?;
        check_optional_non_empty("order_id", self.order_id.as_deref())?;
        check_page("page", self.page)?;
        check_page("page_size", self.page_size)
    }
}

/// Options of the margin interest history query.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestHistoryOptions {
    /// `true` for isolated margin, `false` for cross margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_isolated: Option<bool>,
    /// Isolated margin symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Earliest charge time.
    #[serde_as(as = "Option<TimestampMilliSeconds<i64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<OffsetDateTime>,
    /// Latest charge time.
    #[serde_as(as = "Option<TimestampMilliSeconds<i64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<OffsetDateTime>,
    /// Page number, starting at 1.
    #[serde(rename = "currentPage", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl InterestHistoryOptions {
    pub(crate) fn validate(&self) -> Result<(), KucoinError> {
        check_optional_non_empty("symbol", self.symbol.as_deref())?;
        check_page("page", self.page)?;
        check_page("page_size", self.page_size)
    }
}

/// Options of the lending asset query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LendingAssetsOptions {
    /// Restrict to a single asset.
    #[serde(rename = "currency", skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

impl LendingAssetsOptions {
    pub(crate) fn validate(&self) -> Result<(), KucoinError> {
        check_optional_non_empty("asset", self.asset.as_deref())
    }
}

/// Options of the redemption order query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionOrdersOptions {
    /// Restrict to a single redemption order.
    #[serde(rename = "redeemOrderNo", skip_serializing_if = "Option::is_none")]
    pub redeem_order_id: Option<String>,
    /// Page number, starting at 1.
    #[serde(rename = "currentPage", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl RedemptionOrdersOptions {
    pub(crate) fn validate(&self) -> Result<(), KucoinError> {
        check_optional_non_empty("redeem_order_id", self.redeem_order_id.as_deref())?;
        check_page("page", self.page)?;
        check_page("page_size", self.page_size)
    }
}

/// Options of the subscription order query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionOrdersOptions {
    /// Restrict to a single subscription order.
    #[serde(rename = "purchaseOrderNo", skip_serializing_if = "Option::is_none")]
    pub subscribe_order_id: Option<String>,
    /// Page number, starting at 1.
    #[serde(rename = "currentPage", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SubscriptionOrdersOptions {
    pub(crate) fn validate(&self) -> Result<(), KucoinError> {
        check_optional_non_empty("subscribe_order_id", self.subscribe_order_id.as_deref())?;
        check_page("page", self.page)?;
        check_page("page_size", self.page_size)
    }
}

/// Reject empty or whitespace-only required strings.
pub(crate) fn check_non_empty(name: &'static str, value: &str) -> Result<(), KucoinError> {
    if value.trim().is_empty() {
        return Err(KucoinError::invalid_parameter(name, "must not be empty"));
    }
    Ok(())
}

/// Reject values that are not a single plain URL path segment.
///
/// Symbols are spliced into the request path, so only ASCII letters, digits,
/// `-` and `_` are accepted.
pub(crate) fn check_path_segment(name: &'static str, value: &str) -> Result<(), KucoinError> {
    check_non_empty(name, value)?;
    if let Some(c) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(KucoinError::invalid_parameter(
            name,
            format!("unexpected character {c:?} in path segment"),
        ));
    }
    Ok(())
}

fn check_optional_non_empty(name: &'static str, value: Option<&str>) -> Result<(), KucoinError> {
    value.map_or(Ok(()), |value| check_non_empty(name, value))
}

fn check_page(name: &'static str, value: Option<u32>) -> Result<(), KucoinError> {
    match value {
        Some(0) => Err(KucoinError::invalid_parameter(name, "must be at least 1")),
        _ => Ok(()),
    }
}
