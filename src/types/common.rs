//! Common domain types for KuCoin margin API.

use serde::{Deserialize, Serialize};

/// Time in force for borrow orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Immediate or cancel - borrow what is available, cancel the rest
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Fill or kill - borrow the full amount or nothing
    #[serde(rename = "FOK")]
    FillOrKill,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeInForce::ImmediateOrCancel => write!(f, "IOC"),
            TimeInForce::FillOrKill => write!(f, "FOK"),
        }
    }
}

/// Status of a borrow or repay order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BorrowStatus {
    /// Being processed
    Pending,
    /// Completed
    Success,
    /// Rejected or failed
    Failed,
}

/// Status of a lending subscription or redemption order.
///
/// Also used as the required filter of the lending history endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LendingOrderStatus {
    /// Completed
    Done,
    /// Still active
    Pending,
}

impl std::fmt::Display for LendingOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LendingOrderStatus::Done => write!(f, "DONE"),
            LendingOrderStatus::Pending => write!(f, "PENDING"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_in_force_serde() {
        assert_eq!(
            serde_json::to_string(&TimeInForce::ImmediateOrCancel).unwrap(),
            r#""IOC""#
        );
        assert_eq!(
            serde_json::from_str::<TimeInForce>(r#""FOK""#).unwrap(),
            TimeInForce::FillOrKill
        );
        assert_eq!(TimeInForce::FillOrKill.to_string(), "FOK");
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::from_str::<BorrowStatus>(r#""SUCCESS""#).unwrap(),
            BorrowStatus::Success
        );
        assert_eq!(
            serde_json::to_string(&LendingOrderStatus::Pending).unwrap(),
            r#""PENDING""#
        );
        assert!(serde_json::from_str::<LendingOrderStatus>(r#""UNKNOWN""#).is_err());
    }
}
