//! Records returned by the margin and lending endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::{TimestampMilliSeconds, serde_as};
use time::OffsetDateTime;

use crate::types::serde_helpers::{
    compact_minute_time, display_fromstr_or_native, empty_string_as_none, flexible_decimal,
    optional_flexible_decimal,
};
use crate::types::{BorrowStatus, LendingOrderStatus};

/// Global margin configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginConfig {
    /// Assets that can be used in margin trading.
    pub currency_list: Vec<String>,
    /// Debt ratio at which a warning is sent.
    #[serde(with = "flexible_decimal")]
    pub warning_debt_ratio: Decimal,
    /// Debt ratio at which positions are liquidated.
    #[serde(rename = "liqDebtRatio", with = "flexible_decimal")]
    pub liquidation_debt_ratio: Decimal,
    /// Maximum leverage.
    #[serde(deserialize_with = "display_fromstr_or_native::deserialize")]
    pub max_leverage: u32,
}

/// Mark price of a margin symbol.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPrice {
    /// Symbol (e.g., "USDT-BTC").
    pub symbol: String,
    /// Granularity of the price in milliseconds.
    pub granularity: u64,
    /// Time of the price point.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub time_point: OffsetDateTime,
    /// Mark price.
    #[serde(with = "flexible_decimal")]
    pub value: Decimal,
}

/// Isolated margin configuration of a trading pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingPairConfiguration {
    /// Symbol (e.g., "BTC-USDT").
    pub symbol: String,
    /// Display name of the symbol.
    pub symbol_name: String,
    /// Base asset.
    #[serde(rename = "baseCurrency")]
    pub base_asset: String,
    /// Quote asset.
    #[serde(rename = "quoteCurrency")]
    pub quote_asset: String,
    /// Maximum leverage.
    #[serde(deserialize_with = "display_fromstr_or_native::deserialize")]
    pub max_leverage: u32,
    /// Debt ratio at which positions are liquidated.
    #[serde(rename = "flDebtRatio", with = "flexible_decimal")]
    pub liquidation_debt_ratio: Decimal,
    /// Whether trading is enabled.
    #[serde(rename = "tradeEnable")]
    pub trade_enabled: bool,
    /// Debt ratio below which loans are auto-renewed.
    #[serde(with = "optional_flexible_decimal", default)]
    pub auto_renew_max_debt_ratio: Option<Decimal>,
    /// Whether the base asset can be borrowed.
    #[serde(rename = "baseBorrowEnable")]
    pub base_borrow_enabled: bool,
    /// Whether the quote asset can be borrowed.
    #[serde(rename = "quoteBorrowEnable")]
    pub quote_borrow_enabled: bool,
    /// Whether the base asset can be transferred in.
    #[serde(rename = "baseTransferInEnable")]
    pub base_transfer_in_enabled: bool,
    /// Whether the quote asset can be transferred in.
    #[serde(rename = "quoteTransferInEnable")]
    pub quote_transfer_in_enabled: bool,
    /// Borrow coefficient of the base asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub base_borrow_coefficient: Option<Decimal>,
    /// Borrow coefficient of the quote asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub quote_borrow_coefficient: Option<Decimal>,
    /// Margin coefficient of the base asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub base_margin_coefficient: Option<Decimal>,
    /// Margin coefficient of the quote asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub quote_margin_coefficient: Option<Decimal>,
}

/// Cross margin risk limit and configuration of an asset.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossRiskLimitConfig {
    /// Time of the snapshot.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub timestamp: OffsetDateTime,
    /// Asset.
    #[serde(rename = "currency")]
    pub asset: String,
    /// Maximum borrow amount.
    #[serde(with = "flexible_decimal")]
    pub borrow_max_amount: Decimal,
    /// Maximum buy amount.
    #[serde(with = "flexible_decimal")]
    pub buy_max_amount: Decimal,
    /// Maximum hold amount.
    #[serde(with = "flexible_decimal")]
    pub hold_max_amount: Decimal,
    /// Borrow coefficient.
    #[serde(with = "optional_flexible_decimal", default)]
    pub borrow_coefficient: Option<Decimal>,
    /// Margin coefficient.
    #[serde(with = "optional_flexible_decimal", default)]
    pub margin_coefficient: Option<Decimal>,
    /// Decimal precision of the asset.
    #[serde(deserialize_with = "display_fromstr_or_native::deserialize")]
    pub precision: u32,
    /// Minimum borrow amount.
    #[serde(with = "optional_flexible_decimal", default)]
    pub borrow_min_amount: Option<Decimal>,
    /// Borrow amount step.
    #[serde(with = "optional_flexible_decimal", default)]
    pub borrow_min_unit: Option<Decimal>,
    /// Whether the asset can be borrowed.
    #[serde(default)]
    pub borrow_enabled: bool,
}

/// Isolated margin risk limit and configuration of a symbol.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsolatedRiskLimitConfig {
    /// Time of the snapshot.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub timestamp: OffsetDateTime,
    /// Symbol.
    pub symbol: String,
    /// Maximum borrow amount of the base asset.
    #[serde(with = "flexible_decimal")]
    pub base_max_borrow_amount: Decimal,
    /// Maximum borrow amount of the quote asset.
    #[serde(with = "flexible_decimal")]
    pub quote_max_borrow_amount: Decimal,
    /// Maximum buy amount of the base asset.
    #[serde(with = "flexible_decimal")]
    pub base_max_buy_amount: Decimal,
    /// Maximum buy amount of the quote asset.
    #[serde(with = "flexible_decimal")]
    pub quote_max_buy_amount: Decimal,
    /// Maximum hold amount of the base asset.
    #[serde(with = "flexible_decimal")]
    pub base_max_hold_amount: Decimal,
    /// Maximum hold amount of the quote asset.
    #[serde(with = "flexible_decimal")]
    pub quote_max_hold_amount: Decimal,
    /// Decimal precision of the base asset.
    #[serde(deserialize_with = "display_fromstr_or_native::deserialize")]
    pub base_precision: u32,
    /// Decimal precision of the quote asset.
    #[serde(deserialize_with = "display_fromstr_or_native::deserialize")]
    pub quote_precision: u32,
    /// Borrow coefficient of the base asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub base_borrow_coefficient: Option<Decimal>,
    /// Borrow coefficient of the quote asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub quote_borrow_coefficient: Option<Decimal>,
    /// Margin coefficient of the base asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub base_margin_coefficient: Option<Decimal>,
    /// Margin coefficient of the quote asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub quote_margin_coefficient: Option<Decimal>,
    /// Minimum borrow amount of the base asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub base_borrow_min_amount: Option<Decimal>,
    /// Borrow step of the base asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub base_borrow_min_unit: Option<Decimal>,
    /// Minimum borrow amount of the quote asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub quote_borrow_min_amount: Option<Decimal>,
    /// Borrow step of the quote asset.
    #[serde(with = "optional_flexible_decimal", default)]
    pub quote_borrow_min_unit: Option<Decimal>,
    /// Whether the base asset can be borrowed.
    #[serde(default)]
    pub base_borrow_enabled: bool,
    /// Whether the quote asset can be borrowed.
    #[serde(default)]
    pub quote_borrow_enabled: bool,
}

/// Receipt of a borrow or repay request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBorrowOrder {
    /// Order id, usable as a history filter.
    #[serde(rename = "orderNo")]
    pub order_id: String,
    /// Quantity actually borrowed or repaid.
    #[serde(rename = "actualSize", with = "optional_flexible_decimal", default)]
    pub quantity: Option<Decimal>,
}

/// Borrow or repay history entry.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowOrder {
    /// Order id.
    #[serde(rename = "orderNo")]
    pub order_id: String,
    /// Isolated margin symbol, `None` for cross margin.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub symbol: Option<String>,
    /// Asset.
    #[serde(rename = "currency")]
    pub asset: String,
    /// Requested quantity.
    #[serde(rename = "size", with = "flexible_decimal")]
    pub quantity: Decimal,
    /// Quantity actually borrowed (borrow history only).
    #[serde(rename = "actualSize", with = "optional_flexible_decimal", default)]
    pub quantity_filled: Option<Decimal>,
    /// Principal repaid (repay history only).
    #[serde(with = "optional_flexible_decimal", default)]
    pub principal: Option<Decimal>,
    /// Interest repaid (repay history only).
    #[serde(with = "optional_flexible_decimal", default)]
    pub interest: Option<Decimal>,
    /// Order status.
    pub status: BorrowStatus,
    /// Creation time.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    #[serde(rename = "createdTime")]
    pub create_time: OffsetDateTime,
}

/// Margin interest record.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginInterest {
    /// Asset.
    #[serde(rename = "currency")]
    pub asset: String,
    /// Daily interest rate.
    #[serde(with = "flexible_decimal")]
    pub day_ratio: Decimal,
    /// Interest charged.
    #[serde(with = "flexible_decimal")]
    pub interest_amount: Decimal,
    /// Time the interest was charged.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    #[serde(rename = "createdTime")]
    pub create_time: OffsetDateTime,
}

/// Lending market information of an asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendingAsset {
    /// Asset.
    #[serde(rename = "currency")]
    pub asset: String,
    /// Whether subscriptions are accepted.
    #[serde(rename = "purchaseEnable")]
    pub subscribe_enabled: bool,
    /// Whether redemptions are accepted.
    #[serde(rename = "redeemEnable")]
    pub redeem_enabled: bool,
    /// Quantity step.
    #[serde(with = "flexible_decimal")]
    pub increment: Decimal,
    /// Minimum subscription quantity.
    #[serde(rename = "minPurchaseSize", with = "flexible_decimal")]
    pub min_subscribe_quantity: Decimal,
    /// Maximum subscription quantity.
    #[serde(rename = "maxPurchaseSize", with = "optional_flexible_decimal", default)]
    pub max_subscribe_quantity: Option<Decimal>,
    /// Minimum interest rate.
    #[serde(with = "flexible_decimal")]
    pub min_interest_rate: Decimal,
    /// Maximum interest rate.
    #[serde(with = "flexible_decimal")]
    pub max_interest_rate: Decimal,
    /// Interest rate step.
    #[serde(with = "flexible_decimal")]
    pub interest_increment: Decimal,
    /// Current market interest rate.
    #[serde(with = "optional_flexible_decimal", default)]
    pub market_interest_rate: Option<Decimal>,
    /// Whether auto-subscribe is enabled.
    #[serde(rename = "autoPurchaseEnable", default)]
    pub auto_subscribe_enabled: bool,
}

/// Market interest rate at a point in time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendingInterest {
    /// Time of the rate, minute precision.
    #[serde(with = "compact_minute_time")]
    pub time: OffsetDateTime,
    /// Market interest rate.
    #[serde(with = "flexible_decimal")]
    pub market_interest_rate: Decimal,
}

/// Receipt of a subscription or redemption request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LendingResult {
    /// Order id.
    #[serde(rename = "orderNo")]
    pub order_id: String,
}

/// Redemption order.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    /// Asset.
    #[serde(rename = "currency")]
    pub asset: String,
    /// Subscription order being redeemed.
    #[serde(rename = "purchaseOrderNo")]
    pub subscribe_order_id: String,
    /// Redemption order id.
    #[serde(rename = "redeemOrderNo")]
    pub redeem_order_id: String,
    /// Quantity requested for redemption.
    #[serde(rename = "redeemSize", with = "flexible_decimal")]
    pub quantity: Decimal,
    /// Quantity received.
    #[serde(rename = "receiptSize", with = "flexible_decimal")]
    pub quantity_received: Decimal,
    /// Time the redemption was requested.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub apply_time: OffsetDateTime,
    /// Status.
    pub status: LendingOrderStatus,
}

/// Lending subscription order.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendSubscription {
    /// Asset.
    #[serde(rename = "currency")]
    pub asset: String,
    /// Subscription order id.
    #[serde(rename = "purchaseOrderNo")]
    pub order_id: String,
    /// Subscribed quantity.
    #[serde(rename = "purchaseSize", with = "flexible_decimal")]
    pub quantity: Decimal,
    /// Quantity lent out so far.
    #[serde(rename = "matchSize", with = "flexible_decimal")]
    pub quantity_matched: Decimal,
    /// Interest rate asked.
    #[serde(with = "flexible_decimal")]
    pub interest_rate: Decimal,
    /// Income earned.
    #[serde(rename = "incomeSize", with = "flexible_decimal")]
    pub income: Decimal,
    /// Time the subscription was placed.
    #[serde_as(as = "TimestampMilliSeconds<i64>")]
    pub apply_time: OffsetDateTime,
    /// Status.
    pub status: LendingOrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use time::macros::datetime;

    #[test]
    fn test_margin_config_deserialize() {
        let json = r#"{
            "currencyList": ["BTC", "USDT"],
            "warningDebtRatio": "0.8",
            "liqDebtRatio": "0.9",
            "maxLeverage": 5
        }"#;
        let config: MarginConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.currency_list, vec!["BTC", "USDT"]);
        assert_eq!(config.warning_debt_ratio, Decimal::new(8, 1));
        assert_eq!(config.liquidation_debt_ratio, Decimal::new(9, 1));
        assert_eq!(config.max_leverage, 5);
    }

    #[test]
    fn test_mark_price_numeric_value() {
        let json = r#"{"symbol":"USDT-BTC","granularity":5000,"timePoint":1659930234000,"value":0.0000429}"#;
        let price: MarkPrice = serde_json::from_str(json).unwrap();
        assert_eq!(price.value, Decimal::from_str("0.0000429").unwrap());
        assert_eq!(price.time_point.unix_timestamp(), 1_659_930_234);
    }

    #[test]
    fn test_borrow_order_cross_symbol_empty() {
        let json = r#"{
            "orderNo": "5da6dba0f943c0c81f5d5db5",
            "symbol": "",
            "currency": "USDT",
            "size": "10",
            "actualSize": "10",
            "status": "SUCCESS",
            "createdTime": 1697783812257
        }"#;
        let order: BorrowOrder = serde_json::from_str(json).unwrap();
        assert!(order.symbol.is_none());
        assert_eq!(order.quantity_filled, Some(Decimal::TEN));
        assert!(order.principal.is_none());
        assert_eq!(order.status, BorrowStatus::Success);
        assert_eq!(order.create_time, datetime!(2023-10-20 06:36:52.257 UTC));
    }

    #[test]
    fn test_repay_order_fields() {
        let json = r#"{
            "orderNo": "r1",
            "symbol": "BTC-USDT",
            "currency": "USDT",
            "size": "10",
            "principal": "9.99",
            "interest": "0.01",
            "status": "PENDING",
            "createdTime": 1697783812257
        }"#;
        let order: BorrowOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.symbol.as_deref(), Some("BTC-USDT"));
        assert_eq!(order.principal, Some(Decimal::from_str("9.99").unwrap()));
        assert_eq!(order.interest, Some(Decimal::from_str("0.01").unwrap()));
        assert!(order.quantity_filled.is_none());
    }

    #[test]
    fn test_isolated_risk_limit_null_minimums() {
        let json = r#"{
            "timestamp": 1697782543851,
            "symbol": "LUNC-USDT",
            "baseMaxBorrowAmount": "999999999999999999",
            "quoteMaxBorrowAmount": "999999999999999999",
            "baseMaxBuyAmount": "999999999999999999",
            "quoteMaxBuyAmount": "999999999999999999",
            "baseMaxHoldAmount": "999999999999999999",
            "quoteMaxHoldAmount": "999999999999999999",
            "basePrecision": 8,
            "quotePrecision": 8,
            "baseBorrowCoefficient": "1",
            "quoteBorrowCoefficient": "1",
            "baseMarginCoefficient": "1",
            "quoteMarginCoefficient": "1",
            "baseBorrowMinAmount": null,
            "baseBorrowMinUnit": null,
            "quoteBorrowMinAmount": "0.001",
            "quoteBorrowMinUnit": "0.001",
            "baseBorrowEnabled": false,
            "quoteBorrowEnabled": true
        }"#;
        let config: IsolatedRiskLimitConfig = serde_json::from_str(json).unwrap();
        assert!(config.base_borrow_min_amount.is_none());
        assert_eq!(config.quote_borrow_min_unit, Some(Decimal::new(1, 3)));
        assert!(!config.base_borrow_enabled);
        assert!(config.quote_borrow_enabled);
    }

    #[test]
    fn test_lending_interest_time() {
        let json = r#"{"time":"202303261200","marketInterestRate":"0.003"}"#;
        let rate: LendingInterest = serde_json::from_str(json).unwrap();
        assert_eq!(rate.time, datetime!(2023-03-26 12:00 UTC));
        assert_eq!(rate.market_interest_rate, Decimal::new(3, 3));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"{
            "currency": "BTC",
            "purchaseOrderNo": "p1",
            "redeemOrderNo": "r1",
            "redeemSize": "1",
            "receiptSize": "1",
            "applyTime": 1697783812257,
            "status": "EXPIRED"
        }"#;
        assert!(serde_json::from_str::<Redemption>(json).is_err());
    }
}
