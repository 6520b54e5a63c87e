//! KuCoin REST API endpoint constants.

/// Base URL for the KuCoin spot REST API.
pub const KUCOIN_BASE_URL: &str = "https://api.kucoin.com";

/// Margin info and borrowing endpoints.
pub mod margin {
    /// Get margin configuration.
    pub const CONFIG: &str = "/api/v1/margin/config";
    /// Get the mark price of a symbol (template, see [`mark_price`]).
    pub const MARK_PRICE: &str = "/api/v1/mark-price/{symbol}/current";
    /// Get isolated margin pair configuration.
    pub const ISOLATED_SYMBOLS: &str = "/api/v1/isolated/symbols";
    /// Get cross/isolated risk limit and asset configuration.
    pub const RISK_LIMIT: &str = "/api/v3/margin/currencies";
    /// Borrow (POST) and borrow history (GET).
    pub const BORROW: &str = "/api/v3/margin/borrow";
    /// Repay (POST) and repay history (GET).
    pub const REPAY: &str = "/api/v3/margin/repay";
    /// Get interest records.
    pub const INTEREST: &str = "/api/v3/margin/interest";

    /// Fill in the mark price path for a symbol.
    pub fn mark_price(symbol: &str) -> String {
        MARK_PRICE.replace("{symbol}", symbol)
    }
}

/// Lending market endpoints.
pub mod lending {
    /// Get lending asset information.
    pub const ASSETS: &str = "/api/v3/project/list";
    /// Get market interest rates.
    pub const INTEREST_RATES: &str = "/api/v3/project/marketInterestRate";
    /// Subscribe to lending.
    pub const PURCHASE: &str = "/api/v3/purchase";
    /// Redeem a subscription.
    pub const REDEEM: &str = "/api/v3/redeem";
    /// Modify the interest rate of a subscription.
    pub const PURCHASE_UPDATE: &str = "/api/v3/lend/purchase/update";
    /// Get redemption orders.
    pub const REDEEM_ORDERS: &str = "/api/v3/redeem/orders";
    /// Get subscription orders.
    pub const PURCHASE_ORDERS: &str = "/api/v3/purchase/orders";
}
