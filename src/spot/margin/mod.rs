//! Spot margin and lending endpoint bindings.
//!
//! [`MarginClient`] turns typed arguments into [`RestRequest`]s, hands them to
//! a [`Transport`], and decodes the envelope of the reply. Each call issues
//! exactly one request; retries are the transport's business.
//!
//! # Example
//!
//! ```rust,no_run
//! use kucoin_margin_client::auth::StaticCredentials;
//! use kucoin_margin_client::rest::KucoinRestClient;
//! use kucoin_margin_client::spot::margin::BorrowOptions;
//! use kucoin_margin_client::types::TimeInForce;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), kucoin_margin_client::KucoinError> {
//! let client = KucoinRestClient::builder()
//!     .credentials(Arc::new(StaticCredentials::new("key", "secret", "passphrase")))
//!     .build();
//!
//! let order = client
//!     .margin()
//!     .borrow(
//!         "USDT",
//!         TimeInForce::ImmediateOrCancel,
//!         dec!(100),
//!         &BorrowOptions::cross(),
//!         &CancellationToken::new(),
//!     )
//!     .await?;
//! println!("borrowed {:?} as {}", order.quantity, order.order_id);
//! # Ok(())
//! # }
//! ```

mod options;
mod types;

pub use options::*;
pub use types::*;

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::KucoinError;
use crate::rest::endpoints::{lending, margin};
use crate::rest::{RawResponse, RestRequest, Transport, decode, decode_empty};
use crate::types::{LendingOrderStatus, Paginated, TimeInForce};
use options::{check_non_empty, check_path_segment};

/// Bindings for the KuCoin margin and lending endpoints.
///
/// Generic over the [`Transport`] so tests can substitute a recording mock.
#[derive(Debug, Clone)]
pub struct MarginClient<T> {
    transport: T,
}

#[derive(Serialize)]
struct CurrencyParam<'a> {
    currency: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RiskLimitParams<'a> {
    is_isolated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    symbol: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BorrowParams<'a> {
    currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_in_force: Option<TimeInForce>,
    size: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LendingParams<'a> {
    currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interest_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purchase_order_no: Option<&'a str>,
}

#[derive(Serialize)]
struct LendingOrdersParams<'a> {
    currency: &'a str,
    status: LendingOrderStatus,
}

impl<T: Transport> MarginClient<T> {
    /// Wrap a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ========== Margin configuration ==========

    /// Get the global margin configuration.
    pub async fn get_margin_configuration(
        &self,
        cancel: &CancellationToken,
    ) -> Result<MarginConfig, KucoinError> {
        self.fetch(RestRequest::get(margin::CONFIG), cancel).await
    }

    /// Get the mark price of a margin symbol.
    pub async fn get_margin_mark_price(
        &self,
        symbol: &str,
        cancel: &CancellationToken,
    ) -> Result<MarkPrice, KucoinError> {
        check_path_segment("symbol", symbol)?;
        self.fetch(RestRequest::get(margin::mark_price(symbol)), cancel)
            .await
    }

    /// Get the isolated margin configuration of every trading pair.
    pub async fn get_margin_trading_pair_configuration(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<TradingPairConfiguration>, KucoinError> {
        self.fetch(RestRequest::get(margin::ISOLATED_SYMBOLS), cancel)
            .await
    }

    /// Get cross margin risk limits and configuration of every asset.
    pub async fn get_cross_margin_risk_limit_and_config(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<CrossRiskLimitConfig>, KucoinError> {
        let request = RestRequest::get(margin::RISK_LIMIT).with_params(&RiskLimitParams {
            is_isolated: false,
            symbol: None,
        })?;
        self.fetch(request, cancel).await
    }

    /// Get isolated margin risk limits and configuration of a symbol.
    pub async fn get_isolated_margin_risk_limit_and_config(
        &self,
        symbol: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<IsolatedRiskLimitConfig>, KucoinError> {
        check_non_empty("symbol", symbol)?;
        let request = RestRequest::get(margin::RISK_LIMIT).with_params(&RiskLimitParams {
            is_isolated: true,
            symbol: Some(symbol),
        })?;
        self.fetch(request, cancel).await
    }

    // ========== Borrow and repay ==========

    /// Borrow an asset on the cross or isolated margin account.
    pub async fn borrow(
        &self,
        asset: &str,
        time_in_force: TimeInForce,
        quantity: Decimal,
        options: &BorrowOptions,
        cancel: &CancellationToken,
    ) -> Result<NewBorrowOrder, KucoinError> {
        check_non_empty("asset", asset)?;
        options.validate()?;
        let request = RestRequest::post(margin::BORROW)
            .with_params(&BorrowParams {
                currency: asset,
                time_in_force: Some(time_in_force),
                size: quantity,
            })?
            .with_params(options)?;

        tracing::info!(asset, %quantity, %time_in_force, "submitting margin borrow");
        self.fetch(request, cancel).await
    }

    /// Repay a margin liability.
    pub async fn repay(
        &self,
        asset: &str,
        quantity: Decimal,
        options: &RepayOptions,
        cancel: &CancellationToken,
    ) -> Result<NewBorrowOrder, KucoinError> {
        check_non_empty("asset", asset)?;
        options.validate()?;
        let request = RestRequest::post(margin::REPAY)
            .with_params(&BorrowParams {
                currency: asset,
                time_in_force: None,
                size: quantity,
            })?
            .with_params(options)?;

        tracing::info!(asset, %quantity, "submitting margin repay");
        self.fetch(request, cancel).await
    }

    /// Get borrow orders of an asset.
    pub async fn get_borrow_history(
        &self,
        asset: &str,
        options: &HistoryOptions,
        cancel: &CancellationToken,
    ) -> Result<Paginated<BorrowOrder>, KucoinError> {
        self.history(margin::BORROW, asset, options, cancel).await
    }

    /// Get repay orders of an asset.
    pub async fn get_repay_history(
        &self,
        asset: &str,
        options: &HistoryOptions,
        cancel: &CancellationToken,
    ) -> Result<Paginated<BorrowOrder>, KucoinError> {
        self.history(margin::REPAY, asset, options, cancel).await
    }

    /// Get interest charged on margin liabilities of an asset.
    pub async fn get_interest_history(
        &self,
        asset: &str,
        options: &InterestHistoryOptions,
        cancel: &CancellationToken,
    ) -> Result<Paginated<MarginInterest>, KucoinError> {
        check_non_empty("asset", asset)?;
        options.validate()?;
        let request = RestRequest::get(margin::INTEREST)
            .with_params(&CurrencyParam { currency: asset })?
            .with_params(options)?;
        self.fetch(request, cancel).await
    }

    async fn history(
        &self,
        path: &str,
        asset: &str,
        options: &HistoryOptions,
        cancel: &CancellationToken,
    ) -> Result<Paginated<BorrowOrder>, KucoinError> {
        check_non_empty("asset", asset)?;
        options.validate()?;
        let request = RestRequest::get(path)
            .with_params(&CurrencyParam { currency: asset })?
            .with_params(options)?;
        self.fetch(request, cancel).await
    }

    // ========== Lending ==========

    /// Get lending market information.
    pub async fn get_lending_assets(
        &self,
        options: &LendingAssetsOptions,
        cancel: &CancellationToken,
    ) -> Result<Vec<LendingAsset>, KucoinError> {
        options.validate()?;
        let request = RestRequest::get(lending::ASSETS).with_params(options)?;
        self.fetch(request, cancel).await
    }

    /// Get recent market interest rates of an asset.
    pub async fn get_interest_rates(
        &self,
        asset: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<LendingInterest>, KucoinError> {
        check_non_empty("asset", asset)?;
        let request = RestRequest::get(lending::INTEREST_RATES)
            .with_params(&CurrencyParam { currency: asset })?;
        self.fetch(request, cancel).await
    }

    /// Lend an asset at a minimum interest rate.
    pub async fn subscribe(
        &self,
        asset: &str,
        quantity: Decimal,
        interest_rate: Decimal,
        cancel: &CancellationToken,
    ) -> Result<LendingResult, KucoinError> {
        check_non_empty("asset", asset)?;
        let request = RestRequest::post(lending::PURCHASE).with_params(&LendingParams {
            currency: asset,
            size: Some(quantity),
            interest_rate: Some(interest_rate),
            purchase_order_no: None,
        })?;

        tracing::info!(asset, %quantity, %interest_rate, "submitting lending subscription");
        self.fetch(request, cancel).await
    }

    /// Redeem part or all of a subscription.
    pub async fn redeem(
        &self,
        asset: &str,
        quantity: Decimal,
        subscribe_order_id: &str,
        cancel: &CancellationToken,
    ) -> Result<LendingResult, KucoinError> {
        check_non_empty("asset", asset)?;
        check_non_empty("subscribe_order_id", subscribe_order_id)?;
        let request = RestRequest::post(lending::REDEEM).with_params(&LendingParams {
            currency: asset,
            size: Some(quantity),
            interest_rate: None,
            purchase_order_no: Some(subscribe_order_id),
        })?;

        tracing::info!(asset, %quantity, subscribe_order_id, "submitting lending redemption");
        self.fetch(request, cancel).await
    }

    /// Change the interest rate of a subscription. Takes effect at the next hour.
    pub async fn edit_subscription_order(
        &self,
        asset: &str,
        interest_rate: Decimal,
        subscribe_order_id: &str,
        cancel: &CancellationToken,
    ) -> Result<(), KucoinError> {
        check_non_empty("asset", asset)?;
        check_non_empty("subscribe_order_id", subscribe_order_id)?;
        let request = RestRequest::post(lending::PURCHASE_UPDATE).with_params(&LendingParams {
            currency: asset,
            size: None,
            interest_rate: Some(interest_rate),
            purchase_order_no: Some(subscribe_order_id),
        })?;

        tracing::info!(asset, %interest_rate, subscribe_order_id, "updating lending subscription");
        let raw = self.execute(request, cancel).await?;
        decode_empty(&raw)
    }

    /// Get redemption orders of an asset.
    pub async fn get_redemption_orders(
        &self,
        asset: &str,
        status: LendingOrderStatus,
        options: &RedemptionOrdersOptions,
        cancel: &CancellationToken,
    ) -> Result<Paginated<Redemption>, KucoinError> {
        check_non_empty("asset", asset)?;
        options.validate()?;
        let request = RestRequest::get(lending::REDEEM_ORDERS)
            .with_params(&LendingOrdersParams {
                currency: asset,
                status,
            })?
            .with_params(options)?;
        self.fetch(request, cancel).await
    }

    /// Get subscription orders of an asset.
    pub async fn get_subscription_orders(
        &self,
        asset: &str,
        status: LendingOrderStatus,
        options: &SubscriptionOrdersOptions,
        cancel: &CancellationToken,
    ) -> Result<Paginated<LendSubscription>, KucoinError> {
        check_non_empty("asset", asset)?;
        options.validate()?;
        let request = RestRequest::get(lending::PURCHASE_ORDERS)
            .with_params(&LendingOrdersParams {
                currency: asset,
                status,
            })?
            .with_params(options)?;
        self.fetch(request, cancel).await
    }

    // ========== Helpers ==========

    async fn fetch<R>(
        &self,
        request: RestRequest,
        cancel: &CancellationToken,
    ) -> Result<R, KucoinError>
    where
        R: DeserializeOwned,
    {
        let raw = self.execute(request, cancel).await?;
        decode(&raw)
    }

    /// Run one request, resolving with `Cancelled` as soon as `cancel` fires.
    async fn execute(
        &self,
        request: RestRequest,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, KucoinError> {
        if cancel.is_cancelled() {
            return Err(KucoinError::Cancelled);
        }

        tracing::debug!(method = %request.method, path = %request.path, "calling margin endpoint");
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(KucoinError::Cancelled),
            result = self.transport.execute(request, cancel) => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use reqwest::Method;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use time::macros::datetime;

    /// Records every request and replies with a canned response.
    struct MockTransport {
        response: RawResponse,
        delay: Option<Duration>,
        calls: AtomicUsize,
        requests: Mutex<Vec<RestRequest>>,
    }

    impl MockTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: RawResponse::new(status, body),
                delay: None,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn ok(data: Value) -> Self {
            Self::new(200, &json!({"code": "200000", "data": data}).to_string())
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_request(&self) -> RestRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for MockTransport {
        async fn execute(
            &self,
            request: RestRequest,
            _cancel: &CancellationToken,
        ) -> Result<RawResponse, KucoinError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.response.clone())
        }
    }

    fn client(transport: MockTransport) -> MarginClient<MockTransport> {
        MarginClient::new(transport)
    }

    fn empty_page() -> Value {
        json!({"currentPage": 1, "pageSize": 10, "totalNum": 0, "totalPage": 0, "items": []})
    }

    #[tokio::test]
    async fn test_margin_configuration() {
        let margin = client(MockTransport::ok(json!({
            "currencyList": ["BTC"],
            "warningDebtRatio": "0.8",
            "liqDebtRatio": "0.9",
            "maxLeverage": 5
        })));
        let config = margin
            .get_margin_configuration(&CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(config.max_leverage, 5);

        let request = margin.transport().last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/api/v1/margin/config");
        assert!(request.params.is_empty());
        assert!(request.authenticated);
    }

    #[tokio::test]
    async fn test_mark_price_path() {
        let margin = client(MockTransport::ok(json!({
            "symbol": "USDT-BTC",
            "granularity": 5000,
            "timePoint": 1659930234000_i64,
            "value": "0.0000429"
        })));
        margin
            .get_margin_mark_price("USDT-BTC", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(
            margin.transport().last_request().path,
            "/api/v1/mark-price/USDT-BTC/current"
        );
    }

    #[tokio::test]
    async fn test_mark_price_rejects_path_traversal() {
        let margin = client(MockTransport::ok(json!({})));
        let err = margin
            .get_margin_mark_price(
                "../../../v3/margin/borrow?currency=BTC#",
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            KucoinError::InvalidParameter { name: "symbol", .. }
        ));
        assert_eq!(margin.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_risk_limit_isolation_flag() {
        let margin = client(MockTransport::ok(json!([])));
        let cancel = CancellationToken::new();

        margin
            .get_cross_margin_risk_limit_and_config(&cancel)
            .await
            .unwrap();
        let request = margin.transport().last_request();
        assert_eq!(request.path, "/api/v3/margin/currencies");
        assert_eq!(request.param("isIsolated"), Some(&json!(false)));
        assert!(request.param("symbol").is_none());

        margin
            .get_isolated_margin_risk_limit_and_config("BTC-USDT", &cancel)
            .await
            .unwrap();
        let request = margin.transport().last_request();
        assert_eq!(request.param("isIsolated"), Some(&json!(true)));
        assert_eq!(request.param("symbol"), Some(&json!("BTC-USDT")));
    }

    #[tokio::test]
    async fn test_borrow_request_shape() {
        let margin = client(MockTransport::ok(json!({"orderNo": "b1", "actualSize": "10"})));
        let order = margin
            .borrow(
                "USDT",
                TimeInForce::FillOrKill,
                dec!(10),
                &BorrowOptions::isolated("BTC-USDT"),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(order.order_id, "b1");
        assert_eq!(order.quantity, Some(dec!(10)));

        let request = margin.transport().last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/api/v3/margin/borrow");
        assert_eq!(
            request.param_names(),
            vec!["currency", "isIsolated", "size", "symbol", "timeInForce"]
        );
        assert_eq!(request.param("timeInForce"), Some(&json!("FOK")));
        assert_eq!(request.param("size"), Some(&json!("10")));
    }

    #[tokio::test]
    async fn test_repay_omits_absent_options() {
        let margin = client(MockTransport::ok(json!({"orderNo": "r1", "actualSize": "5"})));
        margin
            .repay(
                "BTC",
                dec!(5),
                &RepayOptions::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let request = margin.transport().last_request();
        assert_eq!(request.path, "/api/v3/margin/repay");
        assert_eq!(request.param_names(), vec!["currency", "size"]);
    }

    #[tokio::test]
    async fn test_borrow_history_query() {
        let margin = client(MockTransport::ok(empty_page()));
        let options = HistoryOptions {
            order_id: Some("b1".into()),
            start_time: Some(datetime!(2023-10-20 06:36:52.257 UTC)),
            page: Some(1),
            page_size: Some(10),
            ..Default::default()
        };
        let page = margin
            .get_borrow_history("USDT", &options, &CancellationToken::new())
            .await
            .unwrap();
        assert!(page.is_empty());

        let request = margin.transport().last_request();
        assert_eq!(
            request.endpoint().unwrap(),
            "/api/v3/margin/borrow?currency=USDT&currentPage=1&orderNo=b1&pageSize=10&startTime=1697783812257"
        );
    }

    #[tokio::test]
    async fn test_history_sends_only_supplied_filters() {
        let margin = client(MockTransport::ok(empty_page()));
        let options = HistoryOptions {
            is_isolated: Some(true),
            symbol: Some("BTC-USDT".into()),
            page: Some(2),
            page_size: Some(50),
            ..Default::default()
        };
        margin
            .get_borrow_history("BTC", &options, &CancellationToken::new())
            .await
            .unwrap();

        let request = margin.transport().last_request();
        assert_eq!(
            request.param_names(),
            vec!["currency", "currentPage", "isIsolated", "pageSize", "symbol"]
        );
    }

    #[tokio::test]
    async fn test_borrow_default_options() {
        let margin = client(MockTransport::ok(json!({"orderNo": "abc123"})));
        let order = margin
            .borrow(
                "USDT",
                TimeInForce::ImmediateOrCancel,
                dec!(100.0),
                &BorrowOptions::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(order.order_id, "abc123");
        assert!(order.quantity.is_none());

        let request = margin.transport().last_request();
        assert_eq!(request.param_names(), vec!["currency", "size", "timeInForce"]);
        assert_eq!(request.param("size"), Some(&json!("100.0")));
        assert_eq!(request.param("timeInForce"), Some(&json!("IOC")));
    }

    #[tokio::test]
    async fn test_interest_history_path() {
        let margin = client(MockTransport::ok(empty_page()));
        margin
            .get_interest_history(
                "USDT",
                &InterestHistoryOptions::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        let request = margin.transport().last_request();
        assert_eq!(request.path, "/api/v3/margin/interest");
        assert_eq!(request.param_names(), vec!["currency"]);
    }

    #[tokio::test]
    async fn test_lending_assets_filter() {
        let margin = client(MockTransport::ok(json!([])));
        let cancel = CancellationToken::new();

        margin
            .get_lending_assets(&LendingAssetsOptions::default(), &cancel)
            .await
            .unwrap();
        assert!(margin.transport().last_request().params.is_empty());

        let options = LendingAssetsOptions {
            asset: Some("BTC".into()),
        };
        margin.get_lending_assets(&options, &cancel).await.unwrap();
        assert_eq!(
            margin.transport().last_request().param("currency"),
            Some(&json!("BTC"))
        );
    }

    #[tokio::test]
    async fn test_subscribe_and_redeem_bodies() {
        let margin = client(MockTransport::ok(json!({"orderNo": "p1"})));
        let cancel = CancellationToken::new();

        let result = margin
            .subscribe("BTC", dec!(1), dec!(0.01), &cancel)
            .await
            .unwrap();
        assert_eq!(result.order_id, "p1");
        assert_eq!(
            margin.transport().last_request().body().unwrap(),
            r#"{"currency":"BTC","interestRate":"0.01","size":"1"}"#
        );

        margin.redeem("BTC", dec!(1), "p1", &cancel).await.unwrap();
        let request = margin.transport().last_request();
        assert_eq!(request.path, "/api/v3/redeem");
        assert_eq!(
            request.body().unwrap(),
            r#"{"currency":"BTC","purchaseOrderNo":"p1","size":"1"}"#
        );
    }

    #[tokio::test]
    async fn test_edit_subscription_accepts_null_data() {
        let margin = client(MockTransport::new(200, r#"{"code":"200000","data":null}"#));
        margin
            .edit_subscription_order("BTC", dec!(0.02), "p1", &CancellationToken::new())
            .await
            .unwrap();
        let request = margin.transport().last_request();
        assert_eq!(request.path, "/api/v3/lend/purchase/update");
        assert_eq!(
            request.param_names(),
            vec!["currency", "interestRate", "purchaseOrderNo"]
        );
    }

    #[tokio::test]
    async fn test_lending_order_queries() {
        let margin = client(MockTransport::ok(empty_page()));
        let cancel = CancellationToken::new();

        margin
            .get_redemption_orders(
                "BTC",
                LendingOrderStatus::Pending,
                &RedemptionOrdersOptions::default(),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(
            margin.transport().last_request().endpoint().unwrap(),
            "/api/v3/redeem/orders?currency=BTC&status=PENDING"
        );

        let options = SubscriptionOrdersOptions {
            subscribe_order_id: Some("p1".into()),
            ..Default::default()
        };
        margin
            .get_subscription_orders("BTC", LendingOrderStatus::Done, &options, &cancel)
            .await
            .unwrap();
        assert_eq!(
            margin.transport().last_request().endpoint().unwrap(),
            "/api/v3/purchase/orders?currency=BTC&purchaseOrderNo=p1&status=DONE"
        );
    }

    #[tokio::test]
    async fn test_empty_asset_is_rejected_locally() {
        let margin = client(MockTransport::ok(json!({})));
        let err = margin
            .repay(
                "",
                dec!(1),
                &RepayOptions::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Local);
        assert_eq!(margin.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_error_is_returned() {
        let margin = client(MockTransport::new(
            200,
            r#"{"code":"200004","msg":"Balance insufficient"}"#,
        ));
        let err = margin
            .subscribe("BTC", dec!(1), dec!(0.01), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert!(err.api_error().unwrap().is_insufficient_balance());
    }

    #[tokio::test]
    async fn test_cancelled_before_call_sends_nothing() {
        let margin = client(MockTransport::ok(json!({})));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = margin.get_margin_configuration(&cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(margin.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_cancel_while_in_flight() {
        let margin = client(MockTransport::ok(empty_page()).with_delay(Duration::from_secs(30)));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let err = margin
            .get_repay_history("USDT", &HistoryOptions::default(), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, KucoinError::Cancelled));
        assert_eq!(margin.transport().calls(), 1);
    }
}
