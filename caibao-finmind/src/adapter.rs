#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use caibao_core::{CaibaoError, DateRange};

/// Connector name used when tagging errors raised by this crate.
pub(crate) const CONNECTOR_NAME: &str = "caibao-finmind";

/// Default API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.finmindtrade.com";

/// Path of the v4 data endpoint, relative to the base URL.
pub const DATA_PATH: &str = "/api/v4/data";

/// Dataset names understood by the data endpoint.
pub mod dataset {
    /// Monthly revenue reports.
    pub const MONTH_REVENUE: &str = "TaiwanStockMonthRevenue";
    /// Daily OHLCV bars.
    pub const DAILY_PRICE: &str = "TaiwanStockPrice";
    /// Listed stock catalog.
    pub const STOCK_INFO: &str = "TaiwanStockInfo";
}

/// One row of `TaiwanStockMonthRevenue`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FmRevenueRow {
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    /// Stock identifier.
    pub stock_id: String,
    /// Revenue in TWD.
    pub revenue: f64,
    /// Fiscal month of the revenue.
    #[serde(default)]
    pub revenue_month: Option<u32>,
    /// Fiscal year of the revenue.
    #[serde(default)]
    pub revenue_year: Option<i32>,
}

/// One row of `TaiwanStockPrice`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FmPriceRow {
    /// Trading day, `YYYY-MM-DD`.
    pub date: String,
    /// Stock identifier.
    pub stock_id: String,
    /// Closing price.
    pub close: f64,
    /// Shares traded.
    #[serde(rename = "Trading_Volume", default)]
    pub trading_volume: Option<u64>,
}

/// One row of `TaiwanStockInfo`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FmStockInfoRow {
    /// Stock identifier.
    pub stock_id: String,
    /// Display name.
    pub stock_name: String,
    /// Industry the exchange files the stock under.
    #[serde(default)]
    pub industry_category: Option<String>,
}

/// Response envelope shared by every dataset.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    msg: String,
    #[serde(default)]
    status: Option<u16>,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Monthly revenue abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait FmRevenue: Send + Sync {
    /// Fetch raw revenue rows for `stock_id` within `range`.
    async fn month_revenue(
        &self,
        stock_id: &str,
        range: DateRange,
    ) -> Result<Vec<FmRevenueRow>, CaibaoError>;
}

/// Daily price abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait FmPrices: Send + Sync {
    /// Fetch raw daily bars for `stock_id` within `range`.
    async fn daily_price(
        &self,
        stock_id: &str,
        range: DateRange,
    ) -> Result<Vec<FmPriceRow>, CaibaoError>;
}

/// Stock catalog abstraction.
#[async_trait]
pub trait FmCatalog: Send + Sync {
    /// Fetch every listed stock.
    async fn stock_info(&self) -> Result<Vec<FmStockInfoRow>, CaibaoError>;
}

/// Real adapter backed by a shared `reqwest::Client`.
/// `reqwest::Client` is internally reference counted, so clones are cheap.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl std::fmt::Debug for RealAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealAdapter")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl RealAdapter {
    /// Wrap an HTTP client pointed at `base_url`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base_url` cannot be parsed or joined with the
    /// data path.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        token: Option<String>,
    ) -> Result<Self, CaibaoError> {
        let base = Url::parse(base_url)
            .map_err(|e| CaibaoError::InvalidArg(format!("base url {base_url:?}: {e}")))?;
        let endpoint = base
            .join(DATA_PATH)
            .map_err(|e| CaibaoError::InvalidArg(format!("base url {base_url:?}: {e}")))?;
        Ok(Self {
            http,
            endpoint,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Fully resolved data endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, dataset: &str, stock_id: Option<&str>, range: Option<DateRange>) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("dataset", dataset);
            if let Some(id) = stock_id {
                q.append_pair("data_id", id);
            }
            if let Some(r) = range {
                q.append_pair("start_date", &r.start().format("%Y-%m-%d").to_string());
                q.append_pair("end_date", &r.end().format("%Y-%m-%d").to_string());
            }
            if let Some(token) = &self.token {
                q.append_pair("token", token);
            }
        }
        url
    }

    async fn fetch_dataset<T: DeserializeOwned>(
        &self,
        dataset: &str,
        stock_id: Option<&str>,
        range: Option<DateRange>,
    ) -> Result<Vec<T>, CaibaoError> {
        let context = match stock_id {
            Some(id) => format!("{dataset} for {id}"),
            None => dataset.to_string(),
        };
        let url = self.request_url(dataset, stock_id, range);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e, &context))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(map_status(status.as_u16(), &body, &context));
        }

        let env: Envelope<T> = resp
            .json()
            .await
            .map_err(|e| CaibaoError::Data(format!("{context}: malformed response: {e}")))?;
        if env.msg != "success" {
            return Err(map_status(env.status.unwrap_or(200), &env.msg, &context));
        }
        Ok(env.data)
    }
}

fn map_status(status: u16, body: &str, context: &str) -> CaibaoError {
    let detail = if body.is_empty() {
        context.to_string()
    } else {
        format!("{context}: {}", body.trim())
    };
    match status {
        402 | 429 => CaibaoError::rate_limited(CONNECTOR_NAME, detail),
        404 => CaibaoError::not_found(context.to_string()),
        s if s >= 500 => CaibaoError::connector(CONNECTOR_NAME, format!("server error {s}: {detail}")),
        s if s >= 400 => CaibaoError::connector(CONNECTOR_NAME, format!("status {s}: {detail}")),
        _ => CaibaoError::connector(CONNECTOR_NAME, detail),
    }
}

fn map_reqwest_err(e: &reqwest::Error, context: &str) -> CaibaoError {
    if e.is_timeout() {
        CaibaoError::connector(CONNECTOR_NAME, format!("timed out: {context}"))
    } else if let Some(status) = e.status() {
        map_status(status.as_u16(), "", context)
    } else {
        CaibaoError::connector(CONNECTOR_NAME, format!("{context}: {e}"))
    }
}

#[async_trait]
impl FmRevenue for RealAdapter {
    async fn month_revenue(
        &self,
        stock_id: &str,
        range: DateRange,
    ) -> Result<Vec<FmRevenueRow>, CaibaoError> {
        self.fetch_dataset(dataset::MONTH_REVENUE, Some(stock_id), Some(range))
            .await
    }
}

#[async_trait]
impl FmPrices for RealAdapter {
    async fn daily_price(
        &self,
        stock_id: &str,
        range: DateRange,
    ) -> Result<Vec<FmPriceRow>, CaibaoError> {
        self.fetch_dataset(dataset::DAILY_PRICE, Some(stock_id), Some(range))
            .await
    }
}

#[async_trait]
impl FmCatalog for RealAdapter {
    async fn stock_info(&self) -> Result<Vec<FmStockInfoRow>, CaibaoError> {
        self.fetch_dataset(dataset::STOCK_INFO, None, None).await
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn FmRevenue {
    /// Build a `FmRevenue` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn FmRevenue>
    where
        F: Send
            + Sync
            + 'static
            + Fn(String, DateRange) -> Result<Vec<FmRevenueRow>, CaibaoError>,
    {
        struct FnRevenue<F>(F);
        #[async_trait]
        impl<F> FmRevenue for FnRevenue<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, DateRange) -> Result<Vec<FmRevenueRow>, CaibaoError>,
        {
            async fn month_revenue(
                &self,
                stock_id: &str,
                range: DateRange,
            ) -> Result<Vec<FmRevenueRow>, CaibaoError> {
                (self.0)(stock_id.to_string(), range)
            }
        }
        Arc::new(FnRevenue(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn FmPrices {
    /// Build a `FmPrices` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn FmPrices>
    where
        F: Send + Sync + 'static + Fn(String, DateRange) -> Result<Vec<FmPriceRow>, CaibaoError>,
    {
        struct FnPrices<F>(F);
        #[async_trait]
        impl<F> FmPrices for FnPrices<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, DateRange) -> Result<Vec<FmPriceRow>, CaibaoError>,
        {
            async fn daily_price(
                &self,
                stock_id: &str,
                range: DateRange,
            ) -> Result<Vec<FmPriceRow>, CaibaoError> {
                (self.0)(stock_id.to_string(), range)
            }
        }
        Arc::new(FnPrices(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn FmCatalog {
    /// Build a `FmCatalog` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn FmCatalog>
    where
        F: Send + Sync + 'static + Fn() -> Result<Vec<FmStockInfoRow>, CaibaoError>,
    {
        struct FnCatalog<F>(F);
        #[async_trait]
        impl<F> FmCatalog for FnCatalog<F>
        where
            F: Send + Sync + 'static + Fn() -> Result<Vec<FmStockInfoRow>, CaibaoError>,
        {
            async fn stock_info(&self) -> Result<Vec<FmStockInfoRow>, CaibaoError> {
                (self.0)()
            }
        }
        Arc::new(FnCatalog(f))
    }
}

/// Helper trait to split a concrete adapter into arc trait objects.
///
/// Every method defaults to an adapter that answers `unsupported`, so tests
/// override only the datasets they exercise.
#[cfg(feature = "test-adapters")]
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn FmRevenue>`.
    fn clone_arc_revenue(&self) -> Arc<dyn FmRevenue> {
        <dyn FmRevenue>::from_fn(|_, _| Err(CaibaoError::unsupported("monthly-revenue")))
    }
    /// Clone as `Arc<dyn FmPrices>`.
    fn clone_arc_prices(&self) -> Arc<dyn FmPrices> {
        <dyn FmPrices>::from_fn(|_, _| Err(CaibaoError::unsupported("daily-prices")))
    }
    /// Clone as `Arc<dyn FmCatalog>`.
    fn clone_arc_catalog(&self) -> Arc<dyn FmCatalog> {
        <dyn FmCatalog>::from_fn(|| Err(CaibaoError::unsupported("stock-catalog")))
    }
}

#[cfg(feature = "test-adapters")]
impl CloneArcAdapters for RealAdapter {
    fn clone_arc_revenue(&self) -> Arc<dyn FmRevenue> {
        Arc::new(self.clone()) as Arc<dyn FmRevenue>
    }
    fn clone_arc_prices(&self) -> Arc<dyn FmPrices> {
        Arc::new(self.clone()) as Arc<dyn FmPrices>
    }
    fn clone_arc_catalog(&self) -> Arc<dyn FmCatalog> {
        Arc::new(self.clone()) as Arc<dyn FmCatalog>
    }
}
