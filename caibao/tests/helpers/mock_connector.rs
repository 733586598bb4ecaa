#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use caibao_core::connector::{CatalogProvider, PriceProvider, RevenueProvider};
use caibao_core::{CaibaoConnector, CaibaoError, DateRange, PricePoint, RevenueRecord, Stock};
use tokio::time::{Duration, sleep};

/// Simple in-memory connector used by integration tests.
/// Capabilities are exposed only for the closures that were configured.
pub struct MockConnector {
    pub name: &'static str,
    pub delay_ms: u64,
    pub calls: AtomicUsize,

    pub revenue_fn: Option<
        Arc<dyn Fn(&Stock, DateRange) -> Result<Vec<RevenueRecord>, CaibaoError> + Send + Sync>,
    >,
    pub price_fn: Option<
        Arc<dyn Fn(&Stock, DateRange) -> Result<Vec<PricePoint>, CaibaoError> + Send + Sync>,
    >,
    pub catalog_fn: Option<Arc<dyn Fn() -> Result<Vec<Stock>, CaibaoError> + Send + Sync>>,
}

impl MockConnector {
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }

    /// Number of provider calls served so far, across capabilities.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

#[async_trait]
impl RevenueProvider for MockConnector {
    async fn monthly_revenue(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<RevenueRecord>, CaibaoError> {
        self.enter().await;
        match &self.revenue_fn {
            Some(f) => (f)(stock, range),
            None => Err(CaibaoError::unsupported("monthly-revenue")),
        }
    }
}

#[async_trait]
impl PriceProvider for MockConnector {
    async fn daily_prices(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, CaibaoError> {
        self.enter().await;
        match &self.price_fn {
            Some(f) => (f)(stock, range),
            None => Err(CaibaoError::unsupported("daily-prices")),
        }
    }
}

#[async_trait]
impl CatalogProvider for MockConnector {
    async fn stock_catalog(&self) -> Result<Vec<Stock>, CaibaoError> {
        self.enter().await;
        match &self.catalog_fn {
            Some(f) => (f)(),
            None => Err(CaibaoError::unsupported("stock-catalog")),
        }
    }
}

impl CaibaoConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_revenue_provider(&self) -> Option<&dyn RevenueProvider> {
        if self.revenue_fn.is_some() {
            Some(self as &dyn RevenueProvider)
        } else {
            None
        }
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        if self.price_fn.is_some() {
            Some(self as &dyn PriceProvider)
        } else {
            None
        }
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        if self.catalog_fn.is_some() {
            Some(self as &dyn CatalogProvider)
        } else {
            None
        }
    }
}

/* ---------- Tiny builder helpers used by tests ---------- */

pub struct MockConnectorBuilder {
    name: &'static str,
    delay_ms: u64,
    revenue_fn: Option<
        Arc<dyn Fn(&Stock, DateRange) -> Result<Vec<RevenueRecord>, CaibaoError> + Send + Sync>,
    >,
    price_fn: Option<
        Arc<dyn Fn(&Stock, DateRange) -> Result<Vec<PricePoint>, CaibaoError> + Send + Sync>,
    >,
    catalog_fn: Option<Arc<dyn Fn() -> Result<Vec<Stock>, CaibaoError> + Send + Sync>>,
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            name: "default_mock",
            delay_ms: 0,
            revenue_fn: None,
            price_fn: None,
            catalog_fn: None,
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.delay_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_revenue_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Stock, DateRange) -> Result<Vec<RevenueRecord>, CaibaoError> + Send + Sync + 'static,
    {
        self.revenue_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_revenue_ok(mut self, rows: Vec<RevenueRecord>) -> Self {
        self.revenue_fn = Some(Arc::new(move |_s, _r| Ok(rows.clone())));
        self
    }

    pub fn with_price_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Stock, DateRange) -> Result<Vec<PricePoint>, CaibaoError> + Send + Sync + 'static,
    {
        self.price_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_prices_ok(mut self, rows: Vec<PricePoint>) -> Self {
        self.price_fn = Some(Arc::new(move |_s, _r| Ok(rows.clone())));
        self
    }

    pub fn with_catalog_fn<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Result<Vec<Stock>, CaibaoError> + Send + Sync + 'static,
    {
        self.catalog_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_catalog_ok(mut self, stocks: Vec<Stock>) -> Self {
        self.catalog_fn = Some(Arc::new(move || Ok(stocks.clone())));
        self
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            delay_ms: self.delay_ms,
            calls: AtomicUsize::new(0),
            revenue_fn: self.revenue_fn,
            price_fn: self.price_fn,
            catalog_fn: self.catalog_fn,
        })
    }
}

/// Convenience constructor for a revenue-only mock connector.
pub fn m_revenue(name: &'static str, rows: Vec<RevenueRecord>) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_revenue_ok(rows)
        .build()
}

/// Convenience constructor for a price-only mock connector.
pub fn m_prices(name: &'static str, rows: Vec<PricePoint>) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_prices_ok(rows)
        .build()
}

/// Convenience constructor for a catalog-only mock connector.
pub fn m_catalog(name: &'static str, stocks: Vec<Stock>) -> Arc<MockConnector> {
    MockConnector::builder()
        .name(name)
        .returns_catalog_ok(stocks)
        .build()
}
