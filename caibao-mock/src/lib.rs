//! caibao-mock
//!
//! Connectors with deterministic data for tests and demos.
//!
//! - [`MockConnector`] serves generated revenue and price series for `2330`,
//!   `2317` and `2454`. The stock id `FAIL` always errors and `TIMEOUT` answers
//!   after a short delay.
//! - [`DynamicMockConnector`] defers every answer to a [`DynamicMockController`]
//!   so tests can script per-stock successes, failures and hangs.
use std::time::Duration;

use async_trait::async_trait;
use caibao_core::connector::{CaibaoConnector, CatalogProvider, PriceProvider, RevenueProvider};
use caibao_core::{CaibaoError, DateRange, PricePoint, RevenueRecord, Stock};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Delay applied to the `TIMEOUT` stock id.
pub const TIMEOUT_DELAY: Duration = Duration::from_millis(200);

/// Mock connector for CI-safe demos. Provides deterministic data from generated fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Name reported by [`CaibaoConnector::name`].
    pub const NAME: &'static str = "caibao-mock";

    /// Create the connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(stock_id: &str, capability: &str) -> Result<(), CaibaoError> {
        match stock_id {
            "FAIL" => Err(CaibaoError::connector(
                Self::NAME,
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                tokio::time::sleep(TIMEOUT_DELAY).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    // TIMEOUT answers like a real stock once its delay has passed.
    fn fixture_id(stock_id: &str) -> &str {
        if stock_id == "TIMEOUT" { "2330" } else { stock_id }
    }
}

#[async_trait]
impl CaibaoConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_revenue_provider(&self) -> Option<&dyn RevenueProvider> {
        Some(self as &dyn RevenueProvider)
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        Some(self as &dyn PriceProvider)
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }
}

#[async_trait]
impl RevenueProvider for MockConnector {
    async fn monthly_revenue(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<RevenueRecord>, CaibaoError> {
        let id = stock.stock_id.as_str();
        Self::maybe_fail_or_timeout(id, "monthly-revenue").await?;
        fixtures::revenue::by_stock_id(Self::fixture_id(id), range)
            .ok_or_else(|| CaibaoError::not_found(format!("monthly revenue for {id}")))
    }
}

#[async_trait]
impl PriceProvider for MockConnector {
    async fn daily_prices(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, CaibaoError> {
        let id = stock.stock_id.as_str();
        Self::maybe_fail_or_timeout(id, "daily-prices").await?;
        fixtures::prices::by_stock_id(Self::fixture_id(id), range)
            .ok_or_else(|| CaibaoError::not_found(format!("daily prices for {id}")))
    }
}

#[async_trait]
impl CatalogProvider for MockConnector {
    async fn stock_catalog(&self) -> Result<Vec<Stock>, CaibaoError> {
        Ok(fixtures::stocks::catalog())
    }
}
