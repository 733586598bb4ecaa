//! caibao-finmind
//!
//! Public connector that implements `CaibaoConnector` on top of the FinMind v4
//! data API. Exposes monthly revenue (`TaiwanStockMonthRevenue`), daily prices
//! (`TaiwanStockPrice`) and the listed stock catalog (`TaiwanStockInfo`).
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// Builder for configuring the HTTP client, base URL and API token.
pub mod builder;

use std::sync::Arc;

#[cfg(feature = "test-adapters")]
use adapter::CloneArcAdapters;
#[cfg(not(feature = "test-adapters"))]
use adapter::RealAdapter;
use adapter::{
    CONNECTOR_NAME, FmCatalog, FmPriceRow, FmPrices, FmRevenue, FmRevenueRow, FmStockInfoRow,
};
use async_trait::async_trait;
use caibao_core::{
    CaibaoError, DateRange, PricePoint, RevenueRecord, Stock,
    connector::{CaibaoConnector, CatalogProvider, ConnectorKey, PriceProvider, RevenueProvider},
};
use chrono::NaiveDate;

pub use builder::FinMindConnectorBuilder;

#[cfg(not(feature = "test-adapters"))]
type AdapterArc = Arc<RealAdapter>;

#[cfg(feature = "test-adapters")]
type RevenueAdapter = Arc<dyn FmRevenue>;
#[cfg(not(feature = "test-adapters"))]
type RevenueAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type PricesAdapter = Arc<dyn FmPrices>;
#[cfg(not(feature = "test-adapters"))]
type PricesAdapter = AdapterArc;

#[cfg(feature = "test-adapters")]
type CatalogAdapter = Arc<dyn FmCatalog>;
#[cfg(not(feature = "test-adapters"))]
type CatalogAdapter = AdapterArc;

/// Public connector type. Production users construct it through
/// [`FinMindConnector::builder`].
pub struct FinMindConnector {
    revenue: RevenueAdapter,
    prices: PricesAdapter,
    catalog: CatalogAdapter,
}

impl FinMindConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new(CONNECTOR_NAME);

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("data_id is not")
    }

    fn normalize_error(e: CaibaoError, what: &str) -> CaibaoError {
        match e {
            CaibaoError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    CaibaoError::not_found(what.to_string())
                } else {
                    CaibaoError::connector(CONNECTOR_NAME, msg)
                }
            }
            CaibaoError::RateLimited { connector: _, msg } => {
                CaibaoError::rate_limited(CONNECTOR_NAME, msg)
            }
            CaibaoError::Other(msg) => CaibaoError::connector(CONNECTOR_NAME, msg),
            other => other,
        }
    }

    /// Start configuring a connector.
    #[must_use]
    pub fn builder() -> FinMindConnectorBuilder {
        FinMindConnectorBuilder::new()
    }

    /// For tests/injection (requires the `test-adapters` feature).
    ///
    /// Accepts a borrowed adapter to avoid unnecessary moves.
    #[cfg(feature = "test-adapters")]
    pub fn from_adapter<A: CloneArcAdapters + 'static>(adapter: &A) -> Self {
        Self {
            revenue: adapter.clone_arc_revenue(),
            prices: adapter.clone_arc_prices(),
            catalog: adapter.clone_arc_catalog(),
        }
    }

    #[cfg(not(feature = "test-adapters"))]
    /// Build from a concrete `RealAdapter` by cloning it into shared handles.
    pub fn from_adapter(adapter: &RealAdapter) -> Self {
        let shared = Arc::new(adapter.clone());
        Self {
            revenue: Arc::clone(&shared),
            prices: Arc::clone(&shared),
            catalog: shared,
        }
    }
}

fn parse_date(raw: &str, what: &str) -> Result<NaiveDate, CaibaoError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| CaibaoError::Data(format!("{what}: malformed date {raw:?}: {e}")))
}

fn revenue_from_row(row: FmRevenueRow) -> Result<RevenueRecord, CaibaoError> {
    let date = parse_date(&row.date, "monthly revenue")?;
    if !row.revenue.is_finite() || row.revenue < 0.0 {
        return Err(CaibaoError::Data(format!(
            "monthly revenue for {} on {}: invalid amount {}",
            row.stock_id, row.date, row.revenue
        )));
    }
    Ok(RevenueRecord {
        date,
        revenue: row.revenue,
        revenue_year: row.revenue_year,
        revenue_month: row.revenue_month,
    })
}

fn price_from_row(row: FmPriceRow) -> Result<PricePoint, CaibaoError> {
    let date = parse_date(&row.date, "daily price")?;
    Ok(PricePoint {
        date,
        close: row.close,
        volume: row.trading_volume,
    })
}

fn stock_from_row(row: FmStockInfoRow) -> Stock {
    Stock::new(row.stock_id, row.stock_name)
}

#[async_trait]
impl RevenueProvider for FinMindConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "caibao_finmind::monthly_revenue",
            skip(self, stock, range),
            fields(stock_id = %stock.stock_id, range = %range),
        )
    )]
    async fn monthly_revenue(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<RevenueRecord>, CaibaoError> {
        let what = format!("monthly revenue for {}", stock.stock_id);
        let rows = self
            .revenue
            .month_revenue(&stock.stock_id, range)
            .await
            .map_err(|e| Self::normalize_error(e, &what))?;
        rows.into_iter().map(revenue_from_row).collect()
    }
}

#[async_trait]
impl PriceProvider for FinMindConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "caibao_finmind::daily_prices",
            skip(self, stock, range),
            fields(stock_id = %stock.stock_id, range = %range),
        )
    )]
    async fn daily_prices(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, CaibaoError> {
        let what = format!("daily prices for {}", stock.stock_id);
        let rows = self
            .prices
            .daily_price(&stock.stock_id, range)
            .await
            .map_err(|e| Self::normalize_error(e, &what))?;
        rows.into_iter().map(price_from_row).collect()
    }
}

#[async_trait]
impl CatalogProvider for FinMindConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "caibao_finmind::stock_catalog", skip(self))
    )]
    async fn stock_catalog(&self) -> Result<Vec<Stock>, CaibaoError> {
        let rows = self
            .catalog
            .stock_info()
            .await
            .map_err(|e| Self::normalize_error(e, "stock catalog"))?;
        if rows.is_empty() {
            return Err(CaibaoError::not_found("stock catalog"));
        }
        Ok(rows.into_iter().map(stock_from_row).collect())
    }
}

#[async_trait]
impl CaibaoConnector for FinMindConnector {
    fn name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn vendor(&self) -> &'static str {
        "FinMind"
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
