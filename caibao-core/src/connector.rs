use async_trait::async_trait;

use crate::{CaibaoError, DateRange, PricePoint, RevenueRecord, Stock};
pub use caibao_types::ConnectorKey;

/// Focused role trait for connectors that provide monthly revenue reports.
#[async_trait]
pub trait RevenueProvider: Send + Sync {
    /// Fetch monthly revenue records for `stock` published within `range`.
    ///
    /// Records may be returned in any order. An empty vector is a valid answer
    /// (the stock exists but nothing was published in the range).
    async fn monthly_revenue(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<RevenueRecord>, CaibaoError>;
}

/// Focused role trait for connectors that provide daily closing prices.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch daily closes for `stock` on trading days within `range`.
    async fn daily_prices(
        &self,
        stock: &Stock,
        range: DateRange,
    ) -> Result<Vec<PricePoint>, CaibaoError>;
}

/// Focused role trait for connectors that can list the stocks they cover.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the full stock list. Duplicates are allowed; callers de-duplicate.
    async fn stock_catalog(&self) -> Result<Vec<Stock>, CaibaoError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait CaibaoConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "caibao-finmind").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// If implemented, returns a trait object for monthly revenue.
    fn as_revenue_provider(&self) -> Option<&dyn RevenueProvider> {
        None
    }

    /// If implemented, returns a trait object for daily prices.
    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        None
    }

    /// If implemented, returns a trait object for the stock catalog.
    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        None
    }
}
