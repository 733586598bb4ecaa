//! Report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::{CaibaoError, ComposedRecord, DateRange, Stock, StockInfo, TimeRange};

/// Result of one fetch + combine cycle for a stock.
///
/// `records` is empty when either upstream feed came back empty; renderers
/// show their "no data" placeholder in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialsReport {
    /// Stock the report describes.
    pub stock: Stock,
    /// Display window used for truncation.
    pub window: TimeRange,
    /// Date range requested upstream.
    pub range: DateRange,
    /// Composed monthly records, ascending by month.
    pub records: Vec<ComposedRecord>,
    /// Latest-close snapshot, if the price feed had any points.
    pub stock_info: Option<StockInfo>,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<CaibaoError>,
}

/// Merged stock listing across catalog providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CatalogReport {
    /// De-duplicated stocks in provider priority order.
    pub stocks: Vec<crate::Stock>,
    /// Providers that failed while others succeeded.
    pub warnings: Vec<CaibaoError>,
}
