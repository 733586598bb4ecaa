//! Caibao orchestrates monthly revenue and price requests across data providers
//! and turns them into the composed monthly series a financial report viewer shows.
//!
//! Overview
//! - Routes requests to connectors that implement the `caibao_core` contracts.
//! - Applies a preferred connector order, per-provider timeouts and fallback.
//! - Fetches a stock's revenue and prices concurrently and runs the series
//!   combiner only when both fetches succeed.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: deterministic order, per-provider timeout, aggregates
//!     errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races eligible providers; lowest tail latency but higher request fanout.
//! - Catalog: every catalog provider is queried and the lists are merged, first
//!   `stock_id` wins. Partial failures surface as warnings.
//! - Fetch range: one year more than the display window so that the earliest
//!   displayed month has both its lagged price and a prior-year report.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use caibao::{Caibao, Stock, TimeRange};
//!
//! let caibao = Caibao::builder()
//!     .with_connector(Arc::new(caibao_finmind::FinMindConnector::builder().build()?))
//!     .build()?;
//!
//! let report = caibao
//!     .financials(&Stock::new("2330", "台積電"), TimeRange::Y5)
//!     .await?;
//! for r in &report.records {
//!     println!("{} {:.2} {:.2} {:.2}%", r.month, r.revenue, r.avg_price, r.revenue_growth);
//! }
//! ```
//!
//! See `demos/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use caibao_core::{CaibaoConfig, FetchStrategy};
pub use chrono_tz::Tz;
pub use core::{Caibao, CaibaoBuilder};
pub use router::util::{collapse_errors, join_with_deadline};

// Re-export core types for convenience
pub use caibao_core::{
    CaibaoConnector, CaibaoError, Capability, CatalogReport, ChartMetric, ChartSelection,
    ComposedRecord, ConnectorKey, DateRange, DetailTable, FinancialsReport, MonthKey, PricePoint,
    RevenueRecord, Stock, StockInfo, TimeRange,
};
