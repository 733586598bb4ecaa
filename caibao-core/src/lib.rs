//! caibao-core
//!
//! Connector traits and the pure series combiner shared across the caibao
//! workspace.
//!
//! - `types`: re-exports of the DTOs from `caibao-types`.
//! - `connector`: the `CaibaoConnector` trait and capability provider traits.
//! - `timeseries`: the price aggregator, revenue aligner and metric composer.
//! - `selection`, `table`, `format`: framework-free presentation state for
//!   whatever renders the composed records.
//! - `snapshot`, `catalog`: latest-close summary and stock list helpers.
//!
//! Nothing in this crate performs I/O. The combiner is a synchronous, pure
//! function of its inputs and is safe to call concurrently.
#![warn(missing_docs)]

/// Stock list de-duplication and search filtering.
pub mod catalog;
/// Connector capability traits and the primary `CaibaoConnector` interface.
pub mod connector;
/// Number formatting for table cells.
pub mod format;
/// Chart metric selection with bounded size.
pub mod selection;
/// Latest trading day summary derived from daily prices.
pub mod snapshot;
/// Pivoted detail table built from composed records.
pub mod table;
/// Monthly aggregation, alignment and composition of revenue and price series.
pub mod timeseries;
pub mod types;

pub use catalog::{dedup_stocks, filter_stocks};
pub use connector::CaibaoConnector;
pub use format::{format_grouped, format_percentage};
pub use selection::{ChartMetric, ChartSelection};
pub use snapshot::stock_info_from_prices;
pub use table::{DetailTable, GrowthTone, TableRow};
pub use timeseries::align::{AlignedRevenue, align_revenue, prior_year_revenue, yoy_growth};
pub use timeseries::compose::{combine_series, compose};
pub use timeseries::monthly::{MonthlyAveragePrice, monthly_average_prices};
pub use timeseries::round2;
pub use types::*;
