//! Caibao-specific data transfer objects and configuration primitives.
//!
//! These are the shapes exchanged between connectors, the series combiner, and
//! whatever renders the result. Field names of [`ComposedRecord`] and [`Stock`]
//! are part of the wire contract with the rendering layer and must not change.
#![warn(missing_docs)]

mod capability;
mod composed;
mod config;
mod error;
mod month;
mod range;
mod reports;
mod series;

pub use capability::Capability;
pub use composed::{ComposedRecord, DISPLAY_REVENUE_SCALE, REVENUE_SCALE, StockInfo};
pub use config::{CaibaoConfig, ConnectorKey, FetchStrategy};
pub use error::CaibaoError;
pub use month::MonthKey;
pub use range::{DateRange, TimeRange};
pub use reports::{CatalogReport, FinancialsReport};
pub use series::{PricePoint, RevenueRecord, Stock};
