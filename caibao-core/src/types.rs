//! Re-export of foundational types from `caibao-types`.
// Consolidated so connectors and the orchestrator can depend on `caibao-core` only

pub use caibao_types::{CaibaoError, Capability};

pub use caibao_types::{CaibaoConfig, ConnectorKey, FetchStrategy};
pub use caibao_types::{CatalogReport, FinancialsReport};
pub use caibao_types::{ComposedRecord, DISPLAY_REVENUE_SCALE, REVENUE_SCALE, StockInfo};
pub use caibao_types::{DateRange, MonthKey, TimeRange};
pub use caibao_types::{PricePoint, RevenueRecord, Stock};
