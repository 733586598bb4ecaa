use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with router endpoints and allow consistent
/// Display formatting and match-exhaustive handling when adding
/// new capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Monthly revenue reports for a single stock.
    MonthlyRevenue,
    /// Daily closing prices for a single stock.
    DailyPrices,
    /// Listing of all known stocks (identifier and display name).
    StockCatalog,
    /// Combined revenue + price view computed from both raw series.
    Financials,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MonthlyRevenue => "monthly-revenue",
            Self::DailyPrices => "daily-prices",
            Self::StockCatalog => "stock-catalog",
            Self::Financials => "financials",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
