//! Raw records produced by connectors and consumed by the series combiner.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::MonthKey;

/// A listed stock: exchange identifier plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stock {
    /// Exchange identifier, e.g. `"2330"`.
    pub stock_id: String,
    /// Display name, e.g. `"台積電"`.
    pub stock_name: String,
}

impl Stock {
    /// Convenience constructor.
    pub fn new(stock_id: impl Into<String>, stock_name: impl Into<String>) -> Self {
        Self {
            stock_id: stock_id.into(),
            stock_name: stock_name.into(),
        }
    }

    /// Identifier-only stock, for callers that do not know the display name.
    pub fn from_id(stock_id: impl Into<String>) -> Self {
        let id = stock_id.into();
        Self {
            stock_name: id.clone(),
            stock_id: id,
        }
    }
}

/// One monthly revenue report.
///
/// `date` is the first day of the reporting period as published by the
/// provider; `revenue` is expressed in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    /// Publication date of the report.
    pub date: NaiveDate,
    /// Revenue in the smallest currency unit (non-negative).
    pub revenue: f64,
    /// Fiscal year the revenue belongs to, when the provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_year: Option<i32>,
    /// Fiscal month the revenue belongs to, when the provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_month: Option<u32>,
}

impl RevenueRecord {
    /// Record with only the fields the combiner needs.
    #[must_use]
    pub const fn new(date: NaiveDate, revenue: f64) -> Self {
        Self {
            date,
            revenue,
            revenue_year: None,
            revenue_month: None,
        }
    }

    /// Month of the publication date.
    #[must_use]
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

/// One daily close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading day.
    pub date: NaiveDate,
    /// Closing price (positive).
    pub close: f64,
    /// Shares traded, when the provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

impl PricePoint {
    /// Point without volume information.
    #[must_use]
    pub const fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close,
            volume: None,
        }
    }

    /// Month of the trading day.
    #[must_use]
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}
