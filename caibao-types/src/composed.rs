//! Output record of the series combiner, one per reporting month.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::MonthKey;

/// Divisor applied to raw revenue when a record is composed.
pub const REVENUE_SCALE: f64 = 1_000_000.0;

/// Multiplier the display layer applies to a composed `revenue` to show
/// thousands of currency units.
///
/// The two-step scaling (÷10⁶ on composition, ×10³ on display) is part of the
/// numeric contract with the rendering layer; collapsing it into a single
/// ÷10³ changes the values carried in [`ComposedRecord::revenue`].
pub const DISPLAY_REVENUE_SCALE: f64 = 1_000.0;

/// The series combiner's output unit: one month of revenue, price and growth.
///
/// Serialized field names (`month`, `revenue`, `avgPrice`, `revenueGrowth`)
/// are consumed verbatim by chart and table renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedRecord {
    /// Month the record describes.
    pub month: MonthKey,
    /// Raw revenue divided by [`REVENUE_SCALE`].
    pub revenue: f64,
    /// Mean closing price of `month`, two decimals; `0` when no price data exists.
    pub avg_price: f64,
    /// Year-over-year revenue growth in percent, two decimals; `0` when no
    /// prior-year report exists.
    pub revenue_growth: f64,
}

impl ComposedRecord {
    /// Revenue in thousands of currency units, as shown by the display layer.
    #[must_use]
    pub fn revenue_for_display(&self) -> f64 {
        self.revenue * DISPLAY_REVENUE_SCALE
    }
}

/// Snapshot of the latest trading day derived from a daily price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    /// Latest close.
    pub current_price: f64,
    /// Latest close minus the previous close.
    pub change: f64,
    /// `change` relative to the previous close, in percent.
    pub change_percent: f64,
    /// Shares traded on the latest day (`0` when unknown).
    pub volume: u64,
    /// Latest trading day.
    pub date: NaiveDate,
}
