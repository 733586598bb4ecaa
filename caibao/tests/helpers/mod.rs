// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

pub use mock_connector::{MockConnector, m_catalog, m_prices, m_revenue};

use caibao_core::{DateRange, PricePoint, RevenueRecord, Stock};
use chrono::NaiveDate;

// ---------- Lightweight fixtures and helpers for tests ----------

pub const TSMC: &str = "2330";

/// Construct a date from components for readability in tests.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

pub fn tsmc() -> Stock {
    Stock::new(TSMC, "台積電")
}

pub fn range_2024() -> DateRange {
    DateRange::try_new(d(2024, 1, 1), d(2024, 12, 31)).expect("ordered range")
}

/// One revenue report per month starting at `(year, month)`, published on the
/// 10th, with revenue `base + i * step`.
pub fn revenue_series(year: i32, month: u32, n: u32, base: f64, step: f64) -> Vec<RevenueRecord> {
    (0..n)
        .map(|i| {
            let m0 = month - 1 + i;
            let y = year + i32::try_from(m0 / 12).expect("small");
            let date = d(y, m0 % 12 + 1, 10);
            RevenueRecord::new(date, base + f64::from(i) * step)
        })
        .collect()
}

/// Two closes per month (the 5th and the 20th) starting at `(year, month)`.
pub fn price_series(year: i32, month: u32, n: u32, close: f64) -> Vec<PricePoint> {
    (0..n)
        .flat_map(|i| {
            let m0 = month - 1 + i;
            let y = year + i32::try_from(m0 / 12).expect("small");
            let m = m0 % 12 + 1;
            [
                PricePoint::new(d(y, m, 5), close - 1.0),
                PricePoint::new(d(y, m, 20), close + 1.0),
            ]
        })
        .collect()
}
