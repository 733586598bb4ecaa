use crate::timeseries::monthly::MonthlyAveragePrice;
use crate::timeseries::round2;
use crate::{MonthKey, RevenueRecord};

/// Alignment result for one revenue record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRevenue {
    /// Month whose prices were paired with the report: the month before the
    /// report's own month.
    pub price_month: MonthKey,
    /// Unrounded average close of `price_month`; `0` when that month had no prices.
    pub avg_price: f64,
    /// Raw revenue of the same month one year earlier, if reported.
    pub prior_year_revenue: Option<f64>,
}

/// Locate the report for the same calendar month one year before `record`.
///
/// When the feed carries several reports for that month, the first one in
/// `records` order is returned.
#[must_use]
pub fn prior_year_revenue<'a>(
    records: &'a [RevenueRecord],
    record: &RevenueRecord,
) -> Option<&'a RevenueRecord> {
    let target = record.month().same_month_prior_year();
    records.iter().find(|r| r.month() == target)
}

/// Year-over-year growth in percent, rounded to two decimals.
///
/// Returns `0` when there is no prior-year figure, and also when the prior
/// figure is zero since the ratio is undefined.
#[must_use]
pub fn yoy_growth(current: f64, prior: Option<f64>) -> f64 {
    match prior {
        Some(p) if p != 0.0 => round2((current - p) / p * 100.0),
        _ => 0.0,
    }
}

/// Pair every revenue record with its lagged average price and prior-year
/// revenue. The output has one entry per input record, in input order.
#[must_use]
pub fn align_revenue(
    records: &[RevenueRecord],
    prices: &MonthlyAveragePrice,
) -> Vec<AlignedRevenue> {
    records
        .iter()
        .map(|r| {
            let price_month = r.month().prev();
            AlignedRevenue {
                price_month,
                avg_price: prices.get(price_month).unwrap_or(0.0),
                prior_year_revenue: prior_year_revenue(records, r).map(|p| p.revenue),
            }
        })
        .collect()
}
