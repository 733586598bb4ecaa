use caibao_core::{DateRange, RevenueRecord};
use chrono::{Datelike, Months, NaiveDate};

use super::COVERAGE;
use super::stocks::profile;

// January and February dip around the lunar new year; Q4 peaks.
const SEASONAL: [f64; 12] = [
    0.96, 0.84, 1.0, 0.98, 1.01, 1.0, 1.03, 1.05, 1.04, 1.07, 1.06, 1.09,
];

/// Monthly reports published within `range`, one per month, ascending.
pub fn by_stock_id(stock_id: &str, range: DateRange) -> Option<Vec<RevenueRecord>> {
    let p = profile(stock_id)?;
    let mut out = Vec::new();
    let mut date = COVERAGE.0;
    while date <= COVERAGE.1 && date <= range.end() {
        if date >= range.start() {
            let period = date - Months::new(1);
            let years = f64::from(period.year() - COVERAGE.0.year());
            let raw = p.base_revenue
                * (1.0 + p.yearly_growth).powf(years)
                * SEASONAL[period.month0() as usize];
            out.push(RevenueRecord {
                date,
                revenue: raw.round(),
                revenue_year: Some(period.year()),
                revenue_month: Some(period.month()),
            });
        }
        date = match date.checked_add_months(Months::new(1)) {
            Some(d) => d,
            None => break,
        };
    }
    Some(out)
}
