use caibao_core::{DateRange, PricePoint};
use chrono::{Datelike, Days, Weekday};

use super::COVERAGE;
use super::stocks::profile;

/// Weekday closes within `range`, ascending.
///
/// Closes follow a linear drift plus a short repeating wobble, rounded to the
/// exchange's 0.5 tick.
pub fn by_stock_id(stock_id: &str, range: DateRange) -> Option<Vec<PricePoint>> {
    let p = profile(stock_id)?;
    let mut out = Vec::new();
    let mut date = COVERAGE.0;
    let mut trading_day: u32 = 0;
    while date <= COVERAGE.1 && date <= range.end() {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            if date >= range.start() {
                let wobble = f64::from((trading_day * 7) % 13) - 6.0;
                let close = (p.base_price + p.daily_drift * f64::from(trading_day) + wobble).max(1.0);
                out.push(PricePoint {
                    date,
                    close: (close * 2.0).round() / 2.0,
                    volume: Some(20_000_000 + u64::from((trading_day * 7_919) % 9_000_000)),
                });
            }
            trading_day += 1;
        }
        date = match date.checked_add_days(Days::new(1)) {
            Some(d) => d,
            None => break,
        };
    }
    Some(out)
}
