use crate::{PricePoint, StockInfo};

/// Summarize the latest trading day of `prices`.
///
/// The latest and previous points are chosen by date, so feed order does not
/// matter; on equal dates the later one in the feed wins. With a single point
/// the change is zero. Returns `None` for an empty feed.
#[must_use]
pub fn stock_info_from_prices(prices: &[PricePoint]) -> Option<StockInfo> {
    let mut latest: Option<&PricePoint> = None;
    let mut previous: Option<&PricePoint> = None;
    for p in prices {
        match latest {
            Some(l) if p.date < l.date => {
                if previous.is_none_or(|prev| p.date >= prev.date) {
                    previous = Some(p);
                }
            }
            _ => {
                previous = latest;
                latest = Some(p);
            }
        }
    }

    let latest = latest?;
    let base = previous.map_or(latest.close, |p| p.close);
    let change = latest.close - base;
    let change_percent = if base == 0.0 { 0.0 } else { change / base * 100.0 };
    Some(StockInfo {
        current_price: latest.close,
        change,
        change_percent,
        volume: latest.volume.unwrap_or(0),
        date: latest.date,
    })
}
