use crate::timeseries::align::{AlignedRevenue, align_revenue, yoy_growth};
use crate::timeseries::monthly::monthly_average_prices;
use crate::timeseries::round2;
use crate::{ComposedRecord, PricePoint, REVENUE_SCALE, RevenueRecord, TimeRange};

/// Merge revenue records with their alignment results into composed records.
///
/// `records` and `aligned` are paired by position; extra entries on either
/// side are ignored. Each record is labelled with its lagged price month.
/// The output is sorted ascending by month, holds at most one record per month
/// (the first in input order wins) and keeps only the last `window.months()`
/// records.
#[must_use]
pub fn compose(
    records: &[RevenueRecord],
    aligned: &[AlignedRevenue],
    window: TimeRange,
) -> Vec<ComposedRecord> {
    let mut out: Vec<ComposedRecord> = records
        .iter()
        .zip(aligned)
        .map(|(r, a)| ComposedRecord {
            month: a.price_month,
            revenue: r.revenue / REVENUE_SCALE,
            avg_price: round2(a.avg_price),
            revenue_growth: yoy_growth(r.revenue, a.prior_year_revenue),
        })
        .collect();

    // stable: equal months stay in input order, so dedup keeps the first
    out.sort_by_key(|c| c.month);
    let before = out.len();
    out.dedup_by_key(|c| c.month);
    if out.len() != before {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            dropped = before - out.len(),
            "duplicate revenue months in feed; kept first occurrence"
        );
    }

    let keep = window.months();
    if out.len() > keep {
        out.drain(..out.len() - keep);
    }
    out
}

/// Run the full combiner over one fetch cycle's feeds.
///
/// Returns an empty vector when either feed is empty. Pure and deterministic:
/// identical inputs produce bit-identical output.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(revenues, prices),
        fields(revenues = revenues.len(), prices = prices.len()),
    )
)]
#[must_use]
pub fn combine_series(
    revenues: &[RevenueRecord],
    prices: &[PricePoint],
    window: TimeRange,
) -> Vec<ComposedRecord> {
    if revenues.is_empty() || prices.is_empty() {
        return Vec::new();
    }
    let monthly = monthly_average_prices(prices);
    let aligned = align_revenue(revenues, &monthly);
    compose(revenues, &aligned, window)
}
