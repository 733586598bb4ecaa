use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::{MonthKey, PricePoint};

/// Mean close per calendar month.
///
/// A month with no price points is absent, never zero. Iteration is in
/// ascending month order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyAveragePrice(BTreeMap<MonthKey, f64>);

impl MonthlyAveragePrice {
    /// Average close for `month`, if any price point fell in it.
    #[must_use]
    pub fn get(&self, month: MonthKey) -> Option<f64> {
        self.0.get(&month).copied()
    }

    /// Number of months with at least one price point.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no price points were aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Months and their averages, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(MonthKey, f64)> for MonthlyAveragePrice {
    fn from_iter<I: IntoIterator<Item = (MonthKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Group `prices` by calendar month and reduce each group to the arithmetic
/// mean of its closes.
///
/// Input order does not matter for which months appear; closes are summed in
/// input order. No weighting or outlier rejection is applied, so a single
/// extreme close moves the month's average.
#[must_use]
pub fn monthly_average_prices(prices: &[PricePoint]) -> MonthlyAveragePrice {
    let mut acc: BTreeMap<MonthKey, (f64, u32)> = BTreeMap::new();
    for p in prices {
        match acc.entry(p.month()) {
            Entry::Vacant(v) => {
                v.insert((p.close, 1));
            }
            Entry::Occupied(mut o) => {
                let (sum, n) = o.get_mut();
                *sum += p.close;
                *n += 1;
            }
        }
    }
    acc.into_iter()
        .map(|(month, (sum, n))| (month, sum / f64::from(n)))
        .collect()
}
