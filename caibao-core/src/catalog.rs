use std::collections::HashSet;

use crate::Stock;

/// Drop repeated `stock_id`s, keeping the first occurrence and input order.
#[must_use]
pub fn dedup_stocks(stocks: Vec<Stock>) -> Vec<Stock> {
    let mut seen: HashSet<String> = HashSet::with_capacity(stocks.len());
    stocks
        .into_iter()
        .filter(|s| seen.insert(s.stock_id.clone()))
        .collect()
}

/// Stocks whose id or name contains `query`, ignoring case.
///
/// An empty or whitespace-only query matches everything.
#[must_use]
pub fn filter_stocks<'a>(stocks: &'a [Stock], query: &str) -> Vec<&'a Stock> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return stocks.iter().collect();
    }
    stocks
        .iter()
        .filter(|s| {
            s.stock_id.to_lowercase().contains(&needle)
                || s.stock_name.to_lowercase().contains(&needle)
        })
        .collect()
}
