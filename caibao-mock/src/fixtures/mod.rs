pub mod prices;
pub mod revenue;
pub mod stocks;

use chrono::NaiveDate;

/// First and last day covered by the generated series.
pub const COVERAGE: (NaiveDate, NaiveDate) = (
    match NaiveDate::from_ymd_opt(2013, 1, 1) {
        Some(d) => d,
        None => panic!("valid fixture start"),
    },
    match NaiveDate::from_ymd_opt(2026, 12, 31) {
        Some(d) => d,
        None => panic!("valid fixture end"),
    },
);
