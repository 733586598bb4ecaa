//! Monthly series combination.
//!
//! Three stages run in order over one fetch cycle:
//! - `monthly`: group daily closes by calendar month and average them
//! - `align`: pair each revenue report with the previous month's average price
//!   and the same month's report one year earlier
//! - `compose`: build rescaled, rounded, ordered and windowed output records
/// Revenue/price alignment and year-over-year growth.
pub mod align;
/// Record composition, ordering and suffix windowing.
pub mod compose;
/// Monthly mean of daily closes.
pub mod monthly;

/// Round to two decimal places, halves away from zero.
///
/// Non-finite inputs are returned unchanged.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
