//! Calendar month key used to join series sampled at different granularities.

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::CaibaoError;

/// Year + month truncation of a calendar date.
///
/// Two dates map to the same key iff they share calendar year and month,
/// regardless of day. Keys order chronologically. Serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key from a year and a 1-based month.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, CaibaoError> {
        if !(1..=12).contains(&month) {
            return Err(CaibaoError::InvalidArg(format!(
                "month must be within 1..=12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Truncate a date to its month.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Calendar month, 1-based.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The month immediately before this one (January rolls back to December).
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The same calendar month one year earlier.
    #[must_use]
    pub const fn same_month_prior_year(self) -> Self {
        Self {
            year: self.year - 1,
            month: self.month,
        }
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = CaibaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CaibaoError::InvalidArg(format!("expected YYYY-MM month key, got {s:?}"));
        let (y, m) = s.split_once('-').ok_or_else(bad)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(bad());
        }
        let year = y.parse::<i32>().map_err(|_| bad())?;
        let month = m.parse::<u32>().map_err(|_| bad())?;
        Self::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
