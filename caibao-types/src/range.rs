//! Date ranges for upstream requests and the selectable display window.

use core::fmt;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::CaibaoError;

/// Inclusive calendar-date range `[start, end]` passed to connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a validated range.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `start` is after `end`.
    pub fn try_new(start: NaiveDate, end: NaiveDate) -> Result<Self, CaibaoError> {
        if start > end {
            return Err(CaibaoError::InvalidArg(format!(
                "range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// First day included.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day included.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Selectable display window, in years.
///
/// Only the enumerated values are accepted; the composer keeps the most recent
/// `years × 12` composed months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeRange {
    /// Last year.
    Y1,
    /// Last three years.
    Y3,
    /// Last five years.
    #[default]
    Y5,
    /// Last ten years.
    Y10,
}

impl TimeRange {
    /// Every selectable window, in ascending order.
    pub const ALL: [Self; 4] = [Self::Y1, Self::Y3, Self::Y5, Self::Y10];

    /// Extra years fetched beyond the window so that the earliest displayed
    /// month still has a lagged price and a prior-year report.
    pub const HISTORY_PADDING_YEARS: u32 = 1;

    /// Window length in years.
    #[must_use]
    pub const fn years(self) -> u32 {
        match self {
            Self::Y1 => 1,
            Self::Y3 => 3,
            Self::Y5 => 5,
            Self::Y10 => 10,
        }
    }

    /// Number of composed months retained for this window.
    #[must_use]
    pub const fn months(self) -> usize {
        self.years() as usize * 12
    }

    /// Upstream request range for this window relative to `today`.
    ///
    /// Starts `years + 1` years before `today` and ends the day before `today`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the arithmetic leaves chrono's supported range.
    pub fn fetch_range(self, today: NaiveDate) -> Result<DateRange, CaibaoError> {
        let span = Months::new((self.years() + Self::HISTORY_PADDING_YEARS) * 12);
        let start = today
            .checked_sub_months(span)
            .ok_or_else(|| CaibaoError::InvalidArg(format!("cannot go back {span:?} from {today}")))?;
        let end = today
            .pred_opt()
            .ok_or_else(|| CaibaoError::InvalidArg(format!("no day before {today}")))?;
        DateRange::try_new(start, end)
    }
}

impl TryFrom<u32> for TimeRange {
    type Error = CaibaoError;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        match years {
            1 => Ok(Self::Y1),
            3 => Ok(Self::Y3),
            5 => Ok(Self::Y5),
            10 => Ok(Self::Y10),
            other => Err(CaibaoError::InvalidArg(format!(
                "time range must be one of 1, 3, 5, 10 years; got {other}"
            ))),
        }
    }
}

impl From<TimeRange> for u32 {
    fn from(r: TimeRange) -> Self {
        r.years()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y", self.years())
    }
}
