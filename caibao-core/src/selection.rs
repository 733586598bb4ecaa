use core::fmt;

use serde::{Deserialize, Serialize};

use crate::CaibaoError;

/// A metric that can be drawn on the combination chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartMetric {
    /// Monthly revenue bars.
    Revenue,
    /// Monthly average price line.
    AvgPrice,
    /// Year-over-year revenue growth line.
    RevenueGrowth,
}

impl ChartMetric {
    /// All metrics in display order.
    pub const ALL: [Self; 3] = [Self::Revenue, Self::AvgPrice, Self::RevenueGrowth];

    /// Field name of [`crate::ComposedRecord`] this metric plots.
    #[must_use]
    pub const fn data_key(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::AvgPrice => "avgPrice",
            Self::RevenueGrowth => "revenueGrowth",
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "每月營收",
            Self::AvgPrice => "月均價",
            Self::RevenueGrowth => "營收年增率",
        }
    }
}

impl fmt::Display for ChartMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data_key())
    }
}

/// Active chart metrics, oldest selection first.
///
/// Holds at least one and at most [`ChartSelection::MAX_ACTIVE`] distinct
/// metrics. Selecting a third metric evicts the oldest; deselecting the only
/// active metric is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChartMetric>", into = "Vec<ChartMetric>")]
pub struct ChartSelection {
    order: Vec<ChartMetric>,
}

impl ChartSelection {
    /// Upper bound on simultaneously active metrics.
    pub const MAX_ACTIVE: usize = 2;

    /// Selection with a single active metric.
    #[must_use]
    pub fn only(metric: ChartMetric) -> Self {
        Self {
            order: vec![metric],
        }
    }

    /// Active metrics, oldest selection first.
    #[must_use]
    pub fn active(&self) -> &[ChartMetric] {
        &self.order
    }

    /// Whether `metric` is currently drawn.
    #[must_use]
    pub fn is_active(&self, metric: ChartMetric) -> bool {
        self.order.contains(&metric)
    }

    /// Flip `metric` and return the resulting selection.
    #[must_use]
    pub fn toggle(&self, metric: ChartMetric) -> Self {
        let mut order = self.order.clone();
        if let Some(idx) = order.iter().position(|m| *m == metric) {
            if order.len() > 1 {
                order.remove(idx);
            }
        } else {
            order.push(metric);
            if order.len() > Self::MAX_ACTIVE {
                order.remove(0);
            }
        }
        Self { order }
    }
}

impl Default for ChartSelection {
    fn default() -> Self {
        Self {
            order: vec![ChartMetric::Revenue, ChartMetric::AvgPrice],
        }
    }
}

impl TryFrom<Vec<ChartMetric>> for ChartSelection {
    type Error = CaibaoError;

    fn try_from(order: Vec<ChartMetric>) -> Result<Self, Self::Error> {
        if order.is_empty() || order.len() > Self::MAX_ACTIVE {
            return Err(CaibaoError::InvalidArg(format!(
                "chart selection must hold 1..={} metrics, got {}",
                Self::MAX_ACTIVE,
                order.len()
            )));
        }
        if order.len() == 2 && order[0] == order[1] {
            return Err(CaibaoError::InvalidArg(format!(
                "chart selection repeats {}",
                order[0]
            )));
        }
        Ok(Self { order })
    }
}

impl From<ChartSelection> for Vec<ChartMetric> {
    fn from(s: ChartSelection) -> Self {
        s.order
    }
}
