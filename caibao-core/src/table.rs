use serde::{Deserialize, Serialize};

use crate::format::format_grouped;
use crate::selection::ChartMetric;
use crate::{ComposedRecord, MonthKey};

/// Colour hint for a growth cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthTone {
    /// Zero or positive growth.
    Positive,
    /// Negative growth.
    Negative,
}

impl GrowthTone {
    /// Tone for a growth percentage. Zero counts as positive.
    #[must_use]
    pub fn of(growth: f64) -> Self {
        if growth >= 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// One formatted cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Rendered text.
    pub text: String,
    /// Present on growth cells only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<GrowthTone>,
}

/// One metric across all months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Metric shown in this row.
    pub metric: ChartMetric,
    /// Row header.
    pub label: String,
    /// One cell per month, aligned with [`DetailTable::months`].
    pub cells: Vec<TableCell>,
}

/// Composed records pivoted to one column per month and one row per metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DetailTable {
    /// Column headers, in record order.
    pub months: Vec<MonthKey>,
    /// Revenue, growth and average price rows, in that order.
    pub rows: Vec<TableRow>,
}

impl DetailTable {
    /// Header of the metric column.
    pub const METRIC_HEADER: &'static str = "指標";

    /// Pivot `records`.
    ///
    /// Revenue is shown in thousands with no decimals, growth with two decimals
    /// and a tone, average price with two decimals.
    #[must_use]
    pub fn from_records(records: &[ComposedRecord]) -> Self {
        let months = records.iter().map(|r| r.month).collect();
        let revenue = records
            .iter()
            .map(|r| TableCell {
                text: format_grouped(r.revenue_for_display(), 0),
                tone: None,
            })
            .collect();
        let growth = records
            .iter()
            .map(|r| TableCell {
                text: format!("{:.2}", r.revenue_growth),
                tone: Some(GrowthTone::of(r.revenue_growth)),
            })
            .collect();
        let price = records
            .iter()
            .map(|r| TableCell {
                text: format_grouped(r.avg_price, 2),
                tone: None,
            })
            .collect();

        Self {
            months,
            rows: vec![
                TableRow {
                    metric: ChartMetric::Revenue,
                    label: "每月營收 (千元)".into(),
                    cells: revenue,
                },
                TableRow {
                    metric: ChartMetric::RevenueGrowth,
                    label: "單月營收年增率 (%)".into(),
                    cells: growth,
                },
                TableRow {
                    metric: ChartMetric::AvgPrice,
                    label: "月均價 (元)".into(),
                    cells: price,
                },
            ],
        }
    }

    /// True when there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Row for `metric`.
    #[must_use]
    pub fn row(&self, metric: ChartMetric) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.metric == metric)
    }
}
