//! Data types produced by the aggregation pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::dataset::FeedbackRow;
use crate::error::AggregateError;

/// Scalar overview of the whole dataset.
#[derive(Debug, Serialize, PartialEq)]
pub struct OverviewStats {
    pub count: usize,
    pub liked_count: usize,
    pub average_budget: f64,
}

/// One categorical value with its count and relative share of the full
/// dataset, in percent.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValueShare {
    pub value: String,
    pub count: usize,
    pub percent: f64,
}

/// Categorical field a breakdown can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryField {
    Origin,
    Destination,
    Vibe,
}

impl CategoryField {
    pub(crate) fn value<'a>(&self, row: &'a FeedbackRow) -> &'a str {
        match self {
            CategoryField::Origin => &row.origin,
            CategoryField::Destination => &row.destination,
            CategoryField::Vibe => &row.vibe,
        }
    }
}

/// Top-N breakdown for one categorical field.
///
/// `shares` is truncated to the requested N, but every percentage is
/// computed against the full dataset, so omitted categories still weigh in
/// the denominator.
#[derive(Debug, Serialize)]
pub struct CategoryBreakdown {
    pub field: CategoryField,
    pub total_distinct: usize,
    pub shares: Vec<ValueShare>,
}

/// One fixed-width budget histogram bucket, `[lower, upper)`. The maximum
/// observed budget is counted in the last bucket.
#[derive(Debug, Serialize, PartialEq)]
pub struct BudgetBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct BudgetHistogram {
    pub bucket_width: f64,
    pub buckets: Vec<BudgetBucket>,
}

/// Like rate for one departure date.
#[derive(Debug, Serialize, PartialEq)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub like_rate: f64,
    pub count: usize,
}

/// One distinct token from the free-text feedback with its frequency.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// UI-supplied parameters for a full report. Owned by the rendering layer;
/// validated here before any view is computed.
#[derive(Debug, Clone, Serialize)]
pub struct ReportParams {
    pub top_n: usize,
    pub origin_filter: Option<String>,
    pub bucket_count: usize,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            top_n: 5,
            origin_filter: None,
            bucket_count: 20,
        }
    }
}

impl ReportParams {
    pub fn validate(&self) -> Result<(), AggregateError> {
        if self.top_n == 0 {
            return Err(AggregateError::InvalidParameter {
                name: "top_n",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.bucket_count == 0 {
            return Err(AggregateError::InvalidParameter {
                name: "bucket_count",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Complete set of dashboard views for one dataset and parameter set,
/// serialized as JSON for the rendering layer.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub params: ReportParams,
    pub overview: OverviewStats,
    pub like_ratio: Vec<ValueShare>,
    pub destinations: CategoryBreakdown,
    pub origins: CategoryBreakdown,
    pub vibes: CategoryBreakdown,
    pub budget: BudgetHistogram,
    pub departures: Vec<TimeSeriesPoint>,
    pub sentiment: Vec<f64>,
    pub tokens: Vec<TokenCount>,
    pub date_error_count: usize,
}
