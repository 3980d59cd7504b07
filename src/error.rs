//! Error types for loading and aggregating feedback data.

use thiserror::Error;

/// Fatal failure while loading the feedback document.
///
/// Any of these aborts startup: the dashboard never renders from a
/// partially loaded dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read feedback source: {0}")]
    Io(#[from] std::io::Error),

    #[error("feedback source is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feedback source has no top-level `feedback_results` array")]
    MissingFeedbackKey,

    #[error("record {record}: budget {value} is negative")]
    NegativeBudget { record: usize, value: f64 },
}

/// Per-record departure date that did not match the `DD-MM-YY` contract.
///
/// Non-fatal: the record stays in every view that does not need the date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {record}: departure {raw:?} does not match DD-MM-YY")]
pub struct DateParseError {
    pub record: usize,
    pub raw: String,
}

/// Failure computing an aggregate view.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    /// The requested aggregate has no defined value over an empty dataset.
    #[error("aggregate is undefined over an empty dataset")]
    EmptyDataset,

    /// A UI-supplied parameter was rejected before any computation ran.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}
