//! Loads the raw feedback document into a [`FeedbackDataset`].
//!
//! The document is JSON with a top-level `feedback_results` array of
//! feedback records. Nested itinerary fields are flattened into one row per
//! record and departure dates are parsed eagerly, so downstream views never
//! touch the raw document again.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::dataset::{FeedbackDataset, FeedbackRecord, FeedbackRow};
use crate::error::LoadError;

/// Top-level key the upstream data generator writes. Fixed by contract.
pub const FEEDBACK_KEY: &str = "feedback_results";

/// Departure date format, fixed by contract with upstream generation.
pub const DEPARTURE_FORMAT: &str = "%d-%m-%y";

/// Loads a feedback document from a file on disk.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file is missing, is not valid JSON, lacks
/// the `feedback_results` key, or contains a record with a negative budget.
/// Unparsable departure dates are not load failures; they are collected per
/// record on the returned dataset.
pub fn load(path: &str) -> Result<FeedbackDataset, LoadError> {
    let content = std::fs::read_to_string(path)?;
    from_str(&content)
}

/// Parses a feedback document from raw bytes (e.g. an HTTP response body).
pub fn from_slice(bytes: &[u8]) -> Result<FeedbackDataset, LoadError> {
    let doc: serde_json::Value = serde_json::from_slice(bytes)?;
    from_document(doc)
}

/// Parses a feedback document from a string.
pub fn from_str(text: &str) -> Result<FeedbackDataset, LoadError> {
    let doc: serde_json::Value = serde_json::from_str(text)?;
    from_document(doc)
}

fn from_document(doc: serde_json::Value) -> Result<FeedbackDataset, LoadError> {
    let records = doc
        .get(FEEDBACK_KEY)
        .cloned()
        .ok_or(LoadError::MissingFeedbackKey)?;
    let records: Vec<FeedbackRecord> = serde_json::from_value(records)?;

    let mut rows = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        if record.itinerary.budget < 0.0 {
            return Err(LoadError::NegativeBudget {
                record: idx,
                value: record.itinerary.budget,
            });
        }
        rows.push(flatten(record));
    }

    let dataset = FeedbackDataset::new(rows);
    let date_error_count = dataset.date_errors().len();
    if date_error_count > 0 {
        warn!(
            date_error_count,
            "Some departure dates did not match DD-MM-YY; affected records are excluded from the time series only"
        );
    }
    debug!(records = dataset.len(), "Feedback document loaded");

    Ok(dataset)
}

fn flatten(record: FeedbackRecord) -> FeedbackRow {
    let departure = NaiveDate::parse_from_str(&record.itinerary.departure, DEPARTURE_FORMAT).ok();

    FeedbackRow {
        liked: record.liked,
        text_feedback: record.text_feedback,
        origin: record.itinerary.origin,
        destination: record.itinerary.destination,
        budget: record.itinerary.budget,
        vibe: record.itinerary.vibe,
        departure_raw: record.itinerary.departure,
        departure,
    }
}
