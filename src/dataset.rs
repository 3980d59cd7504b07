//! In-memory representation of a loaded feedback collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DateParseError;

/// Nested itinerary fields exactly as they appear in the raw document.
#[derive(Debug, Clone, Deserialize)]
pub struct Itinerary {
    pub origin: String,
    pub destination: String,
    pub budget: f64,
    pub vibe: String,
    pub departure: String,
}

/// One user's response to one generated itinerary, as deserialized.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRecord {
    pub liked: bool,
    #[serde(default)]
    pub text_feedback: Option<String>,
    pub itinerary: Itinerary,
}

/// A single flattened row. Serialized column names use the dotted paths
/// (`itinerary.origin`, ...) that the upstream normalization produces, so
/// exported tables line up with the data generator's schema.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRow {
    pub liked: bool,
    pub text_feedback: Option<String>,

    #[serde(rename = "itinerary.origin")]
    pub origin: String,
    #[serde(rename = "itinerary.destination")]
    pub destination: String,
    #[serde(rename = "itinerary.budget")]
    pub budget: f64,
    #[serde(rename = "itinerary.vibe")]
    pub vibe: String,
    #[serde(rename = "itinerary.departure")]
    pub departure_raw: String,

    /// Parsed departure date. `None` when the raw value did not match
    /// `DD-MM-YY`; such rows are skipped by date-dependent views only.
    #[serde(skip)]
    pub departure: Option<NaiveDate>,
}

/// The full feedback collection. Immutable after load; aggregate views are
/// recomputed from it on every call. Reloads install a fresh dataset behind
/// a new `Arc` rather than mutating this one in place.
#[derive(Debug, Clone, Default)]
pub struct FeedbackDataset {
    rows: Vec<FeedbackRow>,
}

impl FeedbackDataset {
    pub(crate) fn new(rows: Vec<FeedbackRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[FeedbackRow] {
        &self.rows
    }

    /// Number of records whose feedback was positive. Zero on an empty
    /// dataset, never an error.
    pub fn liked_count(&self) -> usize {
        self.rows.iter().filter(|r| r.liked).count()
    }

    /// Departure values that failed to parse, keyed by record position.
    ///
    /// These records are still present in `rows` and still count toward
    /// every aggregate that does not need the date.
    pub fn date_errors(&self) -> Vec<DateParseError> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.departure.is_none())
            .map(|(record, r)| DateParseError {
                record,
                raw: r.departure_raw.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(liked: bool, departure: Option<NaiveDate>) -> FeedbackRow {
        FeedbackRow {
            liked,
            text_feedback: None,
            origin: "Berlin".to_string(),
            destination: "Lisbon".to_string(),
            budget: 1000.0,
            vibe: "relaxing".to_string(),
            departure_raw: "01-06-24".to_string(),
            departure,
        }
    }

    #[test]
    fn test_liked_count() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1);
        let ds = FeedbackDataset::new(vec![row(true, date), row(false, date), row(true, date)]);
        assert_eq!(ds.liked_count(), 2);
    }

    #[test]
    fn test_liked_count_empty() {
        let ds = FeedbackDataset::default();
        assert_eq!(ds.liked_count(), 0);
        assert!(ds.is_empty());
    }

    #[test]
    fn test_date_errors_track_record_position() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1);
        let ds = FeedbackDataset::new(vec![row(true, date), row(true, None), row(false, date)]);

        let errors = ds.date_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].record, 1);
        // The failing record is not dropped from the dataset itself
        assert_eq!(ds.len(), 3);
    }
}
