//! Assembles every dashboard view into a single [`DashboardReport`].

use tracing::debug;

use crate::analyzers::aggregate::{
    budget_histogram, departure_series, filter_origin, like_ratio, overview, sentiment_scores,
    token_frequencies, top_categories,
};
use crate::analyzers::types::{CategoryField, DashboardReport, ReportParams};
use crate::dataset::FeedbackDataset;
use crate::error::AggregateError;
use crate::sentiment::SentimentScorer;

/// Builds the full report for one dataset and parameter set.
///
/// Parameters are validated first, so a rejected `top_n` or `bucket_count`
/// never reaches any view computation and the caller can keep its previous
/// report. The origin filter is applied before every view, matching the
/// dashboard behavior of recomputing all widgets for the selected origin.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidParameter`] for out-of-range
/// parameters, or [`AggregateError::EmptyDataset`] when the (filtered)
/// dataset is empty and the overview mean is therefore undefined.
pub fn build_report(
    dataset: &FeedbackDataset,
    params: &ReportParams,
    scorer: &dyn SentimentScorer,
) -> Result<DashboardReport, AggregateError> {
    params.validate()?;

    let subset = match params.origin_filter.as_deref() {
        Some(origin) => filter_origin(dataset, origin),
        None => dataset.clone(),
    };
    debug!(
        records = subset.len(),
        origin = params.origin_filter.as_deref().unwrap_or("All"),
        "Building dashboard report"
    );

    Ok(DashboardReport {
        schema_version: 1,
        generated_at: chrono::Utc::now(),
        params: params.clone(),
        overview: overview(&subset)?,
        like_ratio: like_ratio(&subset),
        destinations: top_categories(&subset, CategoryField::Destination, params.top_n)?,
        origins: top_categories(&subset, CategoryField::Origin, params.top_n)?,
        vibes: top_categories(&subset, CategoryField::Vibe, params.top_n)?,
        budget: budget_histogram(&subset, params.bucket_count)?,
        departures: departure_series(&subset),
        sentiment: sentiment_scores(&subset, scorer),
        tokens: token_frequencies(&subset),
        date_error_count: subset.date_errors().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader;
    use crate::sentiment::LexiconScorer;

    fn sample() -> FeedbackDataset {
        loader::from_str(
            r#"{"feedback_results": [
                {"liked": true, "text_feedback": "amazing beaches",
                 "itinerary": {"origin": "Berlin", "destination": "Lisbon",
                               "budget": 900, "vibe": "relaxing", "departure": "15-07-24"}},
                {"liked": false, "text_feedback": "too expensive",
                 "itinerary": {"origin": "Berlin", "destination": "Paris",
                               "budget": 1400, "vibe": "romantic", "departure": "20-07-24"}},
                {"liked": true,
                 "itinerary": {"origin": "Oslo", "destination": "Lisbon",
                               "budget": 700, "vibe": "relaxing", "departure": "31-02-24"}}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_report_full_dataset() {
        let report = build_report(&sample(), &ReportParams::default(), &LexiconScorer).unwrap();

        assert_eq!(report.schema_version, 1);
        assert_eq!(report.overview.count, 3);
        assert_eq!(report.overview.liked_count, 2);
        assert_eq!(report.overview.average_budget, 1000.0);
        assert_eq!(report.destinations.shares[0].value, "Lisbon");
        assert_eq!(report.sentiment.len(), 3);
        assert_eq!(report.sentiment[2], 0.0); // missing text stays neutral
        assert_eq!(report.departures.len(), 2); // bad date excluded from series
        assert_eq!(report.date_error_count, 1);
    }

    #[test]
    fn test_build_report_with_origin_filter() {
        let params = ReportParams {
            origin_filter: Some("Oslo".to_string()),
            ..ReportParams::default()
        };
        let report = build_report(&sample(), &params, &LexiconScorer).unwrap();

        assert_eq!(report.overview.count, 1);
        assert_eq!(report.overview.average_budget, 700.0);
    }

    #[test]
    fn test_build_report_rejects_bad_params() {
        let params = ReportParams {
            top_n: 0,
            ..ReportParams::default()
        };
        assert!(matches!(
            build_report(&sample(), &params, &LexiconScorer),
            Err(AggregateError::InvalidParameter { name: "top_n", .. })
        ));
    }

    #[test]
    fn test_build_report_empty_subset_is_empty_dataset_error() {
        let params = ReportParams {
            origin_filter: Some("Nowhere".to_string()),
            ..ReportParams::default()
        };
        assert_eq!(
            build_report(&sample(), &params, &LexiconScorer).unwrap_err(),
            AggregateError::EmptyDataset
        );
    }
}
