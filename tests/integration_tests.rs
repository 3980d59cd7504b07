use feedback_rater::analyzers::aggregate::{filter_origin, top_categories};
use feedback_rater::analyzers::report::build_report;
use feedback_rater::analyzers::types::{CategoryField, ReportParams};
use feedback_rater::loader;
use feedback_rater::sentiment::LexiconScorer;

const SAMPLE: &str = include_str!("fixtures/sample_feedback.json");

#[test]
fn test_full_pipeline() {
    let dataset = loader::from_str(SAMPLE).expect("Failed to load sample feedback");
    let report = build_report(&dataset, &ReportParams::default(), &LexiconScorer)
        .expect("Failed to build report");

    assert_eq!(report.overview.count, 8);
    assert_eq!(report.overview.liked_count, 5);

    // Lisbon leads the destination breakdown: 4 of 8 records
    assert_eq!(report.destinations.shares[0].value, "Lisbon");
    assert!((report.destinations.shares[0].percent - 50.0).abs() < 1e-9);

    let ratio_total: f64 = report.like_ratio.iter().map(|s| s.percent).sum();
    assert!((ratio_total - 100.0).abs() < 1e-9);

    // one record has the impossible date 31-02-24
    assert_eq!(report.date_error_count, 1);
    let series_total: usize = report.departures.iter().map(|p| p.count).sum();
    assert_eq!(series_total, 7);

    // per-record sentiment, empty text neutral
    assert_eq!(report.sentiment.len(), 8);
    assert_eq!(report.sentiment[3], 0.0);
    assert_eq!(report.sentiment[4], 0.0);
    assert!(report.sentiment[0] > 0.0);
    assert!(report.sentiment[2] < 0.0);
}

#[test]
fn test_origin_filter_drives_all_views() {
    let dataset = loader::from_str(SAMPLE).unwrap();

    let oslo = filter_origin(&dataset, "Oslo");
    assert_eq!(oslo.len(), 3);

    let params = ReportParams {
        origin_filter: Some("Oslo".to_string()),
        ..ReportParams::default()
    };
    let report = build_report(&dataset, &params, &LexiconScorer).unwrap();
    assert_eq!(report.overview.count, 3);
    assert_eq!(report.origins.total_distinct, 1);
    assert_eq!(report.origins.shares[0].percent, 100.0);
}

#[test]
fn test_breakdown_prefix_stable_across_top_n() {
    let dataset = loader::from_str(SAMPLE).unwrap();

    for n in 1..4 {
        let smaller = top_categories(&dataset, CategoryField::Vibe, n).unwrap();
        let larger = top_categories(&dataset, CategoryField::Vibe, n + 1).unwrap();
        assert_eq!(smaller.shares[..], larger.shares[..smaller.shares.len()]);
    }
}
