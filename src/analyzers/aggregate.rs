//! Pure aggregate views over a [`FeedbackDataset`].
//!
//! Every function here takes the dataset plus parameters and returns a
//! freshly computed view. Nothing is cached and nothing depends on prior
//! calls, so re-running any view with the same inputs yields the same
//! output.

use std::collections::{BTreeMap, HashMap};

use crate::analyzers::types::{
    BudgetBucket, BudgetHistogram, CategoryBreakdown, CategoryField, OverviewStats,
    TimeSeriesPoint, TokenCount, ValueShare,
};
use crate::analyzers::utility::{mean, pct};
use crate::dataset::FeedbackDataset;
use crate::error::AggregateError;
use crate::sentiment::SentimentScorer;

/// Origin filter value meaning "no filter".
pub const ALL_ORIGINS: &str = "All";

/// Overview scalars: record count, liked count, mean budget.
///
/// # Errors
///
/// Returns [`AggregateError::EmptyDataset`] when the dataset is empty,
/// since the mean budget is undefined. Use [`FeedbackDataset::len`] and
/// [`FeedbackDataset::liked_count`] directly for the counts, which are
/// zero on empty input.
pub fn overview(dataset: &FeedbackDataset) -> Result<OverviewStats, AggregateError> {
    if dataset.is_empty() {
        return Err(AggregateError::EmptyDataset);
    }

    Ok(OverviewStats {
        count: dataset.len(),
        liked_count: dataset.liked_count(),
        average_budget: mean(&budget_values(dataset)),
    })
}

/// Relative frequency of liked vs. disliked over the whole dataset, in
/// percent. The shares sum to 100 (within floating rounding); if only one
/// value occurs its single entry is at 100. Empty dataset yields no entries.
pub fn like_ratio(dataset: &FeedbackDataset) -> Vec<ValueShare> {
    let labels = dataset
        .rows()
        .iter()
        .map(|r| if r.liked { "liked" } else { "disliked" });
    into_shares(count_values(labels), dataset.len())
}

/// Top-N breakdown of one categorical field.
///
/// Grouping is by exact string value (case-sensitive, untrimmed). Shares
/// are sorted by count descending with ties kept in first-encountered
/// order, then truncated to `top_n`; a `top_n` above the distinct count
/// returns all categories. Percentages are always relative to the full
/// dataset, so `breakdown(ds, K)` is a strict prefix of
/// `breakdown(ds, K+1)`.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidParameter`] when `top_n` is zero.
pub fn top_categories(
    dataset: &FeedbackDataset,
    field: CategoryField,
    top_n: usize,
) -> Result<CategoryBreakdown, AggregateError> {
    if top_n == 0 {
        return Err(AggregateError::InvalidParameter {
            name: "top_n",
            reason: "must be at least 1".to_string(),
        });
    }

    let counted = count_values(dataset.rows().iter().map(|r| field.value(r)));
    let total_distinct = counted.len();

    let mut shares = into_shares(counted, dataset.len());
    shares.truncate(top_n);

    Ok(CategoryBreakdown {
        field,
        total_distinct,
        shares,
    })
}

/// Per-record sentiment polarity in `[-1.0, 1.0]`.
///
/// Records with missing or empty `text_feedback` score exactly 0.0 without
/// consulting the scorer. Scorer output is clamped to the contract range.
pub fn sentiment_scores(dataset: &FeedbackDataset, scorer: &dyn SentimentScorer) -> Vec<f64> {
    dataset
        .rows()
        .iter()
        .map(|r| match r.text_feedback.as_deref() {
            Some(text) if !text.is_empty() => scorer.score(text).clamp(-1.0, 1.0),
            _ => 0.0,
        })
        .collect()
}

/// The raw budget sequence, for external density estimation.
pub fn budget_values(dataset: &FeedbackDataset) -> Vec<f64> {
    dataset.rows().iter().map(|r| r.budget).collect()
}

/// Fixed-width budget histogram with `bucket_count` buckets spanning
/// `[min, max]`. Buckets are half-open `[lower, upper)`; the maximum
/// observed value is counted in the last bucket. When every budget is the
/// same value the histogram collapses to a single bucket.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidParameter`] when `bucket_count` is
/// zero. An empty dataset yields an empty histogram, not an error.
pub fn budget_histogram(
    dataset: &FeedbackDataset,
    bucket_count: usize,
) -> Result<BudgetHistogram, AggregateError> {
    if bucket_count == 0 {
        return Err(AggregateError::InvalidParameter {
            name: "bucket_count",
            reason: "must be at least 1".to_string(),
        });
    }

    let values = budget_values(dataset);
    if values.is_empty() {
        return Ok(BudgetHistogram {
            bucket_width: 0.0,
            buckets: Vec::new(),
        });
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bucket_count as f64;

    if width == 0.0 {
        return Ok(BudgetHistogram {
            bucket_width: 0.0,
            buckets: vec![BudgetBucket {
                lower: min,
                upper: max,
                count: values.len(),
            }],
        });
    }

    let mut counts = vec![0usize; bucket_count];
    for v in &values {
        let idx = (((v - min) / width) as usize).min(bucket_count - 1);
        counts[idx] += 1;
    }

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(k, count)| BudgetBucket {
            lower: min + k as f64 * width,
            upper: min + (k + 1) as f64 * width,
            count,
        })
        .collect();

    Ok(BudgetHistogram {
        bucket_width: width,
        buckets,
    })
}

/// Like rate per distinct departure date, chronologically ascending.
///
/// Rows whose departure did not parse are excluded from this view only;
/// the exclusion never raises.
pub fn departure_series(dataset: &FeedbackDataset) -> Vec<TimeSeriesPoint> {
    let mut by_date: BTreeMap<chrono::NaiveDate, (usize, usize)> = BTreeMap::new();

    for row in dataset.rows() {
        if let Some(date) = row.departure {
            let (liked, total) = by_date.entry(date).or_insert((0, 0));
            if row.liked {
                *liked += 1;
            }
            *total += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, (liked, total))| TimeSeriesPoint {
            date,
            like_rate: liked as f64 / total as f64,
            count: total,
        })
        .collect()
}

/// Subset of the dataset matching one origin exactly (case-sensitive).
///
/// [`ALL_ORIGINS`] returns the full dataset unchanged; an origin not
/// present in the data returns an empty subset, not an error.
pub fn filter_origin(dataset: &FeedbackDataset, origin: &str) -> FeedbackDataset {
    if origin == ALL_ORIGINS {
        return dataset.clone();
    }

    FeedbackDataset::new(
        dataset
            .rows()
            .iter()
            .filter(|r| r.origin == origin)
            .cloned()
            .collect(),
    )
}

/// Token frequencies over all non-empty `text_feedback`, for the word
/// cloud. Tokenization is whitespace splitting; counting is case-sensitive
/// like the categorical breakdowns. Ordered by count descending with ties
/// in first-encountered order. All-empty text yields an empty list.
pub fn token_frequencies(dataset: &FeedbackDataset) -> Vec<TokenCount> {
    let tokens = dataset
        .rows()
        .iter()
        .filter_map(|r| r.text_feedback.as_deref())
        .flat_map(str::split_whitespace);

    let mut counted = count_values(tokens);
    counted.sort_by(|a, b| b.1.cmp(&a.1));

    counted
        .into_iter()
        .map(|(token, count)| TokenCount { token, count })
        .collect()
}

/// Counts distinct values, preserving first-encountered order.
fn count_values<'a, I>(values: I) -> Vec<(String, usize)>
where
    I: Iterator<Item = &'a str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counted: Vec<(String, usize)> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counted[i].1 += 1,
            None => {
                index.insert(value.to_string(), counted.len());
                counted.push((value.to_string(), 1));
            }
        }
    }

    counted
}

/// Sorts counted values by frequency (stable, so ties keep insertion
/// order) and attaches percentages over `total`.
fn into_shares(mut counted: Vec<(String, usize)>, total: usize) -> Vec<ValueShare> {
    counted.sort_by(|a, b| b.1.cmp(&a.1));

    counted
        .into_iter()
        .map(|(value, count)| ValueShare {
            value,
            count,
            percent: pct(count, total),
        })
        .collect()
}
