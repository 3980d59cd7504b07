//! Aggregate view computation over a loaded feedback dataset.
//!
//! This module holds the pure functions behind every dashboard widget:
//! overview scalars, like/dislike shares, top-N category breakdowns,
//! sentiment scores, the budget histogram, the departure time series, and
//! word-cloud token frequencies, plus the report builder that assembles
//! them all for the rendering layer.

pub mod aggregate;
pub mod report;
pub mod types;
pub mod utility;
