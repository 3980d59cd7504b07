//! Sentiment polarity scoring for free-text feedback.
//!
//! The pipeline only fixes the interface: a scorer receives a non-empty
//! string and returns a polarity in `[-1.0, 1.0]`. The null-handling
//! contract (missing or empty text is neutral) lives in the aggregation
//! layer, which never calls a scorer for such records.

/// Pluggable sentiment-scoring collaborator.
pub trait SentimentScorer: Send + Sync {
    /// Scores a non-empty text. Implementations must stay within
    /// `[-1.0, 1.0]`; the caller clamps defensively anyway.
    fn score(&self, text: &str) -> f64;
}

/// Word-list scorer used when no external scoring service is wired in.
///
/// Counts positive and negative lexicon hits and returns their normalized
/// difference, which lands in `[-1.0, 1.0]` by construction. Text with no
/// lexicon hits is neutral.
pub struct LexiconScorer;

static POSITIVE: &[&str] = &[
    "amazing",
    "awesome",
    "beautiful",
    "best",
    "enjoyed",
    "excellent",
    "fantastic",
    "good",
    "great",
    "incredible",
    "love",
    "loved",
    "memorable",
    "perfect",
    "wonderful",
];

static NEGATIVE: &[&str] = &[
    "awful",
    "bad",
    "boring",
    "crowded",
    "dirty",
    "disappointed",
    "disappointing",
    "expensive",
    "hate",
    "hated",
    "mediocre",
    "overpriced",
    "poor",
    "terrible",
    "worst",
];

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let mut positive = 0usize;
        let mut negative = 0usize;

        for token in text.split_whitespace() {
            let token: String = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if POSITIVE.contains(&token.as_str()) {
                positive += 1;
            } else if NEGATIVE.contains(&token.as_str()) {
                negative += 1;
            }
        }

        let hits = positive + negative;
        if hits == 0 {
            return 0.0;
        }
        (positive as f64 - negative as f64) / hits as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let score = LexiconScorer.score("The beaches were amazing and the food was great!");
        assert!(score > 0.0);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_negative_text() {
        let score = LexiconScorer.score("Terrible hotel, overpriced and crowded.");
        assert_eq!(score, -1.0);
    }

    #[test]
    fn test_mixed_text() {
        let score = LexiconScorer.score("great views but terrible weather");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_no_lexicon_hits_is_neutral() {
        assert_eq!(LexiconScorer.score("we went to the museum"), 0.0);
    }

    #[test]
    fn test_punctuation_and_case_ignored() {
        assert_eq!(LexiconScorer.score("AMAZING!"), 1.0);
    }
}
