use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

/// A classifier's verdict for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: SentimentLabel,
    /// In `[0, 1]`.
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: SentimentLabel, confidence: f32) -> Self {
        Self { label, confidence }
    }

    /// Confidence signed by polarity: POSITIVE 0.87 is `0.87`, NEGATIVE 0.62 is `-0.62`.
    pub fn signed_score(&self) -> f32 {
        match self.label {
            SentimentLabel::Positive => self.confidence,
            SentimentLabel::Negative => -self.confidence,
        }
    }
}

/// Per-text outcome of a batch scoring call.
#[derive(Debug, Clone, PartialEq)]
pub enum Sentiment {
    Scored(f32),
    Failed(String),
}

impl Sentiment {
    pub fn value(&self) -> Option<f32> {
        match self {
            Sentiment::Scored(score) => Some(*score),
            Sentiment::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Sentiment::Failed(_))
    }
}

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Classify a single text.
    async fn classify(&self, text: &str) -> Result<Classification>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_score_follows_label() {
        let positive = Classification::new(SentimentLabel::Positive, 0.87);
        assert_eq!(positive.signed_score(), 0.87);

        let negative = Classification::new(SentimentLabel::Negative, 0.62);
        assert_eq!(negative.signed_score(), -0.62);
    }

    #[test]
    fn test_failed_sentiment_has_no_value() {
        assert_eq!(Sentiment::Scored(0.5).value(), Some(0.5));
        assert_eq!(Sentiment::Failed("boom".to_string()).value(), None);
        assert!(Sentiment::Failed(String::new()).is_failed());
    }
}
