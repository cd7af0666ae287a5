use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub publisher_name: String,
    pub published_at: DateTime<Utc>,
    /// Empty when the feed had no description for this article.
    pub description: String,
    pub title: String,
    pub url: String,
}

/// One page of articles plus the feed's reported total for the whole search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    pub articles: Vec<Article>,
    pub total_available: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    /// `None` when the article could not be scored.
    pub sentiment: Option<f32>,
}

/// Rows of scored articles, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub records: Vec<ScoredArticle>,
    pub total_available: u64,
}

impl AnalysisResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows whose sentiment is absent.
    pub fn unscored(&self) -> usize {
        self.records.iter().filter(|r| r.sentiment.is_none()).count()
    }
}
