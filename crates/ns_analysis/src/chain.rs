use std::fmt;
use std::sync::Arc;

use ns_core::{AnalysisResult, ArticleSource, FeedPage, Query, Result, ScoredArticle};
use ns_inference::SentimentScorer;
use tracing::info;

/// Fetches articles for a query, scores their descriptions and joins the two.
pub struct AnalysisChain {
    source: Arc<dyn ArticleSource>,
    scorer: SentimentScorer,
}

impl fmt::Debug for AnalysisChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisChain")
            .field("source", &self.source.name())
            .field("scorer", &self.scorer)
            .finish()
    }
}

impl AnalysisChain {
    pub fn new(source: Arc<dyn ArticleSource>, scorer: SentimentScorer) -> Self {
        Self { source, scorer }
    }

    /// Run the whole chain for one query.
    ///
    /// Feed errors abort the run. Scoring failures do not: the affected rows
    /// are kept with an absent sentiment, so the result always has one row per
    /// fetched article.
    pub async fn run(&self, query: &Query) -> Result<AnalysisResult> {
        info!(
            "🔗 Chain run starting: '{}' from {} to {} via {}, scored by {}",
            query.search_string(),
            query.start_date(),
            query.end_date(),
            self.source.name(),
            self.scorer.model_name()
        );

        let FeedPage {
            articles,
            total_available,
        } = self.source.fetch(query).await?;

        let descriptions: Vec<&str> = articles.iter().map(|a| a.description.as_str()).collect();
        let sentiments = self.scorer.score(&descriptions).await;

        let records: Vec<ScoredArticle> = articles
            .into_iter()
            .zip(sentiments)
            .map(|(article, sentiment)| ScoredArticle {
                article,
                sentiment: sentiment.value(),
            })
            .collect();

        let result = AnalysisResult {
            total_available: total_available.max(records.len() as u64),
            records,
        };
        info!(
            "✅ Chain run finished: {} articles analysed ({} unscored), {} available upstream",
            result.len(),
            result.unscored(),
            result.total_available
        );
        Ok(result)
    }
}
