pub mod chain;
pub mod report;

pub use chain::AnalysisChain;
pub use report::{
    daily_breakdown, source_distribution, summarize, DailySentiment, Polarity, Report, SourceShare,
};

pub mod prelude {
    pub use super::chain::AnalysisChain;
    pub use super::report::{summarize, Report};
    pub use ns_core::{AnalysisResult, ArticleSource, Error, Query, Result, ScoredArticle};
    pub use ns_inference::SentimentScorer;
}
