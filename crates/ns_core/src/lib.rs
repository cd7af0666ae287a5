pub mod error;
pub mod models;
pub mod query;
pub mod source;
pub mod types;

pub use error::{Error, Result};
pub use models::{Classification, Sentiment, SentimentLabel, SentimentModel};
pub use query::{Query, TimeFrame};
pub use source::ArticleSource;
pub use types::{AnalysisResult, Article, FeedPage, ScoredArticle};
