use async_trait::async_trait;

use crate::query::Query;
use crate::types::FeedPage;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Name of the backing feed, for logs
    fn name(&self) -> &str;

    /// Fetch one page of articles matching `query`.
    ///
    /// Implementations make a single upstream request and report the feed's
    /// total alongside the page, with `total_available >= articles.len()`.
    async fn fetch(&self, query: &Query) -> Result<FeedPage>;
}
