pub mod config;
pub mod credentials;
pub mod newsapi;

pub use config::{CredentialPolicy, FeedConfig, SortPolicy};
pub use credentials::resolve_credential;
pub use newsapi::NewsApiSource;

pub mod prelude {
    pub use super::config::{CredentialPolicy, FeedConfig, SortPolicy};
    pub use super::newsapi::NewsApiSource;
    pub use ns_core::{ArticleSource, Error, FeedPage, Query, Result};
}
