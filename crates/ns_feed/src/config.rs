use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ns_core::{Error, Result};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_CREDENTIAL_ENV: &str = "NEWS_API_KEY";

/// Order the feed is asked to return results in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortPolicy {
    #[default]
    Relevancy,
    Popularity,
    PublishedAt,
}

impl SortPolicy {
    pub fn as_param(self) -> &'static str {
        match self {
            SortPolicy::Relevancy => "relevancy",
            SortPolicy::Popularity => "popularity",
            SortPolicy::PublishedAt => "publishedAt",
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "relevancy" | "relevance" => Ok(SortPolicy::Relevancy),
            "popularity" => Ok(SortPolicy::Popularity),
            "publishedat" | "published" => Ok(SortPolicy::PublishedAt),
            other => Err(Error::Config(format!("unknown sort policy: {}", other))),
        }
    }
}

/// Where a credential may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialPolicy {
    /// Use the configured key when present, otherwise the environment.
    #[default]
    ExplicitOrEnv,
    /// Ignore any configured key and read the environment only.
    EnvOnly,
}

#[derive(Clone)]
pub struct FeedConfig {
    pub base_url: Url,
    pub api_key: Option<String>,
    pub credential_env: String,
    pub credential_policy: CredentialPolicy,
    pub sort_by: SortPolicy,
    pub language: String,
    pub search_in: String,
    pub page_size: Option<u32>,
    pub timeout: Duration,
}

impl fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("credential_env", &self.credential_env)
            .field("credential_policy", &self.credential_policy)
            .field("sort_by", &self.sort_by)
            .field("language", &self.language)
            .field("search_in", &self.search_in)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default feed URL is valid"),
            api_key: None,
            credential_env: DEFAULT_CREDENTIAL_ENV.to_string(),
            credential_policy: CredentialPolicy::default(),
            sort_by: SortPolicy::default(),
            language: "en".to_string(),
            search_in: "title".to_string(),
            page_size: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl FeedConfig {
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url =
            Url::parse(url).map_err(|e| Error::Config(format!("invalid feed URL {}: {}", url, e)))?;
        Ok(self)
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn with_credential_env(mut self, name: impl Into<String>) -> Self {
        self.credential_env = name.into();
        self
    }

    pub fn with_credential_policy(mut self, policy: CredentialPolicy) -> Self {
        self.credential_policy = policy;
        self
    }

    pub fn with_sort(mut self, sort_by: SortPolicy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_newsapi() {
        let config = FeedConfig::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.sort_by, SortPolicy::Relevancy);
        assert_eq!(config.language, "en");
        assert_eq!(config.search_in, "title");
        assert_eq!(config.credential_policy, CredentialPolicy::ExplicitOrEnv);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = FeedConfig::default().with_api_key(Some("secret-key".to_string()));
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_sort_policy_parsing() {
        assert_eq!("popularity".parse::<SortPolicy>().unwrap(), SortPolicy::Popularity);
        assert_eq!("relevance".parse::<SortPolicy>().unwrap(), SortPolicy::Relevancy);
        assert_eq!("publishedAt".parse::<SortPolicy>().unwrap(), SortPolicy::PublishedAt);
        assert!("random".parse::<SortPolicy>().is_err());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = FeedConfig::default().with_base_url("not a url");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
