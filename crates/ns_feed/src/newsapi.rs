use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ns_core::{Article, ArticleSource, Error, FeedPage, Query, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use crate::credentials::resolve_credential;

/// Articles stay raw JSON here so one bad entry does not sink the page.
#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default, rename = "totalResults")]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct EverythingArticle {
    #[serde(default)]
    source: Option<ArticleOrigin>,
    #[serde(rename = "publishedAt")]
    published_at: DateTime<Utc>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleOrigin {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<EverythingArticle> for Article {
    fn from(raw: EverythingArticle) -> Self {
        Article {
            publisher_name: raw.source.and_then(|s| s.name).unwrap_or_default(),
            published_at: raw.published_at,
            description: raw.description.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
        }
    }
}

/// Article source backed by a NewsAPI `/v2/everything` compatible endpoint.
pub struct NewsApiSource {
    client: Client,
    config: FeedConfig,
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

impl NewsApiSource {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ns/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    fn params(&self, query: &Query, api_key: String) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.search_string()),
            ("from", query.start_date().format("%Y-%m-%d").to_string()),
            ("to", query.end_date().format("%Y-%m-%d").to_string()),
            ("sortBy", self.config.sort_by.as_param().to_string()),
            ("language", self.config.language.clone()),
            ("searchIn", self.config.search_in.clone()),
        ];
        if let Some(page_size) = self.config.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        params.push(("apiKey", api_key));
        params
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch(&self, query: &Query) -> Result<FeedPage> {
        let api_key = resolve_credential(
            self.config.api_key.as_deref(),
            self.config.credential_policy,
            &self.config.credential_env,
        )?;

        debug!(
            q = %query.search_string(),
            from = %query.start_date(),
            to = %query.end_date(),
            sort = %self.config.sort_by,
            "requesting articles from {}",
            self.config.base_url
        );

        let response = self
            .client
            .get(self.config.base_url.clone())
            .query(&self.params(query, api_key))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        let page = decode_page(status, &body)?;
        info!(
            "📰 Fetched {} articles ({} available) for '{}'",
            page.articles.len(),
            page.total_available,
            query.entity()
        );
        Ok(page)
    }
}

/// Map a feed response to a page or one of the feed error kinds.
pub fn decode_page(status: StatusCode, body: &str) -> Result<FeedPage> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::Authentication(error_message(status, body)));
    }
    if !status.is_success() {
        return Err(Error::Upstream {
            status: status.as_u16(),
            body: body.to_string(),
        });
    }

    let response: EverythingResponse = serde_json::from_str(body).map_err(|e| {
        warn!("Undecodable feed response: {}", e);
        Error::Upstream {
            status: status.as_u16(),
            body: body.to_string(),
        }
    })?;

    let mut articles = Vec::new();
    for (index, raw) in response.articles.unwrap_or_default().into_iter().enumerate() {
        match serde_json::from_value::<EverythingArticle>(raw) {
            Ok(article) => articles.push(Article::from(article)),
            Err(e) => warn!(index, "Skipping undecodable feed article: {}", e),
        }
    }

    let reported = response.total_results.unwrap_or(0);
    let returned = articles.len() as u64;
    let total_available = if reported < returned {
        warn!(
            "Feed reported {} total results but returned {} articles",
            reported, returned
        );
        returned
    } else {
        reported
    };

    Ok(FeedPage {
        articles,
        total_available,
    })
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            code: Some(code),
            message: Some(message),
        }) => format!("{} ({}): {}", status.as_u16(), code, message),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => format!("{}: {}", status.as_u16(), message),
        _ => format!("{}: {}", status.as_u16(), body),
    }
}
