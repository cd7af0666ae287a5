use axum::{
    extract::{rejection::QueryRejection, Query as Params, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use ns_analysis::{summarize, Report};
use ns_core::{AnalysisResult, Error, Query, Result, TimeFrame};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
    pub entity: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub window: Option<TimeFrame>,
    /// Comma separated extra search terms.
    pub terms: Option<String>,
}

impl AnalysisParams {
    /// Explicit `from`/`to` take precedence over `window`; with neither, the
    /// last week is used.
    pub fn into_query(self, today: NaiveDate) -> Result<Query> {
        let terms = self
            .terms
            .as_deref()
            .map(|t| t.split(',').map(str::to_string).collect())
            .unwrap_or_default();

        match (self.from, self.to, self.window) {
            (Some(from), Some(to), _) => Query::new(self.entity, from, to, terms),
            (None, None, window) => {
                Query::trailing(self.entity, window.unwrap_or(TimeFrame::Week), today, terms)
            }
            _ => Err(Error::InvalidQuery(
                "both 'from' and 'to' are required for an explicit range".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub result: AnalysisResult,
    pub report: Report,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn run_analysis(
    State(state): State<AppState>,
    params: std::result::Result<Params<AnalysisParams>, QueryRejection>,
) -> std::result::Result<Json<AnalysisResponse>, ApiError> {
    let Params(params) =
        params.map_err(|rejection| Error::InvalidQuery(rejection.body_text()))?;
    let query = params.into_query(Utc::now().date_naive())?;
    let result = state.chain.run(&query).await?;
    let report = summarize(&result);
    Ok(Json(AnalysisResponse { result, report }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_app;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::TimeZone;
    use ns_analysis::AnalysisChain;
    use ns_core::{Article, ArticleSource, FeedPage};
    use ns_inference::{models::LexiconModel, SentimentScorer};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Serves two articles, or an authentication error for the entity "Locked".
    struct StubSource;

    #[async_trait]
    impl ArticleSource for StubSource {
        fn name(&self) -> &str {
            "Stub"
        }

        async fn fetch(&self, query: &Query) -> Result<FeedPage> {
            if query.entity() == "Locked" {
                return Err(Error::Authentication("apiKeyInvalid".to_string()));
            }
            let article = |publisher: &str, description: &str| Article {
                publisher_name: publisher.to_string(),
                published_at: Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
                description: description.to_string(),
                title: query.entity().to_string(),
                url: "https://example.com".to_string(),
            };
            Ok(FeedPage {
                articles: vec![
                    article("Reuters", "Record profit lifts shares"),
                    article("BBC News", ""),
                ],
                total_available: 40,
            })
        }
    }

    fn app() -> axum::Router {
        let chain = AnalysisChain::new(
            Arc::new(StubSource),
            SentimentScorer::new(Arc::new(LexiconModel::new())),
        );
        create_app(AppState::new(chain))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_params_explicit_range() {
        let params = AnalysisParams {
            entity: "Acme".to_string(),
            from: Some(date(2024, 1, 1)),
            to: Some(date(2024, 1, 7)),
            window: Some(TimeFrame::Month),
            terms: Some("merger, ,lawsuit".to_string()),
        };
        let query = params.into_query(date(2024, 6, 1)).unwrap();
        assert_eq!(query.start_date(), date(2024, 1, 1));
        assert_eq!(query.end_date(), date(2024, 1, 7));
        assert_eq!(query.extra_terms().len(), 2);
    }

    #[test]
    fn test_params_default_to_last_week() {
        let params = AnalysisParams {
            entity: "Acme".to_string(),
            from: None,
            to: None,
            window: None,
            terms: None,
        };
        let query = params.into_query(date(2024, 1, 8)).unwrap();
        assert_eq!(query.start_date(), date(2024, 1, 1));
        assert_eq!(query.end_date(), date(2024, 1, 8));
    }

    #[test]
    fn test_params_half_open_range_is_rejected() {
        let params = AnalysisParams {
            entity: "Acme".to_string(),
            from: Some(date(2024, 1, 1)),
            to: None,
            window: None,
            terms: None,
        };
        assert!(matches!(
            params.into_query(date(2024, 1, 8)),
            Err(Error::InvalidQuery(_))
        ));
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analysis_returns_rows_and_report() {
        let (status, body) = get("/api/analysis?entity=Acme&from=2024-01-01&to=2024-01-07").await;
        assert_eq!(status, StatusCode::OK);

        let rows = body["result"]["records"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["publisher_name"], "Reuters");
        assert!(rows[0]["sentiment"].as_f64().unwrap() > 0.0);
        assert_eq!(rows[1]["description"], "");
        assert_eq!(rows[1]["sentiment"].as_f64(), Some(0.5));
        assert_eq!(body["result"]["total_available"], 40);
        assert_eq!(body["report"]["unscored"], 0);
    }

    #[tokio::test]
    async fn test_inverted_range_is_bad_request() {
        let (status, body) = get("/api/analysis?entity=Acme&from=2024-01-07&to=2024-01-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unparseable_query_string_is_json_bad_request() {
        for uri in [
            "/api/analysis?entity=Acme&from=2024-13-01&to=2024-01-07",
            "/api/analysis?from=2024-01-01&to=2024-01-07",
            "/api/analysis?entity=Acme&window=year",
        ] {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            let message = body["error"].as_str().unwrap();
            assert!(message.starts_with("Invalid query"), "{}", message);
        }
    }

    #[tokio::test]
    async fn test_feed_authentication_failure_is_unauthorized() {
        let (status, body) = get("/api/analysis?entity=Locked&window=month").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].as_str().unwrap().contains("apiKeyInvalid"));
    }
}
