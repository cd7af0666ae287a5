use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ns_core::Error;
use serde_json::json;

/// Maps chain errors onto HTTP responses with a `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Upstream { .. } | Error::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Analysis request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn render(err: Error) -> (StatusCode, Value) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let (status, body) = render(Error::Upstream {
            status: 429,
            body: "rateLimited".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Upstream error: HTTP 429: rateLimited");
    }

    #[tokio::test]
    async fn test_transport_failure_is_bad_gateway() {
        // Nothing listens on port 1, so the connect fails.
        let err = reqwest::get("http://127.0.0.1:1/").await.unwrap_err();
        let (status, body) = render(Error::Http(err)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().starts_with("HTTP error"));
    }

    #[tokio::test]
    async fn test_other_failures_are_internal_errors() {
        let (status, body) = render(Error::Config("bad model".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Configuration error: bad model");

        let (status, _) = render(Error::Inference("boom".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_query_and_credential_failures_are_client_errors() {
        let invalid = ApiError(Error::InvalidQuery("entity must not be empty".to_string()));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        let auth = ApiError(Error::Authentication("apiKeyInvalid".to_string()));
        assert_eq!(auth.status(), StatusCode::UNAUTHORIZED);
    }
}
