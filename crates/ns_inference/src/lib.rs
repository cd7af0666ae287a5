use std::fmt;
use std::time::Duration;

pub mod models;
pub mod scorer;

pub use models::create_model;
pub use scorer::SentimentScorer;

pub const MODEL_ENV: &str = "NS_SENTIMENT_MODEL";
pub const MODEL_URL_ENV: &str = "NS_SENTIMENT_URL";
pub const MODEL_ID_ENV: &str = "NS_SENTIMENT_MODEL_ID";
pub const API_TOKEN_ENV: &str = "HF_API_TOKEN";

#[derive(Clone)]
pub struct InferenceConfig {
    /// Which model backend to build: `lexicon` or `huggingface`.
    pub model_name: Option<String>,
    pub model_url: Option<String>,
    /// Remote model identifier, e.g. a Hugging Face repository name.
    pub model_id: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .field("model_id", &self.model_id)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_name: None,
            model_url: None,
            model_id: None,
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl InferenceConfig {
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            model_name: var(MODEL_ENV),
            model_url: var(MODEL_URL_ENV),
            model_id: var(MODEL_ID_ENV),
            api_key: var(API_TOKEN_ENV),
            ..Self::default()
        }
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::scorer::SentimentScorer;
    pub use super::InferenceConfig;
    pub use ns_core::{Classification, Error, Result, Sentiment, SentimentLabel, SentimentModel};
}
