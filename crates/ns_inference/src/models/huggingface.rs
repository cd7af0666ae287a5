use std::fmt;

use async_trait::async_trait;
use ns_core::{Classification, Error, Result, SentimentLabel, SentimentModel};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::InferenceConfig;

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MODEL_ID: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Failure { error: String },
}

/// Text classification served over the Hugging Face inference HTTP API.
pub struct HuggingFaceModel {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HuggingFaceModel {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let base_url = config
            .model_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        let model_id = config.model_id.as_deref().unwrap_or(DEFAULT_MODEL_ID);

        Ok(Self {
            client,
            endpoint: format!("{}/models/{}", base_url, model_id),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn parse_label(label: &str) -> Result<SentimentLabel> {
    match label.to_uppercase().as_str() {
        "POSITIVE" | "LABEL_1" => Ok(SentimentLabel::Positive),
        "NEGATIVE" | "LABEL_0" => Ok(SentimentLabel::Negative),
        other => Err(Error::Inference(format!("unexpected label: {}", other))),
    }
}

fn best_of(scores: Vec<LabelScore>) -> Result<Classification> {
    let best = scores
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| Error::Inference("model returned no labels".to_string()))?;
    Ok(Classification::new(parse_label(&best.label)?, best.score))
}

fn decode_response(body: &str) -> Result<Classification> {
    match serde_json::from_str::<ClassifyResponse>(body)? {
        ClassifyResponse::Nested(mut outer) => {
            if outer.is_empty() {
                return Err(Error::Inference("model returned no predictions".to_string()));
            }
            best_of(outer.swap_remove(0))
        }
        ClassifyResponse::Flat(scores) => best_of(scores),
        ClassifyResponse::Failure { error } => Err(Error::Inference(error)),
    }
}

#[async_trait]
impl SentimentModel for HuggingFaceModel {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&ClassifyRequest { inputs: text });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Inference(format!(
                "classification failed with HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }
        decode_response(&body)
    }
}
