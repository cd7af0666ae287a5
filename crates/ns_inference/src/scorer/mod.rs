use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use ns_core::{Classification, Error, Result, Sentiment, SentimentModel};
use tracing::{debug, warn};

/// Scores batches of texts with one shared model.
///
/// Each text is classified on its own. A failure, including a panic inside the
/// model, only affects that text's position in the output.
#[derive(Clone)]
pub struct SentimentScorer {
    model: Arc<dyn SentimentModel>,
}

impl fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentScorer")
            .field("model", &self.model.name())
            .finish()
    }
}

impl SentimentScorer {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// One [`Sentiment`] per input text, in input order.
    pub async fn score<S>(&self, texts: &[S]) -> Vec<Sentiment>
    where
        S: AsRef<str> + Sync,
    {
        let mut sentiments = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            let text = text.as_ref();
            let sentiment = match self.classify_one(text).await {
                Ok(classification) => Sentiment::Scored(classification.signed_score()),
                Err(e) => {
                    warn!(index, article = %text, "Error {} during sentiment scoring", e);
                    Sentiment::Failed(e.to_string())
                }
            };
            sentiments.push(sentiment);
        }

        debug!(
            "Scored {} texts with {} ({} failed)",
            sentiments.len(),
            self.model.name(),
            sentiments.iter().filter(|s| s.is_failed()).count()
        );
        sentiments
    }

    async fn classify_one(&self, text: &str) -> Result<Classification> {
        let classification = AssertUnwindSafe(self.model.classify(text))
            .catch_unwind()
            .await
            .map_err(|payload| {
                Error::Inference(format!("model panicked: {}", panic_message(&*payload)))
            })??;

        let confidence = classification.confidence;
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(Error::Inference(format!(
                "confidence {} outside [0, 1]",
                confidence
            )));
        }
        Ok(classification)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
