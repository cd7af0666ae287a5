use std::sync::Arc;

use ns_core::{Error, Result, SentimentModel};

use crate::InferenceConfig;

pub mod huggingface;
pub mod lexicon;

pub use huggingface::HuggingFaceModel;
pub use lexicon::LexiconModel;

/// Build the sentiment model named in `config`, defaulting to the local lexicon.
pub fn create_model(config: &InferenceConfig) -> Result<Arc<dyn SentimentModel>> {
    let name = config
        .model_name
        .as_deref()
        .unwrap_or("lexicon")
        .to_lowercase();

    let model: Arc<dyn SentimentModel> = match name.as_str() {
        "lexicon" => Arc::new(LexiconModel::new()),
        "huggingface" | "hf" => Arc::new(HuggingFaceModel::new(config)?),
        other => {
            return Err(Error::Config(format!(
                "unknown sentiment model '{}'. Available models: lexicon, huggingface",
                other
            )))
        }
    };
    tracing::debug!("Sentiment model ready: {}", model.name());
    Ok(model)
}
