use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use ns_core::{Classification, Result, SentimentLabel, SentimentModel};

const POSITIVE_WORDS: &[(&str, f32)] = &[
    ("beat", 0.6),
    ("boost", 0.5),
    ("breakthrough", 0.7),
    ("bullish", 0.8),
    ("confident", 0.5),
    ("exceed", 0.6),
    ("expand", 0.4),
    ("gain", 0.5),
    ("good", 0.5),
    ("great", 0.6),
    ("growth", 0.6),
    ("improve", 0.5),
    ("innovative", 0.5),
    ("launch", 0.3),
    ("optimistic", 0.6),
    ("outperform", 0.7),
    ("positive", 0.5),
    ("profit", 0.6),
    ("rally", 0.7),
    ("rebound", 0.5),
    ("record", 0.6),
    ("recovery", 0.5),
    ("rise", 0.5),
    ("soar", 0.8),
    ("strong", 0.5),
    ("success", 0.6),
    ("surge", 0.7),
    ("upgrade", 0.6),
    ("win", 0.6),
];

const NEGATIVE_WORDS: &[(&str, f32)] = &[
    ("bad", -0.5),
    ("bankruptcy", -0.9),
    ("bearish", -0.8),
    ("collapse", -0.8),
    ("concern", -0.5),
    ("crash", -0.9),
    ("crisis", -0.8),
    ("cut", -0.4),
    ("decline", -0.6),
    ("disappoint", -0.7),
    ("downgrade", -0.6),
    ("drop", -0.6),
    ("fail", -0.7),
    ("fall", -0.5),
    ("fear", -0.6),
    ("fraud", -0.9),
    ("investigation", -0.5),
    ("lawsuit", -0.6),
    ("layoff", -0.6),
    ("loss", -0.6),
    ("miss", -0.6),
    ("plunge", -0.8),
    ("probe", -0.4),
    ("recall", -0.5),
    ("risk", -0.4),
    ("scandal", -0.8),
    ("slump", -0.7),
    ("tumble", -0.7),
    ("warning", -0.5),
    ("weak", -0.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "without", "cannot", "can't", "won't", "isn't", "aren't", "wasn't",
    "weren't", "don't", "doesn't", "didn't", "hardly",
];

const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.5),
    ("extremely", 2.0),
    ("highly", 1.5),
    ("sharply", 1.6),
    ("significantly", 1.5),
    ("dramatically", 1.8),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

/// Normalization constant for squashing the summed word weights into `(-1, 1)`.
const ALPHA: f32 = 15.0;

/// Rule-based classifier over a financial news word list.
///
/// Negations flip the polarity of the sentiment word that directly follows
/// them (intensifiers in between are allowed) and intensifiers scale it. Any
/// other word clears both. Text with no sentiment words, including empty text,
/// is reported as POSITIVE with 0.5 confidence, i.e. a coin toss.
pub struct LexiconModel {
    words: HashMap<&'static str, f32>,
    intensifiers: HashMap<&'static str, f32>,
}

impl fmt::Debug for LexiconModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconModel")
            .field("words", &self.words.len())
            .finish()
    }
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconModel {
    pub fn new() -> Self {
        Self {
            words: POSITIVE_WORDS.iter().chain(NEGATIVE_WORDS).copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn weight(&self, word: &str) -> Option<f32> {
        if let Some(weight) = self.words.get(word) {
            return Some(*weight);
        }
        for suffix in ["ing", "ed", "es", "s"] {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            if stem.len() < 3 {
                continue;
            }
            if let Some(weight) = self
                .words
                .get(stem)
                .or_else(|| self.words.get(format!("{}e", stem).as_str()))
            {
                return Some(*weight);
            }
        }
        None
    }

    /// Sum of word weights after negation and intensifier handling.
    pub fn raw_score(&self, text: &str) -> f32 {
        let mut total = 0.0;
        let mut negate = false;
        let mut multiplier = 1.0;

        let tokens = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        for token in tokens {
            if NEGATIONS.contains(&token.as_str()) {
                negate = true;
                continue;
            }
            if let Some(m) = self.intensifiers.get(token.as_str()) {
                multiplier = *m;
                continue;
            }
            if let Some(mut weight) = self.weight(&token) {
                if negate {
                    weight = -weight;
                }
                total += weight * multiplier;
            }
            negate = false;
            multiplier = 1.0;
        }
        total
    }
}

#[async_trait]
impl SentimentModel for LexiconModel {
    fn name(&self) -> &str {
        "Lexicon"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let raw = self.raw_score(text);
        let normalized = raw / (raw * raw + ALPHA).sqrt();
        let label = if raw < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Positive
        };
        Ok(Classification::new(label, 0.5 + 0.5 * normalized.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_positive_headline() {
        let model = LexiconModel::new();
        let result = model.classify("Acme shares soar after record profit").await.unwrap();
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!(result.confidence > 0.5 && result.confidence <= 1.0);
        assert!(result.signed_score() > 0.0);
    }

    #[tokio::test]
    async fn test_negative_headline() {
        let model = LexiconModel::new();
        let result = model
            .classify("Regulators open fraud probe as losses mount")
            .await
            .unwrap();
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!(result.signed_score() < 0.0);
    }

    #[tokio::test]
    async fn test_negation_flips_polarity() {
        let model = LexiconModel::new();
        let plain = model.classify("quarterly results were good").await.unwrap();
        let negated = model.classify("quarterly results were not good").await.unwrap();
        assert_eq!(plain.label, SentimentLabel::Positive);
        assert_eq!(negated.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_intensifier_and_inflections() {
        let model = LexiconModel::new();
        assert!(model.raw_score("shares surged") > 0.0);
        assert!(model.raw_score("very strong") > model.raw_score("strong"));
        assert!(model.raw_score("slightly weak") > model.raw_score("weak"));
    }

    #[tokio::test]
    async fn test_neutral_text_is_a_coin_toss() {
        let model = LexiconModel::new();
        let result = model.classify("Acme holds annual meeting").await.unwrap();
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.confidence, 0.5);
    }

    #[tokio::test]
    async fn test_empty_text_is_a_coin_toss() {
        let model = LexiconModel::new();
        for text in ["", "   "] {
            let result = model.classify(text).await.unwrap();
            assert_eq!(result.label, SentimentLabel::Positive);
            assert_eq!(result.confidence, 0.5);
        }
    }

    #[tokio::test]
    async fn test_negation_does_not_reach_past_other_words() {
        let model = LexiconModel::new();
        let result = model
            .classify("No comment from Acme. Shares surge to a record.")
            .await
            .unwrap();
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!(model.raw_score("not a good quarter") > 0.0);
        assert!(model.raw_score("not very good") < 0.0);
    }

    #[test]
    fn test_intensifier_only_applies_to_the_next_word() {
        let model = LexiconModel::new();
        assert_eq!(model.raw_score("very much strong"), model.raw_score("strong"));
    }

    #[tokio::test]
    async fn test_fine_is_not_a_sentiment_word() {
        let model = LexiconModel::new();
        let result = model.classify("Acme is doing fine").await.unwrap();
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.confidence, 0.5);
    }
}
