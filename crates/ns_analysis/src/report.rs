//! Tables derived from an [`AnalysisResult`] for dashboards: per-day sentiment
//! split by polarity, and the share of articles per publisher.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use ns_core::AnalysisResult;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Negative,
    Positive,
}

impl Polarity {
    /// Zero counts as negative.
    pub fn of(score: f32) -> Self {
        if score > 0.0 {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub polarity: Polarity,
    pub articles: usize,
    pub mean_sentiment: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceShare {
    pub publisher_name: String,
    pub articles: usize,
    /// Percentage of all rows, 0 to 100.
    pub share: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_available: u64,
    pub analyzed: usize,
    pub unscored: usize,
    pub mean_sentiment: Option<f32>,
    pub daily: Vec<DailySentiment>,
    pub sources: Vec<SourceShare>,
}

/// Scored rows grouped by UTC publish date and polarity, oldest first.
pub fn daily_breakdown(result: &AnalysisResult) -> Vec<DailySentiment> {
    let mut groups: BTreeMap<(NaiveDate, Polarity), (usize, f32)> = BTreeMap::new();
    for record in &result.records {
        let Some(score) = record.sentiment else {
            continue;
        };
        let key = (record.article.published_at.date_naive(), Polarity::of(score));
        let entry = groups.entry(key).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += score;
    }

    groups
        .into_iter()
        .map(|((date, polarity), (articles, sum))| DailySentiment {
            date,
            polarity,
            articles,
            mean_sentiment: sum / articles as f32,
        })
        .collect()
}

/// Row count per publisher, most frequent first.
pub fn source_distribution(result: &AnalysisResult) -> Vec<SourceShare> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in &result.records {
        *counts.entry(record.article.publisher_name.as_str()).or_insert(0) += 1;
    }

    let total = result.records.len() as f32;
    let mut shares: Vec<SourceShare> = counts
        .into_iter()
        .map(|(name, articles)| SourceShare {
            publisher_name: name.to_string(),
            articles,
            share: articles as f32 / total * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| {
        b.articles
            .cmp(&a.articles)
            .then_with(|| a.publisher_name.cmp(&b.publisher_name))
    });
    shares
}

pub fn summarize(result: &AnalysisResult) -> Report {
    let scores: Vec<f32> = result.records.iter().filter_map(|r| r.sentiment).collect();
    let mean_sentiment = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f32>() / scores.len() as f32)
    };

    Report {
        total_available: result.total_available,
        analyzed: result.len(),
        unscored: result.unscored(),
        mean_sentiment,
        daily: daily_breakdown(result),
        sources: source_distribution(result),
    }
}
