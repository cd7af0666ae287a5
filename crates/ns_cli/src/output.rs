use ns_analysis::Report;
use ns_core::AnalysisResult;
use serde_json::json;

const DESCRIPTION_WIDTH: usize = 60;

pub fn render_json(result: &AnalysisResult, report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({ "result": result, "report": report }))
}

pub fn render_table(result: &AnalysisResult, report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:<24} {:>9}  {}\n",
        "published", "publisher", "sentiment", "description"
    ));
    for record in &result.records {
        let sentiment = record
            .sentiment
            .map(|s| format!("{:+.3}", s))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<20} {:<24} {:>9}  {}\n",
            record.article.published_at.format("%Y-%m-%d %H:%M"),
            truncate(&record.article.publisher_name, 24),
            sentiment,
            truncate(&record.article.description, DESCRIPTION_WIDTH)
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "{} analysed of {} available, {} unscored",
        report.analyzed, report.total_available, report.unscored
    ));
    if let Some(mean) = report.mean_sentiment {
        out.push_str(&format!(", mean sentiment {:+.3}", mean));
    }
    out.push('\n');

    if !report.sources.is_empty() {
        out.push_str("\nsources:\n");
        for share in &report.sources {
            out.push_str(&format!(
                "  {:<24} {:>4} {:>6.1}%\n",
                truncate(&share.publisher_name, 24),
                share.articles,
                share.share
            ));
        }
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}
