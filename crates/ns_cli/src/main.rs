use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use ns_analysis::{summarize, AnalysisChain};
use ns_core::{Query, TimeFrame};
use ns_feed::{CredentialPolicy, FeedConfig, NewsApiSource, SortPolicy};
use ns_inference::{create_model, InferenceConfig, SentimentScorer};
use ns_web::AppState;
use tracing::info;

mod logging;
mod output;

#[derive(Parser, Debug)]
#[command(author, version, about = "Score news coverage of an entity", long_about = None)]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Sentiment model: lexicon (default) or huggingface.
    #[arg(long, global = true)]
    model: Option<String>,
    #[arg(long, global = true)]
    model_url: Option<String>,
    /// Remote model identifier, e.g. a Hugging Face repository.
    #[arg(long, global = true)]
    model_id: Option<String>,
    /// Feed API key. Falls back to the credential environment variable.
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// Never use --api-key; read the credential from the environment only.
    #[arg(long, global = true)]
    env_only: bool,
    #[arg(long, global = true, env = "NS_FEED_URL")]
    feed_url: Option<String>,
    #[arg(long, global = true, default_value_t = SortPolicy::Relevancy)]
    sort: SortPolicy,
    #[arg(long, global = true, env = "NS_PAGE_SIZE")]
    page_size: Option<u32>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch and score articles about an entity.
    Analyze {
        entity: String,
        /// First day of the range (YYYY-MM-DD).
        #[arg(long, requires = "to", conflicts_with = "window")]
        from: Option<NaiveDate>,
        /// Last day of the range (YYYY-MM-DD).
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
        /// Trailing window ending today: week or month.
        #[arg(long)]
        window: Option<TimeFrame>,
        /// Extra search term, may be repeated.
        #[arg(long = "term")]
        terms: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Serve the analysis API over HTTP.
    Serve {
        #[arg(long, env = "NS_ADDR", default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    fn feed_config(&self) -> ns_core::Result<FeedConfig> {
        let policy = if self.env_only {
            CredentialPolicy::EnvOnly
        } else {
            CredentialPolicy::ExplicitOrEnv
        };
        let mut config = FeedConfig::default()
            .with_api_key(self.api_key.clone())
            .with_credential_policy(policy)
            .with_sort(self.sort)
            .with_page_size(self.page_size);
        if let Some(url) = &self.feed_url {
            config = config.with_base_url(url)?;
        }
        Ok(config)
    }

    /// Environment settings, overridden by any flags given.
    fn inference_config(&self) -> InferenceConfig {
        let mut config = InferenceConfig::from_env();
        if let Some(model) = &self.model {
            config.model_name = Some(model.clone());
        }
        if let Some(url) = &self.model_url {
            config.model_url = Some(url.clone());
        }
        if let Some(id) = &self.model_id {
            config.model_id = Some(id.clone());
        }
        config
    }

    fn build_chain(&self) -> ns_core::Result<AnalysisChain> {
        let source = NewsApiSource::new(self.feed_config()?)?;
        let model = create_model(&self.inference_config())?;
        info!("🧠 Sentiment model initialized (using {})", model.name());
        Ok(AnalysisChain::new(Arc::new(source), SentimentScorer::new(model)))
    }
}

fn build_query(
    entity: String,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    window: Option<TimeFrame>,
    terms: Vec<String>,
    today: NaiveDate,
) -> ns_core::Result<Query> {
    match (from, to) {
        (Some(from), Some(to)) => Query::new(entity, from, to, terms),
        _ => Query::trailing(entity, window.unwrap_or(TimeFrame::Week), today, terms),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let chain = cli.build_chain().context("failed to set up the analysis chain")?;

    match cli.command {
        Commands::Analyze {
            entity,
            from,
            to,
            window,
            terms,
            format,
        } => {
            let query = build_query(entity, from, to, window, terms, Utc::now().date_naive())?;
            let result = chain.run(&query).await?;
            let report = summarize(&result);
            match format {
                OutputFormat::Table => print!("{}", output::render_table(&result, &report)),
                OutputFormat::Json => println!("{}", output::render_json(&result, &report)?),
            }
        }
        Commands::Serve { addr } => {
            ns_web::serve(AppState::new(chain), &addr).await?;
        }
    }

    Ok(())
}
