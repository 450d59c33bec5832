use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::report;
use lawbot_core::config::{self, AppConfig};
use lawbot_core::retriever::Retriever;
use lawbot_core::{pipeline, registry, ChatService};
use std::sync::Arc;
use storage::KnowledgeBase;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::BuildIndex { json } => run_build(cfg, json).await,
        Commands::Search { query, topk } => run_search(cfg, query, topk).await,
        Commands::Ask { question, json } => run_ask(cfg, question, json).await,
    }
}

#[derive(Parser)]
#[command(name = "lawbot")]
#[command(about = "Retrieval-grounded legal assistant", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, chunk and embed the corpus, replacing the index artifacts
    BuildIndex {
        /// Output JSON summary
        #[arg(long)]
        json: bool,
    },
    /// Show the ranked chunks for a query
    Search {
        query: String,
        /// Number of results (defaults to the configured top_k)
        #[arg(long)]
        topk: Option<usize>,
    },
    /// Answer a question through the full chat path
    Ask {
        question: String,
        /// Output the response as JSON
        #[arg(long)]
        json: bool,
    },
}

async fn run_build(cfg: AppConfig, json: bool) -> Result<()> {
    let registry = registry::build_registry(&cfg)?;
    let summary = pipeline::build_index(&cfg, &registry).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report::summary_json(&summary))?);
    } else {
        println!("{}", report::summary_line(&summary));
    }
    Ok(())
}

async fn run_search(cfg: AppConfig, query: String, topk: Option<usize>) -> Result<()> {
    let registry = registry::build_registry(&cfg)?;
    let knowledge = KnowledgeBase::load(&cfg.index.index_path(), &cfg.index.metadata_path())?;
    let retriever = Retriever::new(registry.embedding(None)?, Arc::new(knowledge));
    let k = topk.unwrap_or(cfg.retrieval.top_k);
    let candidates = retriever.retrieve(&query, k).await?;
    if candidates.is_empty() {
        eprintln!("No matching chunks.");
    }
    for line in report::candidate_lines(&candidates, 120) {
        println!("{}", line);
    }
    Ok(())
}

async fn run_ask(cfg: AppConfig, question: String, json: bool) -> Result<()> {
    let registry = registry::build_registry(&cfg)?;
    let service = ChatService::from_config(&cfg, &registry);
    if !service.is_available() {
        warn!("Index unavailable; answering with the fallback responder.");
    }
    let response = service.answer(&question).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", report::answer_text(&response));
    }
    Ok(())
}
