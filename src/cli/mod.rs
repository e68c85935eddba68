//! Command-line interface.
//!
//! - `scos-assist` / `scos-assist chat` — interactive TUI (default)
//! - `scos-assist ask <question>` — one-shot question, answer on stdout
//! - `scos-assist status` — configuration presence report

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::db::SupabaseVectorStore;
use crate::llm::GeminiClient;
use crate::rag::embeddings::GeminiEmbeddings;
use crate::rag::pipeline::RagPipeline;
use crate::session::Session;
use crate::types::{AppError, Result};

#[derive(Parser)]
#[command(name = "scos-assist")]
#[command(
    author,
    version,
    about = "Retrieval-augmented chat assistant for the NC 3rd Grade Standard Course of Study"
)]
pub struct Cli {
    /// Disable the TUI and use a plain line-oriented chat loop
    #[arg(long, global = true)]
    pub no_tui: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat mode (same as running without subcommand)
    Chat,

    /// Ask a single question and print the answer
    Ask {
        /// The question to answer
        question: String,
    },

    /// Show which configuration values are present
    Status,
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;

    match cli.command {
        None | Some(Commands::Chat) => run_chat(&config, cli.no_tui).await,
        Some(Commands::Ask { question }) => run_ask(&config, &question).await,
        Some(Commands::Status) => run_status(&config),
    }
}

/// Wire the three service clients and a fresh session into a pipeline.
fn build_pipeline(config: &Config) -> Result<Arc<RagPipeline>> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

    let embeddings = Arc::new(GeminiEmbeddings::new(
        http.clone(),
        &config.gemini,
        config.retrieval.output_dimensionality,
    ));
    let store = Arc::new(SupabaseVectorStore::new(http.clone(), &config.supabase));
    let llm = Arc::new(GeminiClient::new(http, &config.gemini));

    Ok(Arc::new(RagPipeline::new(
        embeddings,
        store,
        llm,
        config.retrieval.clone(),
        Arc::new(Session::new()),
    )))
}

async fn run_chat(config: &Config, no_tui: bool) -> Result<()> {
    let env_status = config.env_status();
    let pipeline = build_pipeline(config)?;

    if no_tui {
        crate::tui::run_simple(pipeline).await
    } else {
        crate::tui::run_tui(pipeline, env_status).await
    }
}

async fn run_ask(config: &Config, question: &str) -> Result<()> {
    let pipeline = build_pipeline(config)?;

    let Some(message) = pipeline.answer(question).await else {
        return Err(AppError::InvalidInput("question is empty".to_string()));
    };

    println!("{}", message.content);
    Ok(())
}

fn run_status(config: &Config) -> Result<()> {
    let status = config.env_status();

    println!("{}", "Environment Status".bold());
    print_flag("Supabase URL", status.supabase_url);
    print_flag("Supabase Key", status.supabase_key);
    print_flag("Gemini API Key", status.gemini_key);

    println!();
    println!(
        "  {} {}  {} {}",
        "chat model:".dimmed(),
        config.gemini.chat_model,
        "embedding model:".dimmed(),
        config.gemini.embedding_model
    );
    println!(
        "  {} {}  {} {}",
        "match threshold:".dimmed(),
        config.retrieval.match_threshold,
        "match count:".dimmed(),
        config.retrieval.match_count
    );

    println!();
    if status.all_present() {
        println!("{}", "✓ Configuration complete".green().bold());
    } else {
        println!(
            "{}",
            "Set the missing variables in .env before chatting".yellow()
        );
    }

    Ok(())
}

fn print_flag(name: &str, present: bool) {
    if present {
        println!("  {} {}", "✓".green().bold(), name);
    } else {
        println!("  {} {} {}", "✗".red().bold(), name, "(missing)".dimmed());
    }
}
