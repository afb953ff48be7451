//! unibot - CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::sync::Arc;

use unibot::cli::{Args, Commands};
use unibot::config::Config;
use unibot::engine::ChatEngine;
use unibot::knowledge::{DocumentStore, NewDocument, StoreConfig};
use unibot::provider::ChatCompletionsClient;
use unibot::response::Response;
use unibot::retrieval::Ranker;
use unibot::types::{QueryCategory, QueryRequest};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    let mut store = open_store(&args, &config)?;

    match args.command {
        Commands::Ask { question, category } => {
            let category = QueryCategory::parse(&category)?;
            ask(store, &config, &question, category).await?;
        }
        Commands::Search { query, limit } => {
            search(&store, &query, limit);
        }
        Commands::Load { file } => {
            let json = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let docs: Vec<NewDocument> =
                serde_json::from_str(&json).context("Failed to parse document file")?;

            let count = docs.len();
            store.add_documents(docs)?;
            println!(
                "{} Added {} documents ({} total in corpus)",
                "✓".green(),
                count,
                store.len()
            );
        }
        Commands::Clear => {
            store.clear()?;
            println!("{} Corpus cleared", "✓".green());
        }
        Commands::Config => {
            println!("Config file:  {}", Config::config_path()?.display());
            println!("Corpus file:  {}", store.data_path().display());
            println!("Provider:     {}", config.provider.base_url);
            println!("Model:        {}", config.provider.model);
            println!(
                "API key:      {}",
                if config.resolve_api_key().is_some() {
                    "configured"
                } else {
                    "missing (set GROQ_API_KEY)"
                }
            );
            println!("Documents:    {}", store.len());
        }
    }

    Ok(())
}

fn open_store(args: &Args, config: &Config) -> Result<DocumentStore> {
    let data_path = args
        .data_path
        .clone()
        .or_else(|| config.storage.data_path.clone());

    let mut store = match data_path {
        Some(data_path) => DocumentStore::with_config(StoreConfig { data_path }),
        None => DocumentStore::new(),
    };
    store.initialize()?;
    Ok(store)
}

async fn ask(
    store: DocumentStore,
    config: &Config,
    question: &str,
    category: QueryCategory,
) -> Result<()> {
    let api_key = config.resolve_api_key().unwrap_or_default();
    let provider = ChatCompletionsClient::with_config(
        &config.provider.base_url,
        &config.provider.model,
        api_key,
    )?;

    let engine = ChatEngine::new(store, Arc::new(provider));
    let request = QueryRequest::new(question, category);

    match engine.answer(&request).await {
        Ok(answer) => print_response(&answer.response),
        Err(e) if e.is_provider_failure() => {
            eprintln!("{} {}", "✗".red(), e);
            println!(
                "Sorry, I couldn't reach the answer service just now. \
Please try again in a moment."
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

fn print_response(response: &Response) {
    match response {
        Response::Text { message } => println!("{}", message),
        Response::Map {
            title,
            message,
            embed_url,
            maps_url,
            coordinates,
        } => {
            println!("{}", title.bold());
            println!("{}", message);
            if let Some(coords) = coordinates {
                println!("{} {}", "Coordinates:".dimmed(), coords);
            }
            println!("{} {}", "Map:".dimmed(), maps_url.blue());
            println!("{} {}", "Embed:".dimmed(), embed_url.blue());
        }
    }
}

fn search(store: &DocumentStore, query: &str, limit: usize) {
    let ranker = Ranker::new();
    let results = ranker.search(store.documents(), query, limit);

    if results.is_empty() {
        println!("{} No matching documents", "⚠".yellow());
        return;
    }

    for (i, ranked) in results.iter().enumerate() {
        println!(
            "{}. {} {}",
            i + 1,
            ranked.document.metadata.title.bold(),
            format!("(score: {:.0})", ranked.score).dimmed()
        );
        println!("   {}", ranked.document.metadata.category.dimmed());
    }
}
