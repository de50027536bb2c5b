//! `cartwise compare` and `cartwise list` commands.

use anyhow::Context;
use clap::Args;

use cartwise_core::AppConfig;
use cartwise_pricing::{
    OpenAiEmbedder, PriceComparer, QdrantClient, QdrantProductSearch,
};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Product to look up, e.g. "whole milk"
    query: String,

    /// How many catalog candidates to consider
    #[arg(long, default_value_t = 10)]
    top_k: usize,

    /// Print the full comparison as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Shopping list items, one per argument
    #[arg(required = true)]
    items: Vec<String>,

    /// How many catalog candidates to consider per item
    #[arg(long, default_value_t = 10)]
    top_k: usize,

    /// Print the full result as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

fn build_comparer(
    config: &AppConfig,
) -> anyhow::Result<PriceComparer<QdrantProductSearch>> {
    let openai_key = config
        .openai_api_key
        .as_deref()
        .context("OPENAI_API_KEY is not set")?;

    let embedder = OpenAiEmbedder::new(
        openai_key,
        &config.embedding_model,
        config.http_timeout_secs,
    )?;
    let qdrant = QdrantClient::new(
        &config.qdrant_url,
        &config.collection,
        config.qdrant_api_key.as_deref(),
        config.http_timeout_secs,
    )?;

    Ok(PriceComparer::new(
        QdrantProductSearch::new(embedder, qdrant),
        config.price_threshold_percent,
        config.min_similarity,
    ))
}

pub async fn run_compare(config: &AppConfig, args: CompareArgs) -> anyhow::Result<()> {
    let comparer = build_comparer(config)?;

    match comparer.compare(&args.query, args.top_k).await? {
        Some(comparison) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                println!("{}", comparison.recommendation);
            }
        }
        None => println!("No products found for '{}'.", args.query),
    }
    Ok(())
}

pub async fn run_list(config: &AppConfig, args: ListArgs) -> anyhow::Result<()> {
    let comparer = build_comparer(config)?;

    let result = comparer.compare_list(&args.items, args.top_k).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.recommendation);
    }
    Ok(())
}
