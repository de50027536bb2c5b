mod nearby;
mod pricing;
mod threads;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cartwise")]
#[command(about = "Grocery shopping assistant command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find nearby stores for a coordinate
    Nearby(nearby::NearbyArgs),
    /// Compare one product's price across stores
    Compare(pricing::CompareArgs),
    /// Compare a shopping list and pick the best store
    List(pricing::ListArgs),
    /// Inspect or clean up conversation threads
    Threads(threads::ThreadsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = cartwise_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Nearby(args) => nearby::run(&config, args).await,
        Commands::Compare(args) => pricing::run_compare(&config, args).await,
        Commands::List(args) => pricing::run_list(&config, args).await,
        Commands::Threads(args) => threads::run(&config, &args),
    }
}
