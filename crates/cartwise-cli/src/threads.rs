//! `cartwise threads` command.

use clap::{Args, Subcommand};

use cartwise_core::AppConfig;
use cartwise_threads::{JsonThreadStore, ThreadStore};

#[derive(Debug, Args)]
pub struct ThreadsArgs {
    #[command(subcommand)]
    command: ThreadsCommand,
}

#[derive(Debug, Subcommand)]
enum ThreadsCommand {
    /// List stored thread ids
    List,
    /// Print a thread's contents as JSON
    Show { id: String },
    /// Delete a thread
    Delete { id: String },
}

pub fn run(config: &AppConfig, args: &ThreadsArgs) -> anyhow::Result<()> {
    let store = JsonThreadStore::new(&config.threads_dir)?;

    match &args.command {
        ThreadsCommand::List => {
            let mut ids = store.list()?;
            ids.sort();
            if ids.is_empty() {
                println!("No threads stored.");
            }
            for id in ids {
                println!("{id}");
            }
        }
        ThreadsCommand::Show { id } => match store.load(id)? {
            Some(data) => println!("{}", serde_json::to_string_pretty(&data)?),
            None => println!("Thread '{id}' not found."),
        },
        ThreadsCommand::Delete { id } => {
            store.delete(id)?;
            println!("Thread '{id}' deleted.");
        }
    }
    Ok(())
}
