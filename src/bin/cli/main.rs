use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use object_store_facade::{
    create_store_from_env, BulkDeleteRequest, DeleteOutcome, DeleteRequest, DeleteService,
    VersionId,
};

#[derive(Parser, Debug)]
#[command(name = "object-store-cli")]
#[command(about = "CLI for deleting objects through the store facade", long_about = None)]
struct Cli {
    /// Print the statistics snapshot after the operation
    #[arg(long, env = "STORE_SHOW_STATS")]
    show_stats: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Delete a single object
    Delete {
        /// Object key
        key: String,
        /// Version ID to delete
        #[arg(long)]
        version_id: Option<String>,
    },

    /// Delete a batch of objects in one call
    DeleteBatch {
        /// Object keys
        keys: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let services = create_store_from_env().context("failed to build store facade")?;
    let store = &services.delete_service;

    match cli.command {
        Commands::Delete { key, version_id } => {
            let request = match version_id {
                Some(version) => DeleteRequest::versioned(
                    key.as_str(),
                    VersionId::new(version).context("invalid version id")?,
                ),
                None => DeleteRequest::new(key.as_str()),
            };

            let (duration, outcome) = store.delete_object(request).await?.into_parts();
            match outcome {
                DeleteOutcome::Deleted(_) => {
                    info!(key = %key, ?duration, "object deleted");
                }
                DeleteOutcome::NotFound => {
                    info!(key = %key, ?duration, "object was already absent");
                }
            }
        }

        Commands::DeleteBatch { keys } => {
            let count = keys.len();
            let request = BulkDeleteRequest::from_keys(keys);
            let (duration, outcome) = store.delete_objects(request).await?.into_parts();

            info!(
                requested = count,
                deleted = outcome.response().deleted.len(),
                failed = outcome.errors().len(),
                ?duration,
                "bulk delete finished"
            );
            for error in outcome.errors() {
                eprintln!("{}: {} - {}", error.key, error.code, error.message);
            }
        }
    }

    if cli.show_stats {
        println!("statistics:");
        for (symbol, value) in services.statistics.counter_snapshot() {
            println!("  {symbol}: {value}");
        }
    }

    Ok(())
}
