//! Storefront Seed - administrative bulk loader
//!
//! Loads pre-formed catalog entries from a JSON file and inserts them
//! verbatim, including `logo`, `whyLink`, and any non-pending `status`.
//! Run this out-of-band; it is not reachable from the public surface.
//!
//! Usage:
//!   storefront-seed --file entries.json
//!
//! Environment variables:
//!   MONGODB_URI - MongoDB connection URI (default: mongodb://localhost:27017)
//!   MONGODB_DB - MongoDB database name (default: boycott)

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storefront::catalog::{MongoCatalogStore, SeedLoader};
use storefront::db::schemas::ProductDoc;
use storefront::db::MongoClient;

#[derive(Parser, Debug)]
#[command(name = "storefront-seed")]
#[command(about = "Bulk-load pre-formed catalog entries into MongoDB")]
struct Args {
    /// JSON file containing an array of entry records
    #[arg(long)]
    file: PathBuf,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "boycott")]
    mongodb_db: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let raw = tokio::fs::read_to_string(&args.file).await?;
    let entries: Vec<ProductDoc> = serde_json::from_str(&raw)?;
    info!(
        "Loaded {} entries from {}",
        entries.len(),
        args.file.display()
    );

    let mongo = match MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await {
        Ok(client) => client,
        Err(e) => {
            error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let store = Arc::new(MongoCatalogStore::new(&mongo).await?);
    let report = SeedLoader::new(store).load(entries).await;

    info!(
        "Seeding finished: {} inserted, {} failed",
        report.inserted, report.failed
    );

    Ok(())
}
