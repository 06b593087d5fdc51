mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blobrun_core::{
    load_config, validate_config, AzureBlobStore, BlobStore, StorageBackend, WorkflowRunner,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(version = VERSION, "blobrun starting");

    // Determine config path
    let config_path = std::env::var("BLOBRUN_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration. A placeholder account URL dies here, before any
    // credential or network work.
    validate_config(&config).context("Configuration validation failed")?;

    // Construct the storage client
    let store: Arc<dyn BlobStore> = match config.storage.backend {
        StorageBackend::Azure => {
            let azure = config
                .storage
                .azure
                .as_ref()
                .context("storage.azure section missing")?;
            info!(account_url = %azure.account_url, "Authenticating with Azure");
            Arc::new(
                AzureBlobStore::from_config(azure)
                    .context("Failed to construct Azure blob store")?,
            )
        }
    };

    // Run the workflow
    let runner = WorkflowRunner::new(config, store);
    let summary = runner.run().await.context("Workflow aborted")?;

    print!("{}", report::format_summary(&summary));

    Ok(())
}
