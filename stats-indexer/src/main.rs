use dotenv::dotenv;
use stats_indexer::{Dependencies, IndexingError};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Main entry point for the stats indexer application.
///
/// Initializes dotenv and tracing, sets up application dependencies, and
/// runs the ingestion pipeline once over all configured event kinds.
///
/// # Returns
///
/// A `Result` indicating success or an `IndexingError` if an error occurs
/// during initialization or execution.
#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dependencies = Dependencies::new().await?;

    let reports = dependencies.pipeline.run().await?;
    for report in &reports {
        info!(kind = %report.kind, summary = %report.summary(), "series processed");
    }
    Ok(())
}
