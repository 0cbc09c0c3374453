//! Ingest command - loads a corpus directory into the vector store

use clap::Args;
use tracing::{info, warn};

use super::{bootstrap, ConfigArgs};
use crate::infrastructure::ingestion::DirectorySource;

#[derive(Args, Clone, Debug)]
pub struct IngestArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Corpus directory (overrides `ingestion.corpus_dir`)
    #[arg(long)]
    pub dir: Option<String>,

    /// Add to the existing collection instead of recreating it
    #[arg(long)]
    pub keep_existing: bool,
}

/// Run one ingestion pass over the corpus directory
pub async fn run(args: IngestArgs) -> anyhow::Result<()> {
    let config = bootstrap(&args.config)?;

    let context = crate::create_app_context(&config, !args.keep_existing).await?;

    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| config.ingestion.corpus_dir.clone());
    let source = DirectorySource::new(&dir).with_extensions(&config.ingestion.extensions);

    info!(dir = %dir, truncate = !args.keep_existing, "Starting ingestion");
    let result = context.pipeline.ingest_source(&source).await;
    context.shutdown().await;
    let summary = result?;

    for report in summary.reports.iter().filter(|r| r.failed) {
        warn!(document = %report.document, errors = ?report.errors, "Document failed");
    }

    println!(
        "Ingested {} of {} documents ({} chunks stored, {} failed)",
        summary.successful,
        summary.total_documents,
        summary.total_chunks_stored(),
        summary.failed
    );

    Ok(())
}
