// Standard library
use std::error::Error;
use std::path::{Path, PathBuf};

// 3rd party crates
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

// Project imports
use crpt_client::client::{ClientError, DocumentClient};
use crpt_client::models::Document;
use crpt_client::settings::ConfigManager;

/// Loads the given documents and submits them.
///
/// This function:
/// - Builds a rate limited client from the validated settings
/// - Reads every document file, skipping unreadable ones
/// - Submits all documents concurrently
/// - Abandons pending submissions on shutdown signal
///
/// Returns an error when any document could not be loaded or submitted.
pub async fn run(
    config: &ConfigManager,
    paths: &[PathBuf],
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<(), Box<dyn Error>> {
    let settings = config.get_settings();
    let rate_limit = settings.rate_limit_config()?;
    info!(
        "🕰️ Submitting at most {} documents every {:?}",
        rate_limit.limit(),
        rate_limit.window()
    );

    let client = DocumentClient::from_config(&settings.client, rate_limit)?;

    let mut documents: Vec<Document> = Vec::with_capacity(paths.len());
    let mut load_failures: usize = 0;
    for path in paths {
        match load_document(path).await {
            Ok(document) => {
                debug!(doc_id = %document.doc_id, path = ?path, "Document loaded");
                documents.push(document);
            }
            Err(e) => {
                error!(path = ?path, "Failed to load document: {}", e);
                load_failures += 1;
            }
        }
    }

    let results: Vec<Result<String, ClientError>> = tokio::select! {
        Ok(_) = shutdown_rx.recv() => {
            warn!("Shutdown requested, abandoning pending submissions");
            Vec::new()
        }
        results = client.submit_all(&documents) => results,
    };

    for (document, result) in documents.iter().zip(&results) {
        match result {
            Ok(body) => info!(doc_id = %document.doc_id, response = %body, "Accepted"),
            Err(e) => error!(doc_id = %document.doc_id, "Not accepted: {}", e),
        }
    }

    let snapshot = client.metrics().get_snapshot().await;
    info!(
        attempts = snapshot.attempts,
        successes = snapshot.successes,
        rejected = snapshot.validation_rejections,
        failed = snapshot.transport_failures,
        "Submission summary"
    );

    let unfinished = documents.len() - snapshot.successes as usize;
    if load_failures > 0 || unfinished > 0 {
        return Err(format!(
            "{} of {} documents were not submitted",
            load_failures + unfinished,
            paths.len()
        )
        .into());
    }

    Ok(())
}

/// Reads one document from a JSON file.
async fn load_document(path: &Path) -> Result<Document, Box<dyn Error>> {
    let contents: String = tokio::fs::read_to_string(path).await?;
    let document: Document = serde_json::from_str(&contents)?;
    Ok(document)
}
