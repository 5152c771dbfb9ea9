//! Runs one upload and renders its events as log lines.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chunkup_client::{ClientConfig, HttpTransport, UploadEvent, UploadFile, Uploader};

/// Uploads `path` and returns the receiver's result location.
///
/// Ctrl-C cancels the upload after the chunk in flight completes.
pub async fn run(path: &Path, config: ClientConfig) -> anyhow::Result<String> {
    let file = UploadFile::open(path)
        .await
        .with_context(|| format!("cannot upload {}", path.display()))?;
    let transport = HttpTransport::new(&config)?;
    let uploader = Uploader::new(Arc::new(transport));

    tracing::info!(
        file = %file.name(),
        size = file.size(),
        server = %config.base_url,
        "uploading"
    );

    let mut handle = uploader.start_upload(file, config.chunk_size);
    let mut last_percent = None;

    loop {
        tokio::select! {
            event = handle.next_event() => {
                let Some(event) = event else { break };
                render(&event, &mut last_percent);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("SIGINT received, cancelling upload");
                handle.cancel();
            }
        }
    }

    let merged = handle.finish().await?;
    Ok(merged.result_location)
}

fn render(event: &UploadEvent, last_percent: &mut Option<u8>) {
    match event {
        UploadEvent::Progress {
            status,
            percent,
            chunks_sent,
            total_chunks,
        } => {
            // Only log when the visible percentage moves.
            if *last_percent != Some(*percent) {
                *last_percent = Some(*percent);
                tracing::info!(?status, chunks_sent, total_chunks, "{percent}%");
            }
        }
        UploadEvent::Completed { result_location } => {
            tracing::info!(location = %result_location, "upload complete");
        }
        UploadEvent::Failed { error } => {
            tracing::error!(%error, "upload failed");
        }
    }
}
