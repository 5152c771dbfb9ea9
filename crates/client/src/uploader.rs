//! Upload driver.
//!
//! Runs an [`UploadSession`] against a [`ChunkTransport`], sending chunks
//! strictly one after another, and reports progress as [`UploadEvent`]s.

use std::sync::Arc;

use chunkup_protocol::{UploadEvent, UploadStatus};
use chunkup_transfer::{ChunkRequest, MergeResult, UploadFile, UploadSession};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::UploadError;
use crate::transport::ChunkTransport;

/// Capacity of the event channel created by [`Uploader::start_upload`].
const EVENT_BUFFER: usize = 256;

/// Drives upload sessions over a shared transport.
///
/// Sessions started from the same uploader are independent: each gets its
/// own token and state. Cancelling [`Uploader::cancel_token`] stops all of
/// them; [`UploadHandle::cancel`] stops one.
pub struct Uploader {
    transport: Arc<dyn ChunkTransport>,
    cancel: CancellationToken,
}

impl Uploader {
    pub fn new(transport: Arc<dyn ChunkTransport>) -> Self {
        Self {
            transport,
            cancel: CancellationToken::new(),
        }
    }

    /// Returns the token that cancels every session of this uploader.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Spawns an upload of `file` and returns a handle to its event stream.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_upload(&self, file: UploadFile, chunk_size: u64) -> UploadHandle {
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let cancel = self.cancel.child_token();
        let transport = Arc::clone(&self.transport);

        let task = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                run_session(transport.as_ref(), &file, chunk_size, &cancel, &events_tx).await
            }
        });

        UploadHandle {
            events: events_rx,
            task,
            cancel,
        }
    }

    /// Uploads `file` in place, sending events to `events_tx`.
    ///
    /// Exactly one terminal event (`Completed` or `Failed`) is sent. Events
    /// are dropped silently if the receiver side of the channel is gone.
    pub async fn upload(
        &self,
        file: &UploadFile,
        chunk_size: u64,
        events_tx: &mpsc::Sender<UploadEvent>,
    ) -> Result<MergeResult, UploadError> {
        run_session(
            self.transport.as_ref(),
            file,
            chunk_size,
            &self.cancel,
            events_tx,
        )
        .await
    }
}

/// A running upload spawned by [`Uploader::start_upload`].
pub struct UploadHandle {
    events: mpsc::Receiver<UploadEvent>,
    task: JoinHandle<Result<MergeResult, UploadError>>,
    cancel: CancellationToken,
}

impl UploadHandle {
    /// Next event, or `None` once the session finished and all events were read.
    pub async fn next_event(&mut self) -> Option<UploadEvent> {
        self.events.recv().await
    }

    /// Requests cancellation. A chunk already in flight completes first.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the session to end. Unread events are discarded.
    pub async fn finish(self) -> Result<MergeResult, UploadError> {
        drop(self.events);
        self.task
            .await
            .map_err(|e| UploadError::Task(e.to_string()))?
    }
}

async fn run_session(
    transport: &dyn ChunkTransport,
    file: &UploadFile,
    chunk_size: u64,
    cancel: &CancellationToken,
    events_tx: &mpsc::Sender<UploadEvent>,
) -> Result<MergeResult, UploadError> {
    let mut session = UploadSession::new();

    let result = match session.start(file.name(), file.size(), chunk_size) {
        Ok(()) => drive(transport, &mut session, file, cancel, events_tx).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(merged) => {
            info!(
                token = ?session.token().map(|t| t.as_str()),
                location = %merged.result_location,
                "upload completed"
            );
            emit(
                events_tx,
                UploadEvent::Completed {
                    result_location: merged.result_location.clone(),
                },
            )
            .await;
            Ok(merged)
        }
        Err(e) => {
            let message = e.to_string();
            // Input errors never leave Idle; there is nothing to fail.
            if session.status() != UploadStatus::Idle {
                let _ = session.fail(message.clone());
            }
            error!(
                token = ?session.token().map(|t| t.as_str()),
                chunks_sent = session.chunks_sent(),
                error = %message,
                "upload failed"
            );
            emit(events_tx, UploadEvent::Failed { error: message }).await;
            Err(e)
        }
    }
}

async fn drive(
    transport: &dyn ChunkTransport,
    session: &mut UploadSession,
    file: &UploadFile,
    cancel: &CancellationToken,
    events_tx: &mpsc::Sender<UploadEvent>,
) -> Result<MergeResult, UploadError> {
    let token = session
        .token()
        .cloned()
        .ok_or_else(|| UploadError::InvalidState("session has no token".into()))?;

    info!(
        %token,
        file = %file.name(),
        size = file.size(),
        total_chunks = session.total_chunks(),
        "upload started"
    );
    emit_progress(events_tx, session).await;

    let mut reader = file.reader().await?;

    while let Some(chunk) = session.next_chunk() {
        check_cancelled(cancel)?;

        let payload = reader.read_range(chunk.range.clone()).await?;
        debug!(%token, index = chunk.index, bytes = payload.len(), "sending chunk");

        let request = ChunkRequest {
            token: token.clone(),
            filename: file.name().to_string(),
            chunk_index: chunk.index,
            payload,
        };
        transport
            .send_chunk(request)
            .await
            .map_err(|source| UploadError::Chunk {
                index: chunk.index,
                source,
            })?;

        session.chunk_accepted()?;
        emit_progress(events_tx, session).await;
    }

    check_cancelled(cancel)?;

    debug!(%token, "requesting merge");
    let merged = transport
        .request_merge(&token)
        .await
        .map_err(UploadError::Merge)?;
    session.merge_succeeded()?;

    Ok(merged)
}

fn check_cancelled(cancel: &CancellationToken) -> Result<(), UploadError> {
    if cancel.is_cancelled() {
        Err(UploadError::Cancelled)
    } else {
        Ok(())
    }
}

async fn emit_progress(events_tx: &mpsc::Sender<UploadEvent>, session: &UploadSession) {
    emit(
        events_tx,
        UploadEvent::Progress {
            status: session.status(),
            percent: session.percent(),
            chunks_sent: session.chunks_sent(),
            total_chunks: session.total_chunks(),
        },
    )
    .await;
}

async fn emit(events_tx: &mpsc::Sender<UploadEvent>, event: UploadEvent) {
    let _ = events_tx.send(event).await;
}
