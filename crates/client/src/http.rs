//! HTTP receiver transport.
//!
//! Async client using `reqwest` multipart forms against the chunk and merge
//! endpoints described by [`ClientConfig`].

use chunkup_protocol::constants::{
    BLOB_FILE_NAME, FIELD_CHUNK_INDEX, FIELD_FILE, FIELD_FILENAME, FIELD_UNIQUE_FOLDER,
};
use chunkup_protocol::messages::{ChunkAck, MergeResponse};
use chunkup_transfer::{ChunkRequest, MergeResult, SessionToken};
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TransferError;
use crate::transport::{ChunkTransport, TransferFuture};

/// [`ChunkTransport`] talking to an HTTP receiver.
pub struct HttpTransport {
    http: reqwest::Client,
    chunk_url: String,
    merge_url: String,
}

impl HttpTransport {
    /// Builds a transport with the timeouts and endpoints from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, TransferError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| TransferError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            chunk_url: config.chunk_url(),
            merge_url: config.merge_url(),
        })
    }

    async fn post_chunk(&self, request: ChunkRequest) -> Result<(), TransferError> {
        let index = request.chunk_index;
        let bytes = request.payload.len();

        let file = Part::bytes(request.payload)
            .file_name(BLOB_FILE_NAME)
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .part(FIELD_FILE, file)
            .text(FIELD_CHUNK_INDEX, index.to_string())
            .text(FIELD_UNIQUE_FOLDER, request.token.to_string())
            .text(FIELD_FILENAME, request.filename);

        let resp = self.http.post(&self.chunk_url).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(TransferError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Bodies that are not an acknowledgement are accepted as-is; only a
        // mismatching index is treated as a broken contract.
        if let Ok(ack) = serde_json::from_str::<ChunkAck>(&body)
            && ack.index != index
        {
            return Err(TransferError::InvalidResponse(format!(
                "acknowledged chunk {} instead of {index}",
                ack.index
            )));
        }

        debug!(index, bytes, status = status.as_u16(), "chunk accepted");
        Ok(())
    }

    async fn post_merge(&self, token: &SessionToken) -> Result<MergeResult, TransferError> {
        let resp = self
            .http
            .post(&self.merge_url)
            .query(&[(FIELD_UNIQUE_FOLDER, token.as_str())])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(TransferError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let merged: MergeResponse = serde_json::from_str(&body)
            .map_err(|e| TransferError::InvalidResponse(format!("merge reply: {e}")))?;

        debug!(%token, location = %merged.video_url, "merge accepted");
        Ok(MergeResult {
            result_location: merged.video_url,
        })
    }
}

impl ChunkTransport for HttpTransport {
    fn send_chunk(&self, request: ChunkRequest) -> TransferFuture<'_, ()> {
        Box::pin(self.post_chunk(request))
    }

    fn request_merge<'a>(&'a self, token: &'a SessionToken) -> TransferFuture<'a, MergeResult> {
        Box::pin(self.post_merge(token))
    }
}
