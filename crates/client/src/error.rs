//! Upload error types.

use chunkup_transfer::{ConfigError, SessionError};

/// A chunk send or merge request that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The receiver answered with a non-success status.
    #[error("receiver rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// No response was received (connect failure, timeout, broken body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The receiver answered with success but the body breaks the contract.
    #[error("invalid receiver response: {0}")]
    InvalidResponse(String),
}

impl TransferError {
    /// The receiver's diagnostic text, or the transport description when
    /// no response was received.
    pub fn diagnostic(&self) -> &str {
        match self {
            TransferError::Rejected { body, .. } => body,
            TransferError::Transport(msg) | TransferError::InvalidResponse(msg) => msg,
        }
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransferError::Transport(format!("request timed out: {e}"))
        } else {
            TransferError::Transport(e.to_string())
        }
    }
}

/// Errors that end an upload session.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("invalid upload: {0}")]
    Config(#[from] ConfigError),

    #[error("chunk {index} failed: {source}")]
    Chunk {
        index: u64,
        #[source]
        source: TransferError,
    },

    #[error("merge failed: {0}")]
    Merge(#[source] TransferError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session state: {0}")]
    InvalidState(String),

    #[error("cancelled")]
    Cancelled,

    #[error("upload task failed: {0}")]
    Task(String),
}

impl From<SessionError> for UploadError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Config(c) => UploadError::Config(c),
            other => UploadError::InvalidState(other.to_string()),
        }
    }
}

impl UploadError {
    /// The underlying transfer failure, if any.
    pub fn transfer(&self) -> Option<&TransferError> {
        match self {
            UploadError::Chunk { source, .. } | UploadError::Merge(source) => Some(source),
            _ => None,
        }
    }
}
