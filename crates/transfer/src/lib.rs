//! Client-side building blocks of a chunked upload: how a file is split,
//! how a session is identified, and which state a session is in.
//!
//! Nothing in this crate touches the network.

mod chunked;
mod plan;
mod progress;
mod session;
mod token;
mod types;
mod validation;

use std::path::PathBuf;

pub use chunked::{ChunkReader, UploadFile};
pub use chunkup_protocol::constants::DEFAULT_CHUNK_SIZE;
pub use plan::ChunkPlan;
pub use progress::percent;
pub use session::{PendingChunk, UploadSession};
pub use token::SessionToken;
pub use types::{ChunkRequest, MergeResult};
pub use validation::validate_file_name;

use chunkup_protocol::UploadStatus;

/// Invalid input detected before any network activity.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid chunk size: {0} (must be greater than zero)")]
    InvalidChunkSize(u64),

    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by [`UploadSession`] transitions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot {action} while session is {from:?}")]
    InvalidTransition {
        from: UploadStatus,
        action: &'static str,
    },
}
