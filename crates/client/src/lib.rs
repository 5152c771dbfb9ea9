//! Sequential chunked upload client.
//!
//! An upload is driven by [`Uploader`]: the file is planned into chunks, a
//! fresh session token is allocated, chunks are sent one at a time through a
//! [`ChunkTransport`], and once every chunk was accepted the receiver is asked
//! to merge them. Progress and the final outcome are reported as
//! [`UploadEvent`]s on a channel.
//!
//! # Pipeline
//!
//! 1. **Plan**: validate the input and split it into chunks
//! 2. **Send**: one chunk in flight at a time, in index order
//! 3. **Merge**: ask the receiver to reassemble the chunks
//!
//! Any failure ends the session; there is no retry and no resume.

pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod uploader;

// Re-export primary types for convenience.
pub use chunkup_protocol::{UploadEvent, UploadStatus};
pub use chunkup_transfer::{ChunkRequest, MergeResult, SessionToken, UploadFile};
pub use config::ClientConfig;
pub use error::{TransferError, UploadError};
pub use http::HttpTransport;
pub use transport::ChunkTransport;
pub use uploader::{UploadHandle, Uploader};
