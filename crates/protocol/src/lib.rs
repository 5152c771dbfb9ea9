pub mod constants;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use messages::{ChunkAck, ErrorDetail, MergeResponse};
pub use types::{UploadEvent, UploadStatus};
