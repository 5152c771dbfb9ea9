use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Receiver responses
// ---------------------------------------------------------------------------

/// Acknowledgement returned by the chunk endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkAck {
    #[serde(default)]
    pub status: String,
    pub index: u64,
}

/// Reply from the merge endpoint once all chunks were reassembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeResponse {
    #[serde(default)]
    pub status: String,
    /// Location of the finished artifact. Opaque to the client.
    pub video_url: String,
}

/// Error body produced by receivers on rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
