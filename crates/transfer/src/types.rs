use crate::SessionToken;

/// One chunk on its way to the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    pub token: SessionToken,
    /// Original file name, repeated on every chunk.
    pub filename: String,
    /// 0-based position of this chunk in the file.
    pub chunk_index: u64,
    pub payload: Vec<u8>,
}

/// Outcome of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Where the receiver published the reassembled file. Not interpreted.
    pub result_location: String,
}
