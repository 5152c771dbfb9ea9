//! Receiver endpoint paths and multipart field names.

/// Default chunk size (1 MiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

/// Path of the chunk upload endpoint, relative to the receiver base URL.
pub const CHUNK_PATH: &str = "/upload_chunk/";

/// Path of the merge endpoint, relative to the receiver base URL.
pub const MERGE_PATH: &str = "/merge_chunks/";

/// Multipart part carrying the chunk bytes.
pub const FIELD_FILE: &str = "file";

/// Multipart part carrying the 0-based chunk index.
pub const FIELD_CHUNK_INDEX: &str = "chunk_index";

/// Multipart part (and merge query parameter) carrying the session token.
pub const FIELD_UNIQUE_FOLDER: &str = "unique_folder";

/// Multipart part carrying the original file name.
pub const FIELD_FILENAME: &str = "filename";

/// File name attached to the binary part. Receivers ignore it; the real
/// name travels in [`FIELD_FILENAME`].
pub const BLOB_FILE_NAME: &str = "blob";
