//! Client configuration.

use std::time::Duration;

use chunkup_protocol::constants::{CHUNK_PATH, DEFAULT_CHUNK_SIZE, MERGE_PATH};
use serde::{Deserialize, Serialize};

/// Where the receiver lives and how chunks are sent to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Receiver base URL, e.g. `http://127.0.0.1:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chunk endpoint path, relative to `base_url`.
    #[serde(default = "default_chunk_path")]
    pub chunk_path: String,

    /// Merge endpoint path, relative to `base_url`.
    #[serde(default = "default_merge_path")]
    pub merge_path: String,

    /// Chunk size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

fn default_chunk_path() -> String {
    CHUNK_PATH.into()
}

fn default_merge_path() -> String {
    MERGE_PATH.into()
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chunk_path: default_chunk_path(),
            merge_path: default_merge_path(),
            chunk_size: default_chunk_size(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with every other field defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Full URL of the chunk endpoint.
    pub fn chunk_url(&self) -> String {
        join_url(&self.base_url, &self.chunk_path)
    }

    /// Full URL of the merge endpoint.
    pub fn merge_url(&self) -> String {
        join_url(&self.base_url, &self.merge_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
