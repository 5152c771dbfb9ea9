use std::path::PathBuf;

use chunkup_client::ClientConfig;
use clap::Parser;

/// Upload a file to a chunk receiver, one chunk at a time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// File to upload.
    pub file: PathBuf,

    /// Config file (defaults to the per-user chunkup config).
    #[arg(long, env = "CHUNKUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Receiver base URL.
    #[arg(long, short, env = "CHUNKUP_SERVER")]
    pub server: Option<String>,

    /// Chunk size in bytes.
    #[arg(long)]
    pub chunk_size: Option<u64>,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Overrides file-based settings with the ones given on the command line.
    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(server) = &self.server {
            config.base_url = server.clone();
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
    }
}
