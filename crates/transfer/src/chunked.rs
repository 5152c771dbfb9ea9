use std::io::{Error, ErrorKind, SeekFrom};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::ConfigError;

// ---------------------------------------------------------------------------
// UploadFile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Source {
    Memory(Arc<[u8]>),
    Disk(PathBuf),
}

/// A named, immutable byte sequence of known size to be uploaded.
#[derive(Debug, Clone)]
pub struct UploadFile {
    name: String,
    size: u64,
    source: Source,
}

impl UploadFile {
    /// Describes the file at `path`. The upload name is its last component.
    ///
    /// Only metadata is read here; contents are read chunk by chunk later.
    pub async fn open(path: &Path) -> Result<Self, ConfigError> {
        let meta = tokio::fs::metadata(path).await?;
        if !meta.is_file() {
            return Err(ConfigError::NotAFile(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ConfigError::InvalidFileName(path.display().to_string()))?;
        Ok(Self {
            name,
            size: meta.len(),
            source: Source::Disk(path.to_path_buf()),
        })
    }

    /// Wraps an in-memory buffer.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        let data: Arc<[u8]> = data.into();
        Self {
            name: name.into(),
            size: data.len() as u64,
            source: Source::Memory(data),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Opens a reader over the file contents.
    pub async fn reader(&self) -> Result<ChunkReader, Error> {
        let source = match &self.source {
            Source::Memory(data) => ReaderSource::Memory(Arc::clone(data)),
            Source::Disk(path) => ReaderSource::Disk(tokio::fs::File::open(path).await?),
        };
        Ok(ChunkReader {
            source,
            size: self.size,
        })
    }
}

// ---------------------------------------------------------------------------
// ChunkReader
// ---------------------------------------------------------------------------

enum ReaderSource {
    Memory(Arc<[u8]>),
    Disk(tokio::fs::File),
}

/// Reads byte ranges of an [`UploadFile`], one chunk at a time.
pub struct ChunkReader {
    source: ReaderSource,
    size: u64,
}

impl ChunkReader {
    /// Reads exactly the bytes in `range`.
    ///
    /// Fails with `UnexpectedEof` if the range reaches past the size the
    /// file had when it was opened (e.g. it was truncated meanwhile).
    pub async fn read_range(&mut self, range: Range<u64>) -> Result<Vec<u8>, Error> {
        if range.start > range.end || range.end > self.size {
            return Err(Error::new(
                ErrorKind::UnexpectedEof,
                format!(
                    "range {}..{} outside file of {} bytes",
                    range.start, range.end, self.size
                ),
            ));
        }
        let len = (range.end - range.start) as usize;

        match &mut self.source {
            ReaderSource::Memory(data) => {
                Ok(data[range.start as usize..range.end as usize].to_vec())
            }
            ReaderSource::Disk(file) => {
                let mut buf = vec![0u8; len];
                if len > 0 {
                    file.seek(SeekFrom::Start(range.start)).await?;
                    file.read_exact(&mut buf).await?;
                }
                Ok(buf)
            }
        }
    }

    /// Size of the underlying file in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }
}
