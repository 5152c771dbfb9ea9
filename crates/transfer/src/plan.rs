use std::ops::Range;

use crate::ConfigError;

/// How a file of `file_size` bytes is split into `chunk_size` slices.
///
/// An empty file still has one (empty) chunk so that the receiver sees the
/// session and the merge step produces an empty file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    file_size: u64,
    chunk_size: u64,
    total_chunks: u64,
}

impl ChunkPlan {
    /// Plans `file_size` bytes in slices of `chunk_size`.
    ///
    /// Fails with [`ConfigError::InvalidChunkSize`] if `chunk_size` is 0.
    pub fn new(file_size: u64, chunk_size: u64) -> Result<Self, ConfigError> {
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunk_size));
        }
        let total_chunks = file_size.div_ceil(chunk_size).max(1);
        Ok(Self {
            file_size,
            chunk_size,
            total_chunks,
        })
    }

    /// Number of chunks, always at least 1.
    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Byte range `[start, end)` of chunk `index`, or `None` past the end.
    pub fn bounds_of(&self, index: u64) -> Option<Range<u64>> {
        if index >= self.total_chunks {
            return None;
        }
        let start = index * self.chunk_size;
        let end = self.file_size.min(start.saturating_add(self.chunk_size));
        Some(start..end)
    }

    /// Iterates over all chunk ranges in index order.
    pub fn chunks(&self) -> impl Iterator<Item = Range<u64>> + '_ {
        (0..self.total_chunks).filter_map(|i| self.bounds_of(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_three_chunks() {
        let plan = ChunkPlan::new(2_500_000, 1_000_000).unwrap();
        assert_eq!(plan.total_chunks(), 3);
        assert_eq!(plan.bounds_of(0), Some(0..1_000_000));
        assert_eq!(plan.bounds_of(1), Some(1_000_000..2_000_000));
        assert_eq!(plan.bounds_of(2), Some(2_000_000..2_500_000));
        assert_eq!(plan.bounds_of(3), None);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let plan = ChunkPlan::new(4_000, 1_000).unwrap();
        assert_eq!(plan.total_chunks(), 4);
        assert_eq!(plan.bounds_of(3), Some(3_000..4_000));
    }

    #[test]
    fn empty_file_has_one_empty_chunk() {
        let plan = ChunkPlan::new(0, 1024).unwrap();
        assert_eq!(plan.total_chunks(), 1);
        assert_eq!(plan.bounds_of(0), Some(0..0));
    }

    #[test]
    fn chunk_larger_than_file() {
        let plan = ChunkPlan::new(10, 1024).unwrap();
        assert_eq!(plan.total_chunks(), 1);
        assert_eq!(plan.bounds_of(0), Some(0..10));
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = ChunkPlan::new(100, 0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChunkSize(0)));
    }

    #[test]
    fn huge_chunk_size_does_not_overflow() {
        let plan = ChunkPlan::new(u64::MAX, u64::MAX).unwrap();
        assert_eq!(plan.total_chunks(), 1);
        assert_eq!(plan.bounds_of(0), Some(0..u64::MAX));
    }

    #[test]
    fn chunks_cover_file_contiguously() {
        for file_size in [0u64, 1, 7, 63, 64, 65, 1000, 4097] {
            for chunk_size in [1u64, 2, 3, 64, 100, 4096, 10_000] {
                let plan = ChunkPlan::new(file_size, chunk_size).unwrap();
                let ranges: Vec<_> = plan.chunks().collect();
                assert_eq!(ranges.len() as u64, plan.total_chunks());

                let mut expected_start = 0;
                for r in &ranges {
                    assert_eq!(r.start, expected_start, "gap or overlap");
                    assert!(r.end - r.start <= chunk_size);
                    expected_start = r.end;
                }
                let covered: u64 = ranges.iter().map(|r| r.end - r.start).sum();
                assert_eq!(covered, file_size);
            }
        }
    }

    #[test]
    fn deterministic() {
        let a = ChunkPlan::new(12_345, 1_000).unwrap();
        let b = ChunkPlan::new(12_345, 1_000).unwrap();
        assert_eq!(a, b);
        assert!(a.chunks().eq(b.chunks()));
    }
}
