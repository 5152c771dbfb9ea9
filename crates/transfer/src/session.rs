use std::ops::Range;

use chunkup_protocol::UploadStatus;

use crate::{ChunkPlan, SessionError, SessionToken, percent, validate_file_name};

/// Next chunk the session expects to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChunk {
    pub index: u64,
    pub range: Range<u64>,
}

/// State of one upload, independent of any transport.
///
/// ```text
/// Idle -> InProgress -> AwaitingMerge -> Completed
///            |               |
///            +---> Failed <--+
/// ```
///
/// Chunks are handed out strictly in index order and the next one is only
/// available after the previous one was acknowledged, so at most one chunk
/// is ever in flight.
#[derive(Debug, Default)]
pub struct UploadSession {
    active: Option<Active>,
    status: UploadStatus,
    error: Option<String>,
}

#[derive(Debug)]
struct Active {
    token: SessionToken,
    plan: ChunkPlan,
    file_name: String,
    current_chunk_index: u64,
}

impl UploadSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle -> InProgress: plans the chunks and allocates a fresh token.
    ///
    /// Input errors leave the session idle.
    pub fn start(
        &mut self,
        file_name: &str,
        file_size: u64,
        chunk_size: u64,
    ) -> Result<(), SessionError> {
        self.expect(UploadStatus::Idle, "start")?;
        validate_file_name(file_name)?;
        let plan = ChunkPlan::new(file_size, chunk_size)?;

        self.active = Some(Active {
            token: SessionToken::generate(),
            plan,
            file_name: file_name.to_string(),
            current_chunk_index: 0,
        });
        self.status = UploadStatus::InProgress;
        Ok(())
    }

    /// The chunk to send next, if the session is in progress.
    pub fn next_chunk(&self) -> Option<PendingChunk> {
        if self.status() != UploadStatus::InProgress {
            return None;
        }
        let active = self.active.as_ref()?;
        let index = active.current_chunk_index;
        active
            .plan
            .bounds_of(index)
            .map(|range| PendingChunk { index, range })
    }

    /// Records that the pending chunk was accepted by the receiver.
    ///
    /// Moves to AwaitingMerge after the last chunk. Returns the new percentage.
    pub fn chunk_accepted(&mut self) -> Result<u8, SessionError> {
        self.expect(UploadStatus::InProgress, "accept a chunk")?;
        let last = self.active.as_mut().is_some_and(|a| {
            a.current_chunk_index += 1;
            a.current_chunk_index == a.plan.total_chunks()
        });
        if last {
            self.status = UploadStatus::AwaitingMerge;
        }
        Ok(self.percent())
    }

    /// AwaitingMerge -> Completed.
    pub fn merge_succeeded(&mut self) -> Result<(), SessionError> {
        self.expect(UploadStatus::AwaitingMerge, "complete the merge")?;
        self.status = UploadStatus::Completed;
        Ok(())
    }

    /// InProgress | AwaitingMerge -> Failed.
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), SessionError> {
        match self.status() {
            UploadStatus::InProgress | UploadStatus::AwaitingMerge => {
                self.error = Some(error.into());
                self.status = UploadStatus::Failed;
                Ok(())
            }
            _ => Err(self.invalid("fail")),
        }
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Session token, once started.
    pub fn token(&self) -> Option<&SessionToken> {
        self.active.as_ref().map(|a| &a.token)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.file_name.as_str())
    }

    /// Number of chunks in the plan (0 while idle).
    pub fn total_chunks(&self) -> u64 {
        self.active.as_ref().map_or(0, |a| a.plan.total_chunks())
    }

    /// Number of chunks accepted so far.
    pub fn chunks_sent(&self) -> u64 {
        self.active.as_ref().map_or(0, |a| a.current_chunk_index)
    }

    pub fn percent(&self) -> u8 {
        percent(self.chunks_sent(), self.total_chunks())
    }

    /// Failure message, if the session failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn expect(&self, status: UploadStatus, action: &'static str) -> Result<(), SessionError> {
        if self.status() == status {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            from: self.status(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    fn started(size: u64, chunk: u64) -> UploadSession {
        let mut s = UploadSession::new();
        s.start("abc.mp4", size, chunk).unwrap();
        s
    }

    #[test]
    fn new_session_is_idle() {
        let s = UploadSession::new();
        assert_eq!(s.status(), UploadStatus::Idle);
        assert!(s.token().is_none());
        assert!(s.next_chunk().is_none());
        assert_eq!(s.percent(), 0);
    }

    #[test]
    fn start_plans_and_allocates_token() {
        let s = started(2_500_000, 1_000_000);
        assert_eq!(s.status(), UploadStatus::InProgress);
        assert_eq!(s.total_chunks(), 3);
        assert_eq!(s.chunks_sent(), 0);
        assert_eq!(s.file_name(), Some("abc.mp4"));
        assert!(s.token().is_some());
        assert_eq!(
            s.next_chunk(),
            Some(PendingChunk {
                index: 0,
                range: 0..1_000_000
            })
        );
    }

    #[test]
    fn start_rejects_bad_input_and_stays_idle() {
        let mut s = UploadSession::new();
        let err = s.start("abc.mp4", 10, 0).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Config(ConfigError::InvalidChunkSize(0))
        ));
        assert_eq!(s.status(), UploadStatus::Idle);

        let err = s.start("", 10, 4).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Config(ConfigError::InvalidFileName(_))
        ));
        assert_eq!(s.status(), UploadStatus::Idle);
    }

    #[test]
    fn start_twice_rejected() {
        let mut s = started(10, 4);
        assert!(matches!(
            s.start("abc.mp4", 10, 4),
            Err(SessionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn chunks_advance_in_order_then_await_merge() {
        let mut s = started(2_500_000, 1_000_000);

        assert_eq!(s.chunk_accepted().unwrap(), 33);
        assert_eq!(s.next_chunk().unwrap().index, 1);
        assert_eq!(s.chunk_accepted().unwrap(), 66);
        assert_eq!(s.next_chunk().unwrap().range, 2_000_000..2_500_000);
        assert_eq!(s.chunk_accepted().unwrap(), 100);

        assert_eq!(s.status(), UploadStatus::AwaitingMerge);
        assert!(s.next_chunk().is_none());
        assert!(s.chunk_accepted().is_err());

        s.merge_succeeded().unwrap();
        assert_eq!(s.status(), UploadStatus::Completed);
    }

    #[test]
    fn empty_file_sends_one_empty_chunk() {
        let mut s = started(0, 1024);
        assert_eq!(s.total_chunks(), 1);
        assert_eq!(s.next_chunk().unwrap().range, 0..0);
        assert_eq!(s.chunk_accepted().unwrap(), 100);
        assert_eq!(s.status(), UploadStatus::AwaitingMerge);
    }

    #[test]
    fn merge_before_all_chunks_rejected() {
        let mut s = started(10, 4);
        s.chunk_accepted().unwrap();
        assert!(s.merge_succeeded().is_err());
        assert_eq!(s.status(), UploadStatus::InProgress);
    }

    #[test]
    fn fail_from_in_progress() {
        let mut s = started(10, 4);
        s.chunk_accepted().unwrap();
        s.fail("connection reset").unwrap();
        assert_eq!(s.status(), UploadStatus::Failed);
        assert_eq!(s.error(), Some("connection reset"));
        assert!(s.next_chunk().is_none());
    }

    #[test]
    fn fail_from_awaiting_merge() {
        let mut s = started(3, 4);
        s.chunk_accepted().unwrap();
        s.fail("Missing metadata").unwrap();
        assert_eq!(s.status(), UploadStatus::Failed);
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        let mut done = started(3, 4);
        done.chunk_accepted().unwrap();
        done.merge_succeeded().unwrap();
        assert!(done.fail("late").is_err());
        assert!(done.merge_succeeded().is_err());
        assert!(done.chunk_accepted().is_err());
        assert_eq!(done.status(), UploadStatus::Completed);

        let mut failed = started(3, 4);
        failed.fail("boom").unwrap();
        assert!(failed.fail("again").is_err());
        assert!(failed.chunk_accepted().is_err());
        assert!(failed.start("abc.mp4", 3, 4).is_err());
        assert_eq!(failed.error(), Some("boom"));
    }

    #[test]
    fn idle_session_cannot_fail() {
        let mut s = UploadSession::new();
        assert!(s.fail("nothing started").is_err());
        assert_eq!(s.status(), UploadStatus::Idle);
    }

    #[test]
    fn restarting_uses_fresh_token() {
        let mut first = started(10, 4);
        first.fail("boom").unwrap();
        let second = started(10, 4);
        assert_ne!(first.token(), second.token());
    }
}
