use serde::{Deserialize, Serialize};

/// Lifecycle state of an upload session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    #[default]
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "awaiting_merge")]
    AwaitingMerge,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "failed")]
    Failed,
}

impl UploadStatus {
    /// Returns `true` once no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Failed)
    }
}

/// Event emitted to whoever presents an upload (progress bar, log, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UploadEvent {
    /// Progress update.
    Progress {
        status: UploadStatus,
        percent: u8,
        chunks_sent: u64,
        total_chunks: u64,
    },
    /// Merge succeeded.
    Completed { result_location: String },
    /// The session failed and will not continue.
    Failed { error: String },
}

impl UploadEvent {
    /// Status the session is in after this event.
    pub fn status(&self) -> UploadStatus {
        match self {
            UploadEvent::Progress { status, .. } => *status,
            UploadEvent::Completed { .. } => UploadStatus::Completed,
            UploadEvent::Failed { .. } => UploadStatus::Failed,
        }
    }

    /// Returns `true` for the final event of a session.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}
