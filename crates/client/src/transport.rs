//! Transport seam between the upload driver and the receiver.

use std::future::Future;
use std::pin::Pin;

use chunkup_transfer::{ChunkRequest, MergeResult, SessionToken};

use crate::error::TransferError;

/// Boxed future returned by [`ChunkTransport`] methods.
pub type TransferFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TransferError>> + Send + 'a>>;

/// Sends chunks and merge requests to a receiver.
///
/// [`HttpTransport`](crate::HttpTransport) is the production implementation.
/// Keeping this a trait lets the session driver be tested without a network.
/// Implementations must not retry; the driver decides what a failure means.
pub trait ChunkTransport: Send + Sync {
    /// Transmits one chunk. `Ok` only on the receiver's affirmative answer.
    fn send_chunk(&self, request: ChunkRequest) -> TransferFuture<'_, ()>;

    /// Asks the receiver to reassemble every accepted chunk of `token`.
    fn request_merge<'a>(&'a self, token: &'a SessionToken) -> TransferFuture<'a, MergeResult>;
}
