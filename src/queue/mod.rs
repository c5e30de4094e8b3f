//! Asynchronous send path.
//!
//! The core only publishes [`SendTask`] envelopes to a [`TaskQueue`] and
//! is invoked once per dequeued envelope through [`SendTaskHandler`].
//! Worker pools, ordering and retry policy belong to the queue backend.
//! [`ChannelQueue`] and [`QueueWorker`] are a minimal in-process backend.

mod channel;
mod handler;
mod task;


use thiserror::Error;

pub use channel::{ChannelQueue, QueueWorker, TaskReceiver, WorkerStats};
pub use handler::SendTaskHandler;
pub use task::SendTask;

/// Error returned when a task cannot be published.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The consuming side has shut down.
    #[error("Task queue is closed")]
    Closed,
}

/// Publish side of a task queue.
pub trait TaskQueue: Send + Sync {
    /// Publishes one envelope.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError`] if the queue does not accept the task.
    fn enqueue(
        &self,
        task: SendTask,
    ) -> impl std::future::Future<Output = Result<(), QueueError>> + Send;
}
