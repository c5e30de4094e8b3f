//! In-process task queue over a tokio channel.

use tokio::sync::mpsc;

use crate::events::EventSink;
use crate::transport::EmailProvider;

use super::{QueueError, SendTask, SendTaskHandler, TaskQueue};

/// Publishing half of an in-process queue.
///
/// Backed by a bounded channel: [`enqueue`](TaskQueue::enqueue) waits
/// while the queue is full.
#[derive(Debug, Clone)]
pub struct ChannelQueue {
    tx: mpsc::Sender<SendTask>,
}

/// Consuming half of an in-process queue, drained by [`QueueWorker`].
#[derive(Debug)]
pub struct TaskReceiver {
    rx: mpsc::Receiver<SendTask>,
}

impl ChannelQueue {
    /// Creates a queue holding at most `capacity` pending tasks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, TaskReceiver) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, TaskReceiver { rx })
    }
}

impl TaskReceiver {
    /// Waits for the next task. Returns `None` once every sender is gone
    /// and the queue is empty.
    pub async fn recv(&mut self) -> Option<SendTask> {
        self.rx.recv().await
    }
}

impl TaskQueue for ChannelQueue {
    async fn enqueue(&self, task: SendTask) -> Result<(), QueueError> {
        self.tx.send(task).await.map_err(|_| QueueError::Closed)
    }
}

/// Totals reported when a worker stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Tasks the provider accepted
    pub succeeded: usize,
    /// Tasks that returned an error
    pub failed: usize,
}

/// Drains a [`TaskReceiver`], running each task once through a handler.
///
/// Failures are logged and counted; redelivery is left to whatever queue
/// backend sits in front of the handler.
#[derive(Debug)]
pub struct QueueWorker<P, E> {
    receiver: TaskReceiver,
    handler: SendTaskHandler<P, E>,
}

impl<P: EmailProvider, E: EventSink> QueueWorker<P, E> {
    /// Creates a worker.
    #[must_use]
    pub const fn new(receiver: TaskReceiver, handler: SendTaskHandler<P, E>) -> Self {
        Self { receiver, handler }
    }

    /// Runs until every [`ChannelQueue`] handle has been dropped and the
    /// queue is empty.
    pub async fn run(mut self) -> WorkerStats {
        let mut stats = WorkerStats::default();

        while let Some(task) = self.receiver.recv().await {
            match self.handler.handle(task).await {
                Ok(_) => stats.succeeded += 1,
                Err(e) => {
                    stats.failed += 1;
                    tracing::warn!("Queued email dropped after failed attempt: {e}");
                }
            }
        }

        tracing::debug!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            "Queue worker stopped"
        );
        stats
    }
}
