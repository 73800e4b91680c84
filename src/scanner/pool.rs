//! Bounded worker pool.
//!
//! A fixed number of tokio tasks pull ports from a shared queue and push
//! each task's output into a completion channel. The number of workers is
//! the concurrency ceiling: no more than `limit` tasks are ever in flight.
//! Each task runs in its own spawned task awaited by its worker, so a task
//! that panics still yields exactly one output for its port.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::{trace, warn};

/// A fixed-size pool of port workers.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    limit: usize,
}

impl WorkerPool {
    /// Create a pool running at most `limit` tasks at once (minimum 1).
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    /// Maximum number of concurrent tasks.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of workers spawned for a queue of `queued` ports.
    pub fn worker_count(&self, queued: usize) -> usize {
        self.limit.min(queued)
    }

    /// Run `task` once for every port, returning the completion channel.
    ///
    /// Outputs arrive in completion order. A task that panics or is
    /// cancelled is replaced by `recover(port)`, so the channel always
    /// carries one output per port. The channel closes once every worker
    /// has drained the queue. Must be called within a tokio runtime.
    pub fn run<T, F, Fut, R>(
        &self,
        ports: impl IntoIterator<Item = u16>,
        task: F,
        recover: R,
    ) -> mpsc::Receiver<T>
    where
        T: Send + 'static,
        F: Fn(u16) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        R: Fn(u16) -> T + Send + Sync + 'static,
    {
        let queue: VecDeque<u16> = ports.into_iter().collect();
        let workers = self.worker_count(queue.len());
        let queue = Arc::new(Mutex::new(queue));
        let task = Arc::new(task);
        let recover = Arc::new(recover);
        let (tx, rx) = mpsc::channel(workers.max(1));

        for id in 0..workers {
            let queue = Arc::clone(&queue);
            let task = Arc::clone(&task);
            let recover = Arc::clone(&recover);
            let tx = tx.clone();

            tokio::spawn(async move {
                loop {
                    let next = queue
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .pop_front();
                    let Some(port) = next else {
                        break;
                    };

                    let handle = {
                        let task = Arc::clone(&task);
                        tokio::spawn(async move { task(port).await })
                    };
                    let output = match handle.await {
                        Ok(output) => output,
                        Err(e) => {
                            warn!(port, error = %e, "port task failed");
                            recover(port)
                        }
                    };
                    if tx.send(output).await.is_err() {
                        break;
                    }
                }
                trace!(worker = id, "worker drained queue");
            });
        }

        rx
    }
}
