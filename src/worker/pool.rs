//! Bounded worker pool.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;

use super::pipeline::{ReplyJob, ReplyPipeline};
use crate::error::RelayError;
use crate::Result;

/// Default number of concurrent reply workers.
pub const DEFAULT_WORKERS: usize = 8;

/// Default number of jobs that may wait for a worker.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Default time [`ReplyPool::shutdown`] waits for accepted jobs.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Worker tasks processing jobs concurrently.
    pub workers: usize,
    /// Jobs buffered while every worker is busy.
    pub queue_capacity: usize,
    /// Upper bound on the shutdown drain.
    pub drain_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}

type SharedReceiver = Arc<Mutex<mpsc::Receiver<ReplyJob>>>;

/// Handle for submitting reply jobs.
///
/// At most `workers + queue_capacity` jobs are outstanding at once; further
/// submissions are rejected instead of growing memory.
#[derive(Clone)]
pub struct ReplyPool {
    tx: mpsc::Sender<ReplyJob>,
    closing: Arc<watch::Sender<bool>>,
    workers: Arc<std::sync::Mutex<Vec<JoinHandle<()>>>>,
    worker_count: usize,
    drain_timeout: Duration,
}

impl ReplyPool {
    /// Spawn the workers. Must be called from within a tokio runtime.
    pub fn start(pipeline: Arc<ReplyPipeline>, config: PoolConfig) -> Self {
        let (tx, rx) = mpsc::channel::<ReplyJob>(config.queue_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let (closing, _) = watch::channel(false);
        let worker_count = config.workers.max(1);

        let workers = (0..worker_count)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    worker_id,
                    Arc::clone(&rx),
                    closing.subscribe(),
                    Arc::clone(&pipeline),
                ))
            })
            .collect();

        tracing::info!(
            workers = worker_count,
            queue_capacity = config.queue_capacity.max(1),
            "reply pool started"
        );

        Self {
            tx,
            closing: Arc::new(closing),
            workers: Arc::new(std::sync::Mutex::new(workers)),
            worker_count,
            drain_timeout: config.drain_timeout,
        }
    }

    /// Queue a job without waiting.
    pub fn submit(&self, job: ReplyJob) -> Result<()> {
        self.tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(job) => {
                tracing::warn!(user = %job.user_id, "reply queue full, rejecting message");
                RelayError::QueueFull
            }
            mpsc::error::TrySendError::Closed(_) => RelayError::QueueClosed,
        })
    }

    /// Stop accepting jobs and wait for every accepted one to finish.
    ///
    /// Jobs already queued are still processed. Later submissions fail with
    /// [`RelayError::QueueClosed`]. Gives up after the configured drain
    /// timeout, leaving the remaining workers detached.
    pub async fn shutdown(&self) -> Result<()> {
        self.closing.send_replace(true);

        let handles = std::mem::take(
            &mut *self
                .workers
                .lock()
                .map_err(|_| RelayError::LockPoisoned)?,
        );
        tracing::info!(pending = self.queued(), "draining reply queue");

        let drain = async {
            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::error!(error = %e, "reply worker panicked");
                }
            }
        };

        match tokio::time::timeout(self.drain_timeout, drain).await {
            Ok(()) => {
                tracing::info!("reply pool stopped");
                Ok(())
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.drain_timeout, "reply pool drain timed out");
                Err(RelayError::DrainTimeout(self.drain_timeout))
            }
        }
    }

    /// Number of worker tasks.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Free queue slots right now.
    pub fn available_capacity(&self) -> usize {
        self.tx.capacity()
    }

    fn queued(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }
}

async fn run_worker(
    worker_id: usize,
    rx: SharedReceiver,
    mut closing: watch::Receiver<bool>,
    pipeline: Arc<ReplyPipeline>,
) {
    loop {
        // Release the receiver before processing so other workers can pick
        // up jobs meanwhile.
        let job = {
            let mut rx = rx.lock().await;
            if *closing.borrow_and_update() {
                rx.close();
            }
            tokio::select! {
                biased;
                job = rx.recv() => job,
                _ = closing.changed() => {
                    // Closing keeps buffered jobs; recv yields None once empty
                    rx.close();
                    rx.recv().await
                }
            }
        };
        let Some(job) = job else { break };

        tracing::debug!(worker_id, user = %job.user_id, "processing reply job");
        pipeline.process(job).await;
    }
    tracing::debug!(worker_id, "reply worker stopped");
}
