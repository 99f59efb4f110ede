//! Background reply processing.
//!
//! Webhook requests hand a [`ReplyJob`] to the [`ReplyPool`] and return
//! immediately. A fixed set of worker tasks drains a bounded queue and runs
//! each job through the [`ReplyPipeline`]:
//!
//! - safety pre-check (refuse directly, skipping the generator)
//! - reply generation
//! - best-effort delivery
//!
//! [`ReplyPool::shutdown`] stops intake and lets accepted jobs finish, since
//! the platform will not redeliver an update that was acknowledged.

mod pipeline;
mod pool;

pub use pipeline::{ReplyJob, ReplyPipeline};
pub use pool::{
    PoolConfig, ReplyPool, DEFAULT_DRAIN_TIMEOUT, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS,
};
