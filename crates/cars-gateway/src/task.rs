//! Concurrent tasks and their outcomes.
//!
//! A [`Job`] is one unit of asynchronous work with a label. The aggregator
//! turns each job into a spawned task that reports exactly one [`Outcome`]
//! on a shared channel, tagged with the job's position in the request.

use std::future::Future;
use std::sync::Arc;

use cars_core::{FetchError, FetchResult, Resource, ResourceClient, ResourceDescriptor};
use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Boxed future driving one job
pub type TaskFuture<T> = BoxFuture<'static, FetchResult<T>>;

/// One labelled unit of work submitted to an aggregation
pub struct Job<T> {
    label: String,
    future: TaskFuture<T>,
}

impl<T> Job<T> {
    /// Wrap a future. The label identifies the job in errors and logs.
    pub fn new<F>(label: impl Into<String>, future: F) -> Self
    where
        F: Future<Output = FetchResult<T>> + Send + 'static,
    {
        Self {
            label: label.into(),
            future: future.boxed(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<T> std::fmt::Debug for Job<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job").field("label", &self.label).finish()
    }
}

/// Result of one task, tagged with its submission index
#[derive(Debug)]
pub(crate) struct Outcome<T> {
    pub index: usize,
    pub label: String,
    pub result: FetchResult<T>,
}

/// Launch `job` as an independent task.
///
/// The task reports exactly one outcome on `outcomes`. When `cancel` fires
/// first, the in-flight future is dropped and the outcome is
/// [`FetchError::Cancelled`]. With a `limit`, the job waits for a permit
/// before it starts.
pub(crate) fn spawn_task<T: Send + 'static>(
    index: usize,
    job: Job<T>,
    outcomes: mpsc::Sender<Outcome<T>>,
    cancel: CancellationToken,
    limit: Option<Arc<Semaphore>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let Job { label, future } = job;

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(task = %label, "Task cancelled");
                Err(FetchError::Cancelled)
            }
            result = run_limited(future, limit) => result,
        };

        // The collector is gone once the aggregation has finished
        let _ = outcomes
            .send(Outcome {
                index,
                label,
                result,
            })
            .await;
    })
}

async fn run_limited<T>(future: TaskFuture<T>, limit: Option<Arc<Semaphore>>) -> FetchResult<T> {
    let _permit = match limit {
        Some(semaphore) => Some(
            semaphore
                .acquire_owned()
                .await
                .map_err(|_| FetchError::Cancelled)?,
        ),
        None => None,
    };
    future.await
}

/// Fetch `descriptor` and unwrap the resource variant selected by `extract`.
///
/// A client returning a different variant than the descriptor names is
/// reported as a decode failure.
pub async fn fetch_as<T>(
    client: &dyn ResourceClient,
    descriptor: &ResourceDescriptor,
    extract: fn(Resource) -> Option<T>,
) -> FetchResult<T> {
    let resource = client.fetch(descriptor).await?;
    let kind = resource.kind();
    extract(resource).ok_or_else(|| {
        FetchError::decode(
            descriptor.path(),
            format!("expected {:?}, got {:?}", descriptor.kind(), kind),
        )
    })
}
