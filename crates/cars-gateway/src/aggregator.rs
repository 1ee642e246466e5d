//! Fan-out/fan-in aggregation of resource fetches.
//!
//! An aggregation launches one task per job, collects exactly one outcome
//! per task and resolves once:
//!
//! - every task succeeded: the values come back in submission order,
//!   regardless of the order in which they arrived;
//! - the first failure arrived: the aggregation resolves with that failure,
//!   all still-running tasks are cancelled and their outcomes are discarded.
//!
//! Dropping the aggregation future cancels every task it launched.

use std::sync::Arc;

use cars_core::{Car, CarDetail, CarId, Resource, ResourceClient, ResourceDescriptor};
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::config::GatewayConfig;
use crate::error::{AggregateError, AggregateResult};
use crate::sequencer::DetailSequencer;
use crate::task::{fetch_as, spawn_task, Job};

/// Resources fetched by [`Aggregator::aggregate`], keyed by descriptor and
/// kept in request order
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    entries: Vec<(ResourceDescriptor, Resource)>,
}

impl Aggregation {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resource fetched for `descriptor`
    pub fn get(&self, descriptor: &ResourceDescriptor) -> Option<&Resource> {
        self.entries
            .iter()
            .find(|(d, _)| d == descriptor)
            .map(|(_, r)| r)
    }

    /// Remove and return the resource fetched for `descriptor`
    pub fn take(&mut self, descriptor: &ResourceDescriptor) -> Option<Resource> {
        let pos = self.entries.iter().position(|(d, _)| d == descriptor)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceDescriptor, &Resource)> {
        self.entries.iter().map(|(d, r)| (d, r))
    }

    /// Resources in request order
    pub fn into_resources(self) -> Vec<Resource> {
        self.entries.into_iter().map(|(_, r)| r).collect()
    }
}

/// Runs aggregations against one resource client
#[derive(Clone)]
pub struct Aggregator {
    client: Arc<dyn ResourceClient>,
    config: GatewayConfig,
}

impl Aggregator {
    /// Create an aggregator with unbounded fan-out and no overall deadline
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self::with_config(client, GatewayConfig::default())
    }

    pub fn with_config(client: Arc<dyn ResourceClient>, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &Arc<dyn ResourceClient> {
        &self.client
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    // =========================================================================
    // Jobs
    // =========================================================================

    /// Job fetching one descriptor
    pub fn fetch_job(&self, descriptor: ResourceDescriptor) -> Job<Resource> {
        let client = Arc::clone(&self.client);
        Job::new(descriptor.label(), async move {
            client.fetch(&descriptor).await
        })
    }

    /// Job fetching one car by ID
    pub fn car_job(&self, id: CarId) -> Job<Car> {
        let client = Arc::clone(&self.client);
        let descriptor = ResourceDescriptor::car(id);
        Job::new(descriptor.label(), async move {
            fetch_as(client.as_ref(), &descriptor, Resource::into_car).await
        })
    }

    /// Job fetching a car and then its manufacturer
    pub fn detail_job(&self, id: CarId) -> Job<CarDetail> {
        let sequencer = DetailSequencer::new(Arc::clone(&self.client), id);
        Job::new(format!("details/{}", id), sequencer.run())
    }

    // =========================================================================
    // Aggregations
    // =========================================================================

    /// Fetch every descriptor concurrently.
    ///
    /// Succeeds only if every fetch succeeds. Duplicate descriptors are
    /// fetched once per occurrence.
    #[instrument(skip(self, descriptors), fields(tasks = descriptors.len()))]
    pub async fn aggregate(&self, descriptors: &[ResourceDescriptor]) -> AggregateResult<Aggregation> {
        let jobs = descriptors
            .iter()
            .map(|d| self.fetch_job(d.clone()))
            .collect();
        let resources = self.run(jobs).await?;

        Ok(Aggregation {
            entries: descriptors.iter().cloned().zip(resources).collect(),
        })
    }

    /// Fetch several cars by ID concurrently.
    ///
    /// The result follows the order of `ids`, duplicates included. The first
    /// failing ID fails the whole batch.
    #[instrument(skip(self))]
    pub async fn fetch_by_ids(&self, ids: &[CarId]) -> AggregateResult<Vec<Car>> {
        let jobs = ids.iter().map(|&id| self.car_job(id)).collect();
        self.run(jobs).await
    }

    /// Run arbitrary jobs as one aggregation.
    ///
    /// Values come back in the order the jobs were given. The configured
    /// concurrency limit and request deadline apply.
    pub async fn run<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> AggregateResult<Vec<T>> {
        match self.config.request_timeout {
            Some(deadline) => tokio::time::timeout(deadline, self.collect(jobs))
                .await
                .map_err(|_| {
                    warn!(?deadline, "Aggregation deadline exceeded, cancelling tasks");
                    AggregateError::DeadlineExceeded(deadline)
                })?,
            None => self.collect(jobs).await,
        }
    }

    async fn collect<T: Send + 'static>(&self, jobs: Vec<Job<T>>) -> AggregateResult<Vec<T>> {
        let expected = jobs.len();
        if expected == 0 {
            return Ok(Vec::new());
        }

        let cancel = CancellationToken::new();
        // Cancels every task if this future is dropped before resolving
        let _guard = cancel.clone().drop_guard();
        let limit = self.config.permits().map(|n| Arc::new(Semaphore::new(n)));

        // Each task sends once, so a channel this size never blocks a sender
        let (tx, mut rx) = mpsc::channel(expected);
        for (index, job) in jobs.into_iter().enumerate() {
            debug!(task = %job.label(), index, "Launching task");
            spawn_task(index, job, tx.clone(), cancel.child_token(), limit.clone());
        }
        drop(tx);

        let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(expected).collect();
        let mut received = 0;

        while received < expected {
            let Some(outcome) = rx.recv().await else {
                warn!(expected, received, "Tasks ended without reporting");
                return Err(AggregateError::Incomplete { expected, received });
            };
            received += 1;

            match outcome.result {
                Ok(value) => {
                    debug!(task = %outcome.label, received, expected, "Task succeeded");
                    slots[outcome.index] = Some(value);
                }
                Err(source) => {
                    warn!(
                        task = %outcome.label,
                        kind = %source.kind(),
                        status = ?source.http_status(),
                        url = ?source.url(),
                        error = %source,
                        "Task failed, cancelling remaining tasks"
                    );
                    cancel.cancel();
                    return Err(AggregateError::Task {
                        task: outcome.label,
                        source,
                    });
                }
            }
        }

        slots
            .into_iter()
            .collect::<Option<Vec<T>>>()
            .ok_or(AggregateError::Incomplete { expected, received })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{car, manufacturer, not_found, MockClient};
    use cars_core::FetchError;
    use pretty_assertions::assert_eq;
    use std::time::{Duration, Instant};

    fn aggregator(mock: MockClient) -> (Arc<MockClient>, Aggregator) {
        let mock = Arc::new(mock);
        let aggregator = Aggregator::new(mock.clone());
        (mock, aggregator)
    }

    #[tokio::test]
    async fn test_results_attributed_to_descriptors_despite_arrival_order() {
        let cars = vec![car(1, "Camry", 1, 1)];
        let makers = vec![manufacturer(1, "Toyota")];
        // Cars arrive last although requested first
        let (_, agg) = aggregator(
            MockClient::new()
                .ok(ResourceDescriptor::cars(), 60, Resource::Cars(cars.clone()))
                .ok(
                    ResourceDescriptor::manufacturers(),
                    5,
                    Resource::Manufacturers(makers.clone()),
                ),
        );

        let result = agg
            .aggregate(&[ResourceDescriptor::cars(), ResourceDescriptor::manufacturers()])
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(
            result.get(&ResourceDescriptor::cars()),
            Some(&Resource::Cars(cars.clone()))
        );
        assert_eq!(
            result.into_resources(),
            vec![Resource::Cars(cars), Resource::Manufacturers(makers)]
        );
    }

    #[tokio::test]
    async fn test_fetch_by_ids_keeps_input_order() {
        let (_, agg) = aggregator(
            MockClient::new()
                .ok(ResourceDescriptor::car(3), 5, Resource::Car(car(3, "Prius", 1, 2)))
                .ok(ResourceDescriptor::car(1), 40, Resource::Car(car(1, "A4", 2, 1)))
                .ok(ResourceDescriptor::car(2), 20, Resource::Car(car(2, "Camry", 1, 1))),
        );

        let cars = agg.fetch_by_ids(&[3, 1, 2, 3]).await.unwrap();
        let ids: Vec<u32> = cars.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_by_ids_fails_on_missing_id() {
        let (_, agg) = aggregator(
            MockClient::new()
                .ok(ResourceDescriptor::car(1), 5, Resource::Car(car(1, "A4", 2, 1)))
                .fail(
                    ResourceDescriptor::car(2),
                    10,
                    not_found(&ResourceDescriptor::car(2)),
                )
                .ok(ResourceDescriptor::car(3), 5, Resource::Car(car(3, "Prius", 1, 2))),
        );

        let err = agg.fetch_by_ids(&[1, 2, 3]).await.unwrap_err();
        assert_eq!(err.task(), Some("models/2"));
        assert_eq!(err.fetch_error().and_then(FetchError::http_status), Some(404));
    }

    #[tokio::test]
    async fn test_first_failure_resolves_without_waiting() {
        let (_, agg) = aggregator(
            MockClient::new()
                .ok(ResourceDescriptor::cars(), 2_000, Resource::Cars(vec![]))
                .fail(
                    ResourceDescriptor::manufacturers(),
                    10,
                    FetchError::transport("http://catalog.test/api/manufacturers", "reset"),
                ),
        );

        let started = Instant::now();
        let err = agg
            .aggregate(&[ResourceDescriptor::cars(), ResourceDescriptor::manufacturers()])
            .await
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_millis(1_000));
        assert_eq!(err.task(), Some("manufacturers"));
    }

    #[tokio::test]
    async fn test_failure_cancels_in_flight_tasks() {
        let (mock, agg) = aggregator(
            MockClient::new()
                .ok(ResourceDescriptor::cars(), 2_000, Resource::Cars(vec![]))
                .ok(ResourceDescriptor::categories(), 2_000, Resource::Categories(vec![]))
                .fail(
                    ResourceDescriptor::manufacturers(),
                    10,
                    not_found(&ResourceDescriptor::manufacturers()),
                ),
        );

        agg.aggregate(&[
            ResourceDescriptor::cars(),
            ResourceDescriptor::manufacturers(),
            ResourceDescriptor::categories(),
        ])
        .await
        .unwrap_err();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(mock.abandoned(), 2);
        assert_eq!(mock.completed(), 1);
    }

    #[tokio::test]
    async fn test_dropping_aggregation_cancels_tasks() {
        let (mock, agg) = aggregator(
            MockClient::new().ok(ResourceDescriptor::cars(), 2_000, Resource::Cars(vec![])),
        );

        let descriptors = [ResourceDescriptor::cars()];
        let pending = agg.aggregate(&descriptors);
        let _ = tokio::time::timeout(Duration::from_millis(50), pending).await;

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(mock.abandoned(), 1);
    }

    #[test]
    fn test_empty_aggregation_succeeds_without_fetching() {
        let (mock, agg) = aggregator(MockClient::new());

        let result = tokio_test::block_on(agg.aggregate(&[])).unwrap();
        assert!(result.is_empty());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unbounded_fan_out_runs_everything_at_once() {
        let mut mock = MockClient::new();
        for id in 1..=6 {
            mock = mock.ok(ResourceDescriptor::car(id), 100, Resource::Car(car(id, "x", 1, 1)));
        }
        let (mock, agg) = aggregator(mock);

        agg.fetch_by_ids(&[1, 2, 3, 4, 5, 6]).await.unwrap();
        assert_eq!(mock.max_in_flight(), 6);
    }

    #[tokio::test]
    async fn test_concurrency_limit_bounds_in_flight_fetches() {
        let mut mock = MockClient::new();
        for id in 1..=6 {
            mock = mock.ok(ResourceDescriptor::car(id), 20, Resource::Car(car(id, "x", 1, 1)));
        }
        let mock = Arc::new(mock);
        let agg = Aggregator::with_config(
            mock.clone(),
            GatewayConfig::default().with_max_concurrency(2),
        );

        let cars = agg.fetch_by_ids(&[1, 2, 3, 4, 5, 6]).await.unwrap();
        assert_eq!(cars.len(), 6);
        assert!(mock.max_in_flight() <= 2);
        assert_eq!(mock.completed(), 6);
    }

    #[tokio::test]
    async fn test_deadline_exceeded_cancels_tasks() {
        let mock = Arc::new(
            MockClient::new().ok(ResourceDescriptor::cars(), 2_000, Resource::Cars(vec![])),
        );
        let agg = Aggregator::with_config(
            mock.clone(),
            GatewayConfig::default().with_request_timeout(Duration::from_millis(50)),
        );

        let err = agg.aggregate(&[ResourceDescriptor::cars()]).await.unwrap_err();
        assert_eq!(err, AggregateError::DeadlineExceeded(Duration::from_millis(50)));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(mock.abandoned(), 1);
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported_as_incomplete() {
        let (_, agg) = aggregator(MockClient::new());
        let jobs = vec![
            Job::new("ok", async { Ok(1u32) }),
            Job::new("boom", async {
                if true {
                    panic!("task exploded");
                }
                Ok(2u32)
            }),
        ];

        let err = agg.run(jobs).await.unwrap_err();
        assert_eq!(
            err,
            AggregateError::Incomplete {
                expected: 2,
                received: 1
            }
        );
    }

    #[tokio::test]
    async fn test_wrong_resource_variant_is_decode_failure() {
        let (_, agg) = aggregator(
            MockClient::new().ok(ResourceDescriptor::car(7), 1, Resource::Cars(vec![])),
        );

        let err = agg.fetch_by_ids(&[7]).await.unwrap_err();
        assert_eq!(
            err.fetch_error().map(FetchError::kind),
            Some(cars_core::FailureKind::Decode)
        );
    }
}
