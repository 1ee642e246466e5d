//! Scripted resource client for unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cars_core::{
    Car, Category, FetchError, FetchResult, Manufacturer, Resource, ResourceClient,
    ResourceDescriptor, Specifications,
};

struct Scripted {
    delay: Duration,
    result: FetchResult<Resource>,
}

/// Replies to each descriptor with a canned result after a fixed delay and
/// records what happened to every call.
#[derive(Default)]
pub(crate) struct MockClient {
    responses: HashMap<ResourceDescriptor, Scripted>,
    calls: Mutex<Vec<ResourceDescriptor>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: AtomicUsize,
    abandoned: AtomicUsize,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, descriptor: ResourceDescriptor, delay_ms: u64, resource: Resource) -> Self {
        self.responses.insert(
            descriptor,
            Scripted {
                delay: Duration::from_millis(delay_ms),
                result: Ok(resource),
            },
        );
        self
    }

    pub fn fail(mut self, descriptor: ResourceDescriptor, delay_ms: u64, err: FetchError) -> Self {
        self.responses.insert(
            descriptor,
            Scripted {
                delay: Duration::from_millis(delay_ms),
                result: Err(err),
            },
        );
        self
    }

    /// Descriptors in the order fetches started
    pub fn calls(&self) -> Vec<ResourceDescriptor> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Fetches whose future was dropped before finishing
    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }
}

struct InFlight<'a> {
    client: &'a MockClient,
    finished: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.client.in_flight.fetch_sub(1, Ordering::SeqCst);
        let counter = if self.finished {
            &self.client.completed
        } else {
            &self.client.abandoned
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceClient for MockClient {
    async fn fetch(&self, descriptor: &ResourceDescriptor) -> FetchResult<Resource> {
        self.calls.lock().unwrap().push(descriptor.clone());
        let Some(scripted) = self.responses.get(descriptor) else {
            return Err(FetchError::status(descriptor.path(), 404, "not scripted"));
        };

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let mut guard = InFlight {
            client: self,
            finished: false,
        };

        tokio::time::sleep(scripted.delay).await;
        guard.finished = true;
        scripted.result.clone()
    }
}

pub(crate) fn car(id: u32, name: &str, manufacturer_id: u32, category_id: u32) -> Car {
    Car {
        id,
        name: name.to_string(),
        manufacturer_id,
        category_id,
        year: 2022,
        specifications: Specifications {
            engine: "2.5L I4".to_string(),
            horsepower: 200,
            transmission: "Automatic".to_string(),
            drivetrain: "FWD".to_string(),
        },
        image: format!("{}.jpg", id),
    }
}

pub(crate) fn manufacturer(id: u32, name: &str) -> Manufacturer {
    Manufacturer {
        id,
        name: name.to_string(),
        country: "Japan".to_string(),
        founding_year: 1937,
    }
}

pub(crate) fn category(id: u32, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

pub(crate) fn not_found(descriptor: &ResourceDescriptor) -> FetchError {
    FetchError::status(
        format!("http://catalog.test{}", descriptor.path()),
        404,
        "Car model not found",
    )
}
