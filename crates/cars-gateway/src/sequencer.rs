//! Dependent fetch: a car, then the manufacturer it references.
//!
//! ```text
//! FetchingCar ──ok──▶ FetchingManufacturer ──ok──▶ Done
//!      │                       │
//!      └──────err──────────────┴─────────────────▶ Errored
//! ```
//!
//! The manufacturer ID is only known once the car has been decoded, so the
//! second request is never issued when the first one fails.

use std::sync::Arc;

use cars_core::{
    Car, CarDetail, CarId, FetchError, FetchResult, Resource, ResourceClient, ResourceDescriptor,
};
use tracing::debug;

use crate::task::fetch_as;

/// Progress of one detail lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    FetchingCar { id: CarId },
    FetchingManufacturer { car: Car },
    Done(CarDetail),
    Errored(FetchError),
}

impl DetailState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DetailState::Done(_) | DetailState::Errored(_))
    }
}

/// Runs the car-then-manufacturer sequence for one car ID
pub struct DetailSequencer {
    client: Arc<dyn ResourceClient>,
    state: DetailState,
}

impl DetailSequencer {
    pub fn new(client: Arc<dyn ResourceClient>, id: CarId) -> Self {
        Self {
            client,
            state: DetailState::FetchingCar { id },
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Perform the fetch for the current state and move to the next one.
    /// Terminal states are left unchanged.
    ///
    /// If the returned future is dropped mid-fetch the sequencer is left
    /// in `Errored(Cancelled)`.
    pub async fn step(&mut self) {
        let current = std::mem::replace(
            &mut self.state,
            DetailState::Errored(FetchError::Cancelled),
        );
        self.state = transition(self.client.as_ref(), current).await;
    }

    /// Drive the sequence to completion
    pub async fn run(self) -> FetchResult<CarDetail> {
        let mut state = self.state;
        loop {
            state = match state {
                DetailState::Done(detail) => return Ok(detail),
                DetailState::Errored(err) => return Err(err),
                pending => transition(self.client.as_ref(), pending).await,
            };
        }
    }
}

async fn transition(client: &dyn ResourceClient, state: DetailState) -> DetailState {
    match state {
        DetailState::FetchingCar { id } => {
            match fetch_as(client, &ResourceDescriptor::car(id), Resource::into_car).await {
                Ok(car) => {
                    debug!(
                        car_id = id,
                        manufacturer_id = car.manufacturer_id,
                        "Car fetched, fetching manufacturer"
                    );
                    DetailState::FetchingManufacturer { car }
                }
                Err(err) => DetailState::Errored(err),
            }
        }
        DetailState::FetchingManufacturer { car } => {
            let descriptor = ResourceDescriptor::manufacturer(car.manufacturer_id);
            match fetch_as(client, &descriptor, Resource::into_manufacturer).await {
                Ok(manufacturer) => DetailState::Done(CarDetail { car, manufacturer }),
                Err(err) => DetailState::Errored(err),
            }
        }
        terminal => terminal,
    }
}
