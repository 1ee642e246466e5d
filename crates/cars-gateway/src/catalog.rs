//! Page-level views over the catalog API.
//!
//! Each view is one aggregation: either a fixed set of descriptors fetched
//! side by side, or one detail sequence per requested car.

use std::sync::Arc;

use cars_core::{
    filter_cars, Car, CarDetail, CarId, FilterCriteria, FilterOptions, Listing, Resource,
    ResourceClient, ResourceDescriptor,
};
use tracing::{info, instrument};

use crate::aggregator::{Aggregation, Aggregator};
use crate::config::GatewayConfig;
use crate::error::{AggregateError, AggregateResult};

/// Catalog views built on top of an [`Aggregator`]
#[derive(Clone)]
pub struct CatalogGateway {
    aggregator: Aggregator,
}

impl CatalogGateway {
    pub fn new(client: Arc<dyn ResourceClient>, config: GatewayConfig) -> Self {
        Self {
            aggregator: Aggregator::with_config(client, config),
        }
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Car listing: all cars and all manufacturers fetched concurrently,
    /// cars filtered by `criteria` afterwards.
    #[instrument(skip(self))]
    pub async fn listing(&self, criteria: &FilterCriteria) -> AggregateResult<Listing> {
        let cars = ResourceDescriptor::cars();
        let manufacturers = ResourceDescriptor::manufacturers();
        let mut fetched = self
            .aggregator
            .aggregate(&[cars.clone(), manufacturers.clone()])
            .await?;

        let all_cars = take(&mut fetched, &cars, Resource::into_cars)?;
        let manufacturers = take(&mut fetched, &manufacturers, Resource::into_manufacturers)?;
        let cars = filter_cars(&all_cars, criteria);
        info!(total = all_cars.len(), shown = cars.len(), "Listing ready");

        Ok(Listing {
            cars,
            manufacturers,
        })
    }

    /// One car with its manufacturer
    #[instrument(skip(self))]
    pub async fn detail(&self, id: CarId) -> AggregateResult<CarDetail> {
        let mut details = self
            .aggregator
            .run(vec![self.aggregator.detail_job(id)])
            .await?;
        details.pop().ok_or(AggregateError::Incomplete {
            expected: 1,
            received: 0,
        })
    }

    /// Several cars, each with its manufacturer, in the order of `ids`.
    ///
    /// The detail sequences run concurrently; any failure fails the whole
    /// comparison.
    #[instrument(skip(self))]
    pub async fn compare(&self, ids: &[CarId]) -> AggregateResult<Vec<CarDetail>> {
        let jobs = ids.iter().map(|&id| self.aggregator.detail_job(id)).collect();
        self.aggregator.run(jobs).await
    }

    /// Several cars by ID, in the order of `ids`
    pub async fn cars(&self, ids: &[CarId]) -> AggregateResult<Vec<Car>> {
        self.aggregator.fetch_by_ids(ids).await
    }

    /// Manufacturers and categories for the advanced filter form
    #[instrument(skip(self))]
    pub async fn filter_options(&self) -> AggregateResult<FilterOptions> {
        let manufacturers = ResourceDescriptor::manufacturers();
        let categories = ResourceDescriptor::categories();
        let mut fetched = self
            .aggregator
            .aggregate(&[manufacturers.clone(), categories.clone()])
            .await?;

        Ok(FilterOptions {
            manufacturers: take(&mut fetched, &manufacturers, Resource::into_manufacturers)?,
            categories: take(&mut fetched, &categories, Resource::into_categories)?,
        })
    }
}

/// Pull one typed value out of an aggregation.
///
/// The aggregator has already checked each variant, so a miss here means
/// the descriptor was not part of the request.
fn take<T>(
    fetched: &mut Aggregation,
    descriptor: &ResourceDescriptor,
    extract: fn(Resource) -> Option<T>,
) -> AggregateResult<T> {
    fetched
        .take(descriptor)
        .and_then(extract)
        .ok_or(AggregateError::Incomplete {
            expected: 1,
            received: 0,
        })
}
