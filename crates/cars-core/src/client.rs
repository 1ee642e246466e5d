//! ResourceClient trait - the fetch capability consumed by the aggregator

use std::sync::Arc;

use async_trait::async_trait;

use crate::descriptor::{Resource, ResourceDescriptor};
use crate::error::FetchResult;

/// Fetches one remote resource and decodes it into the shape named by the
/// descriptor.
///
/// Implementations must return exactly one outcome per call: a [`Resource`]
/// whose variant matches `descriptor.kind()`, or a
/// [`FetchError`](crate::FetchError). A body that fails to decode is an
/// error, never a partially populated resource.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn fetch(&self, descriptor: &ResourceDescriptor) -> FetchResult<Resource>;
}

#[async_trait]
impl<C: ResourceClient + ?Sized> ResourceClient for Arc<C> {
    async fn fetch(&self, descriptor: &ResourceDescriptor) -> FetchResult<Resource> {
        (**self).fetch(descriptor).await
    }
}
