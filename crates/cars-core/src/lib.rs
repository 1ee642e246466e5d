//! cars-core - Core types for the car catalog aggregator
//!
//! This crate provides the value records decoded from the downstream catalog
//! API, the descriptors that name a remote resource, the fetch error taxonomy
//! and the post-fetch filter. It performs no I/O.

pub mod client;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod models;
pub mod secs;

pub use client::ResourceClient;
pub use descriptor::{Resource, ResourceDescriptor, ResourceKind};
pub use error::{FailureKind, FetchError, FetchResult, USER_FACING_FAILURE};
pub use filter::{filter_cars, FilterCriteria};
pub use models::*;
