//! cars-gateway - Concurrent aggregation of car catalog resources
//!
//! This crate fans a page request out into independent fetches against a
//! [`ResourceClient`], gathers the outcomes and either merges them or fails
//! with the first error. Tasks still running when an aggregation fails are
//! cancelled.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        CatalogGateway                            │
//! │        listing · detail · compare · filter_options               │
//! │                              │                                   │
//! │  ┌───────────────────────────▼──────────────────────────────┐   │
//! │  │                       Aggregator                          │   │
//! │  │  - One spawned task per job                               │   │
//! │  │  - Outcomes collected over an mpsc channel                │   │
//! │  │  - First failure cancels the rest                         │   │
//! │  └───────────────────────────┬──────────────────────────────┘   │
//! │              ┌───────────────┼───────────────┐                   │
//! │              ▼               ▼               ▼                   │
//! │      GET /api/models  GET /api/manu…   DetailSequencer           │
//! │                                        (car → manufacturer)      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cars_client::HttpResourceClient;
//! use cars_gateway::{CatalogGateway, GatewayConfig};
//!
//! let client = Arc::new(HttpResourceClient::new("http://localhost:3000")?);
//! let gateway = CatalogGateway::new(client, GatewayConfig::default());
//!
//! let listing = gateway
//!     .listing(&FilterCriteria::new().with_name("a").with_manufacturer(1))
//!     .await?;
//! ```

mod aggregator;
mod catalog;
mod config;
mod error;
#[cfg(test)]
mod mock;
mod sequencer;
mod task;

pub use aggregator::{Aggregation, Aggregator};
pub use catalog::CatalogGateway;
pub use config::GatewayConfig;
pub use error::{AggregateError, AggregateResult};
pub use sequencer::{DetailSequencer, DetailState};
pub use task::{fetch_as, Job, TaskFuture};

// Re-export core types for convenience
pub use cars_core::{FetchError, FetchResult, FilterCriteria, ResourceClient, ResourceDescriptor};
