//! Catalog API Client Library
//!
//! Provides the HTTP resource client used by the aggregation core: one `GET`
//! per fetch, status 200 required, JSON body decoded into a typed value.
//!
//! # Example
//!
//! ```rust,no_run
//! use cars_client::HttpResourceClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpResourceClient::new("http://localhost:3000")?;
//!
//!     let cars = client.list_cars().await?;
//!     let maker = client.get_manufacturer(cars[0].manufacturer_id).await?;
//!     println!("{} by {}", cars[0].name, maker.name);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failures
//!
//! Fetch failures are reported as [`cars_core::FetchError`]: transport
//! errors (including timeouts), non-200 statuses and decode errors are kept
//! apart so callers can log them precisely.
//!
//! # Testing
//!
//! The `testing` module serves an in-memory catalog over real HTTP:
//!
//! ```rust,ignore
//! use cars_client::testing::TestServer;
//!
//! let server = TestServer::sample().await?;
//! let cars = server.client.list_cars().await?;
//! ```

mod client;
mod config;
mod error;
pub mod testing;

pub use client::HttpResourceClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};

// Re-export core types for convenience
pub use cars_core::{FetchError, FetchResult, Resource, ResourceClient, ResourceDescriptor};
