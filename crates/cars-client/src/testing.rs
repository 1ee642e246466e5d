//! Test utilities for cars-client
//!
//! Provides an in-memory catalog API (the same routes the real downstream
//! service exposes) and a [`TestServer`] that serves any axum router on an
//! ephemeral port with a client already pointed at it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cars_core::{Car, Category, Manufacturer, Specifications};
use tokio::net::TcpListener;

use crate::{ClientConfig, HttpResourceClient, Result};

// =============================================================================
// Fixture catalog
// =============================================================================

/// In-memory catalog data served by [`fixture_router`]
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub cars: Vec<Car>,
    pub manufacturers: Vec<Manufacturer>,
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Three cars, two manufacturers, two categories.
    ///
    /// Only car #2 ("Camry") both contains an `a` in its name and belongs to
    /// manufacturer 1.
    pub fn sample() -> Self {
        Self {
            cars: vec![
                sample_car(1, "A4", 2, 1, 2021, "2.0L I4 TFSI", 201, "AWD"),
                sample_car(2, "Camry", 1, 1, 2022, "2.5L I4", 203, "FWD"),
                sample_car(3, "Prius", 1, 2, 2023, "1.8L I4 Hybrid", 121, "FWD"),
            ],
            manufacturers: vec![
                Manufacturer {
                    id: 1,
                    name: "Toyota".to_string(),
                    country: "Japan".to_string(),
                    founding_year: 1937,
                },
                Manufacturer {
                    id: 2,
                    name: "Audi".to_string(),
                    country: "Germany".to_string(),
                    founding_year: 1909,
                },
            ],
            categories: vec![
                Category {
                    id: 1,
                    name: "Sedan".to_string(),
                },
                Category {
                    id: 2,
                    name: "Hatchback".to_string(),
                },
            ],
        }
    }

    pub fn car(&self, id: u32) -> Option<&Car> {
        self.cars.iter().find(|c| c.id == id)
    }
}

#[allow(clippy::too_many_arguments)]
fn sample_car(
    id: u32,
    name: &str,
    manufacturer_id: u32,
    category_id: u32,
    year: u16,
    engine: &str,
    horsepower: u32,
    drivetrain: &str,
) -> Car {
    Car {
        id,
        name: name.to_string(),
        manufacturer_id,
        category_id,
        year,
        specifications: Specifications {
            engine: engine.to_string(),
            horsepower,
            transmission: "Automatic".to_string(),
            drivetrain: drivetrain.to_string(),
        },
        image: format!("{}.jpg", name.to_lowercase()),
    }
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": format!("{} not found", what) })),
    )
        .into_response()
}

async fn api_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "models": "/api/models",
        "categories": "/api/categories",
        "manufacturers": "/api/manufacturers",
    }))
}

async fn list_models(State(catalog): State<Arc<Catalog>>) -> Json<Vec<Car>> {
    Json(catalog.cars.clone())
}

async fn get_model(State(catalog): State<Arc<Catalog>>, Path(id): Path<u32>) -> Response {
    match catalog.car(id) {
        Some(car) => Json(car.clone()).into_response(),
        None => not_found("Car model"),
    }
}

async fn list_manufacturers(State(catalog): State<Arc<Catalog>>) -> Json<Vec<Manufacturer>> {
    Json(catalog.manufacturers.clone())
}

async fn get_manufacturer(State(catalog): State<Arc<Catalog>>, Path(id): Path<u32>) -> Response {
    match catalog.manufacturers.iter().find(|m| m.id == id) {
        Some(m) => Json(m.clone()).into_response(),
        None => not_found("Manufacturer"),
    }
}

async fn list_categories(State(catalog): State<Arc<Catalog>>) -> Json<Vec<Category>> {
    Json(catalog.categories.clone())
}

async fn get_category(State(catalog): State<Arc<Catalog>>, Path(id): Path<u32>) -> Response {
    match catalog.categories.iter().find(|c| c.id == id) {
        Some(c) => Json(c.clone()).into_response(),
        None => not_found("Category"),
    }
}

/// Router serving the catalog API from `catalog`
pub fn fixture_router(catalog: Catalog) -> Router {
    Router::new()
        .route("/api", get(api_index))
        .route("/api/models", get(list_models))
        .route("/api/models/{id}", get(get_model))
        .route("/api/manufacturers", get(list_manufacturers))
        .route("/api/manufacturers/{id}", get(get_manufacturer))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{id}", get(get_category))
        .with_state(Arc::new(catalog))
}

// =============================================================================
// Test server
// =============================================================================

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: HttpResourceClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve an axum router on an ephemeral port
    ///
    /// # Example
    ///
    /// ```ignore
    /// use cars_client::testing::{fixture_router, Catalog, TestServer};
    ///
    /// let server = TestServer::start(fixture_router(Catalog::sample())).await?;
    /// let cars = server.client.list_cars().await?;
    /// ```
    pub async fn start(router: Router) -> Result<Self> {
        Self::start_with_timeout(router, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Serve the sample catalog
    pub async fn sample() -> Result<Self> {
        Self::start(fixture_router(Catalog::sample())).await
    }

    /// Serve a router with custom client timeouts
    pub async fn start_with_timeout(
        router: Router,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        let config = ClientConfig::new(format!("http://{}", addr))
            .with_timeout(timeout)
            .with_connect_timeout(connect_timeout);
        let client = HttpResourceClient::with_config(&config)?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client configuration pointing at this server
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url())
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// An address on which nothing is listening
pub async fn unused_addr() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_shape() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.cars.len(), 3);
        assert_eq!(catalog.manufacturers.len(), 2);
        assert_eq!(catalog.car(2).map(|c| c.name.as_str()), Some("Camry"));
    }
}
