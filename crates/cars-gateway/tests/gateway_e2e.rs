//! End-to-end tests: gateway views over the catalog API served via HTTP

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};
use cars_client::testing::{Catalog, TestServer};
use cars_client::HttpResourceClient;
use cars_core::{FailureKind, USER_FACING_FAILURE};
use cars_gateway::{AggregateError, CatalogGateway, FilterCriteria, GatewayConfig};
use pretty_assertions::assert_eq;

async fn sample_gateway() -> (TestServer, CatalogGateway) {
    let server = TestServer::sample().await.expect("Failed to start test server");
    let client = Arc::new(server.client.clone());
    let gateway = CatalogGateway::new(client, GatewayConfig::default());
    (server, gateway)
}

#[tokio::test]
async fn test_listing_with_name_and_manufacturer() {
    let (_server, gateway) = sample_gateway().await;

    let listing = gateway
        .listing(&FilterCriteria::new().with_name("a").with_manufacturer(1))
        .await
        .unwrap();

    let names: Vec<&str> = listing.cars.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Camry"]);
    assert_eq!(listing.manufacturers, Catalog::sample().manufacturers);
    assert_eq!(listing.entries()[0].manufacturer_name.as_deref(), Some("Toyota"));
}

#[tokio::test]
async fn test_unfiltered_listing_keeps_api_order() {
    let (_server, gateway) = sample_gateway().await;

    let listing = gateway.listing(&FilterCriteria::new()).await.unwrap();
    assert_eq!(listing.cars, Catalog::sample().cars);
}

#[tokio::test]
async fn test_detail() {
    let (_server, gateway) = sample_gateway().await;

    let detail = gateway.detail(1).await.unwrap();
    assert_eq!(detail.car.name, "A4");
    assert_eq!(detail.manufacturer.name, "Audi");
}

#[tokio::test]
async fn test_missing_car_detail() {
    let (_server, gateway) = sample_gateway().await;

    let err = gateway.detail(99).await.unwrap_err();
    let fetch = err.fetch_error().expect("task failure");
    assert_eq!(fetch.kind(), FailureKind::Status);
    assert_eq!(fetch.http_status(), Some(404));
    assert_eq!(err.user_message(), USER_FACING_FAILURE);
}

#[tokio::test]
async fn test_compare() {
    let (_server, gateway) = sample_gateway().await;

    let details = gateway.compare(&[3, 1]).await.unwrap();
    let pairs: Vec<(&str, &str)> = details
        .iter()
        .map(|d| (d.car.name.as_str(), d.manufacturer.name.as_str()))
        .collect();
    assert_eq!(pairs, vec![("Prius", "Toyota"), ("A4", "Audi")]);
}

#[tokio::test]
async fn test_batch_fetch_names_failing_id() {
    let (_server, gateway) = sample_gateway().await;

    let err = gateway.cars(&[1, 99, 3]).await.unwrap_err();
    assert_eq!(err.task(), Some("models/99"));
}

#[tokio::test]
async fn test_filter_options() {
    let (_server, gateway) = sample_gateway().await;

    let options = gateway.filter_options().await.unwrap();
    assert_eq!(options.manufacturers.len(), 2);
    assert_eq!(options.categories.len(), 2);
}

#[tokio::test]
async fn test_request_deadline_over_http() {
    let router = Router::new()
        .route("/api/manufacturers", get(|| async { Json(Vec::<u32>::new()) }))
        .route(
            "/api/categories",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(Vec::<u32>::new())
            }),
        );
    let server = TestServer::start(router).await.unwrap();
    let client = HttpResourceClient::with_config(&server.config()).unwrap();
    let gateway = CatalogGateway::new(
        Arc::new(client),
        GatewayConfig::default().with_request_timeout(Duration::from_millis(200)),
    );

    let err = gateway.filter_options().await.unwrap_err();
    assert_eq!(err, AggregateError::DeadlineExceeded(Duration::from_millis(200)));
}

#[tokio::test]
async fn test_bounded_fan_out_over_http() {
    let (server, _) = sample_gateway().await;
    let gateway = CatalogGateway::new(
        Arc::new(server.client.clone()),
        GatewayConfig::default().with_max_concurrency(1),
    );

    let cars = gateway.cars(&[3, 2, 1]).await.unwrap();
    let ids: Vec<u32> = cars.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}
