//! Car model records

use serde::{Deserialize, Serialize};

use super::{CategoryId, ManufacturerId};

/// Identifier of a car model (`/api/models/{id}`)
pub type CarId = u32;

/// Technical specifications attached to a car model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specifications {
    pub engine: String,
    pub horsepower: u32,
    pub transmission: String,
    pub drivetrain: String,
}

/// A car model as served by `/api/models`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub manufacturer_id: ManufacturerId,
    pub category_id: CategoryId,
    pub year: u16,
    pub specifications: Specifications,
    /// Image file name, relative to the static image directory
    pub image: String,
}
