//! Merged records handed to the presentation layer

use serde::Serialize;

use super::{Car, Category, Manufacturer};

/// A car together with its manufacturer (detail and comparison pages)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarDetail {
    pub car: Car,
    pub manufacturer: Manufacturer,
}

/// A car row in the listing page, joined with its manufacturer's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarWithManufacturer {
    pub car: Car,
    /// `None` when the manufacturer list does not contain the car's
    /// `manufacturer_id`
    pub manufacturer_name: Option<String>,
}

/// Listing page data: the filtered cars plus the full manufacturer list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub cars: Vec<Car>,
    pub manufacturers: Vec<Manufacturer>,
}

impl Listing {
    /// Look up a manufacturer name in the fetched manufacturer list
    pub fn manufacturer_name(&self, car: &Car) -> Option<&str> {
        self.manufacturers
            .iter()
            .find(|m| m.id == car.manufacturer_id)
            .map(|m| m.name.as_str())
    }

    /// Join every listed car with its manufacturer name, keeping car order
    pub fn entries(&self) -> Vec<CarWithManufacturer> {
        self.cars
            .iter()
            .map(|car| CarWithManufacturer {
                car: car.clone(),
                manufacturer_name: self.manufacturer_name(car).map(str::to_string),
            })
            .collect()
    }
}

/// Advanced filters page data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub manufacturers: Vec<Manufacturer>,
    pub categories: Vec<Category>,
}
