//! Post-fetch filtering of car listings.
//!
//! Filtering runs on an already fetched, in-memory list. Every criterion is
//! optional; present criteria are AND-combined and absent ones match
//! everything. The output is always an order-preserving subsequence of the
//! input: no sorting, no deduplication.

use serde::{Deserialize, Serialize};

use crate::models::{Car, CategoryId, ManufacturerId};

/// Query parameters for the car listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring of the car name (ASCII case folding)
    pub name: Option<String>,
    /// Exact manufacturer ID
    pub manufacturer_id: Option<ManufacturerId>,
    /// Exact category ID
    pub category_id: Option<CategoryId>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_manufacturer(mut self, id: ManufacturerId) -> Self {
        self.manufacturer_id = Some(id);
        self
    }

    pub fn with_category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }

    /// True when no criterion is set, i.e. every car matches
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.manufacturer_id.is_none() && self.category_id.is_none()
    }

    /// Check a single car against all present criteria
    pub fn matches(&self, car: &Car) -> bool {
        let name_ok = match &self.name {
            Some(needle) => car
                .name
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
            None => true,
        };
        let manufacturer_ok = self
            .manufacturer_id
            .map_or(true, |id| car.manufacturer_id == id);
        let category_ok = self.category_id.map_or(true, |id| car.category_id == id);

        name_ok && manufacturer_ok && category_ok
    }
}

/// Return the cars matching `criteria`, in their original order
pub fn filter_cars(items: &[Car], criteria: &FilterCriteria) -> Vec<Car> {
    if criteria.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|car| criteria.matches(car))
        .cloned()
        .collect()
}
