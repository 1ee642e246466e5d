//! Manufacturer records

use serde::{Deserialize, Serialize};

/// Identifier of a manufacturer (`/api/manufacturers/{id}`)
pub type ManufacturerId = u32;

/// A manufacturer as served by `/api/manufacturers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    pub id: ManufacturerId,
    pub name: String,
    pub country: String,
    pub founding_year: u16,
}
