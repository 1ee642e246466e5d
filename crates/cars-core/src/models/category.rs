//! Category records

use serde::{Deserialize, Serialize};

/// Identifier of a category (`/api/categories/{id}`)
pub type CategoryId = u32;

/// A vehicle category (sedan, SUV, ...) as served by `/api/categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
