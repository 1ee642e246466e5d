//! Resource descriptors and decoded resource payloads.
//!
//! A [`ResourceDescriptor`] names one remote resource on the catalog API
//! together with the shape its body must decode into. Descriptors are
//! immutable and always fetched with `GET`.

use std::fmt;

use crate::models::{Car, CarId, Category, CategoryId, Manufacturer, ManufacturerId};

/// Shape a response body must decode into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    CarList,
    Car,
    ManufacturerList,
    Manufacturer,
    CategoryList,
    Category,
}

impl ResourceKind {
    /// Collection segment under `/api`
    fn collection(self) -> &'static str {
        match self {
            ResourceKind::CarList | ResourceKind::Car => "models",
            ResourceKind::ManufacturerList | ResourceKind::Manufacturer => "manufacturers",
            ResourceKind::CategoryList | ResourceKind::Category => "categories",
        }
    }
}

/// Immutable specification of one remote resource to fetch and decode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    kind: ResourceKind,
    id: Option<u32>,
}

impl ResourceDescriptor {
    /// All cars: `GET /api/models`
    pub fn cars() -> Self {
        Self {
            kind: ResourceKind::CarList,
            id: None,
        }
    }

    /// One car: `GET /api/models/{id}`
    pub fn car(id: CarId) -> Self {
        Self {
            kind: ResourceKind::Car,
            id: Some(id),
        }
    }

    /// All manufacturers: `GET /api/manufacturers`
    pub fn manufacturers() -> Self {
        Self {
            kind: ResourceKind::ManufacturerList,
            id: None,
        }
    }

    /// One manufacturer: `GET /api/manufacturers/{id}`
    pub fn manufacturer(id: ManufacturerId) -> Self {
        Self {
            kind: ResourceKind::Manufacturer,
            id: Some(id),
        }
    }

    /// All categories: `GET /api/categories`
    pub fn categories() -> Self {
        Self {
            kind: ResourceKind::CategoryList,
            id: None,
        }
    }

    /// One category: `GET /api/categories/{id}`
    pub fn category(id: CategoryId) -> Self {
        Self {
            kind: ResourceKind::Category,
            id: Some(id),
        }
    }

    /// Expected body shape
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Resource ID for single-item descriptors
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    /// HTTP method; descriptors are read-only
    pub fn method(&self) -> &'static str {
        "GET"
    }

    /// Short label identifying the resource, e.g. `"models/2"`.
    ///
    /// ```
    /// # use cars_core::ResourceDescriptor;
    /// assert_eq!(ResourceDescriptor::car(2).label(), "models/2");
    /// assert_eq!(ResourceDescriptor::manufacturers().label(), "manufacturers");
    /// ```
    pub fn label(&self) -> String {
        match self.id {
            Some(id) => format!("{}/{}", self.kind.collection(), id),
            None => self.kind.collection().to_string(),
        }
    }

    /// Path relative to the API base URL.
    ///
    /// ```
    /// # use cars_core::ResourceDescriptor;
    /// assert_eq!(ResourceDescriptor::cars().path(), "/api/models");
    /// assert_eq!(ResourceDescriptor::manufacturer(4).path(), "/api/manufacturers/4");
    /// ```
    pub fn path(&self) -> String {
        format!("/api/{}", self.label())
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// A decoded resource body. The variant always matches the
/// [`ResourceKind`] of the descriptor it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Cars(Vec<Car>),
    Car(Car),
    Manufacturers(Vec<Manufacturer>),
    Manufacturer(Manufacturer),
    Categories(Vec<Category>),
    Category(Category),
}

impl Resource {
    /// Decode a JSON body into the shape named by `kind`
    pub fn decode(kind: ResourceKind, body: &[u8]) -> serde_json::Result<Self> {
        Ok(match kind {
            ResourceKind::CarList => Resource::Cars(serde_json::from_slice(body)?),
            ResourceKind::Car => Resource::Car(serde_json::from_slice(body)?),
            ResourceKind::ManufacturerList => {
                Resource::Manufacturers(serde_json::from_slice(body)?)
            }
            ResourceKind::Manufacturer => Resource::Manufacturer(serde_json::from_slice(body)?),
            ResourceKind::CategoryList => Resource::Categories(serde_json::from_slice(body)?),
            ResourceKind::Category => Resource::Category(serde_json::from_slice(body)?),
        })
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Cars(_) => ResourceKind::CarList,
            Resource::Car(_) => ResourceKind::Car,
            Resource::Manufacturers(_) => ResourceKind::ManufacturerList,
            Resource::Manufacturer(_) => ResourceKind::Manufacturer,
            Resource::Categories(_) => ResourceKind::CategoryList,
            Resource::Category(_) => ResourceKind::Category,
        }
    }

    pub fn into_cars(self) -> Option<Vec<Car>> {
        match self {
            Resource::Cars(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_car(self) -> Option<Car> {
        match self {
            Resource::Car(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_manufacturers(self) -> Option<Vec<Manufacturer>> {
        match self {
            Resource::Manufacturers(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_manufacturer(self) -> Option<Manufacturer> {
        match self {
            Resource::Manufacturer(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_categories(self) -> Option<Vec<Category>> {
        match self {
            Resource::Categories(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_category(self) -> Option<Category> {
        match self {
            Resource::Category(v) => Some(v),
            _ => None,
        }
    }
}
