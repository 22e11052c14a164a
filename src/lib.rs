pub mod catalog;
mod error;
pub mod query;
pub mod results;
pub mod scene;
pub mod selection;

pub use catalog::{CatalogClient, SearchResponse};
pub use error::{CatalogError, DecodeError};
pub use query::{BoundingBox, Query, QueryBuilder, Sensor};
pub use scene::{Envelope, Footprint, Scene};
