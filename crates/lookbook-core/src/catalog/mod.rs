//! Catalog domain module.
//!
//! Article metadata and recommendation value objects, plus the gateway
//! contract for retrieving them.

mod gateway;
mod model;

pub use gateway::CatalogGateway;
pub use model::{Item, RecommendedItem};
