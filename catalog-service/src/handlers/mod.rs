//! HTTP surface
//!
//! Product routes over a [`CatalogRepository`](crate::repository::CatalogRepository)
//! presenting faults with [`HttpFaults`](crate::faults::HttpFaults).

pub mod products;
mod query;

pub use products::{routes, HttpCatalog, INVALID_ID_MESSAGE};
pub use query::ListQuery;
