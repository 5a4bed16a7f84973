//! Product catalog repository
//!
//! - [`CatalogRepository`]: the catalog operations, generic over storage and
//!   fault presentation
//! - [`ProductStore`]: storage primitives, implemented by
//!   [`PgProductStore`] and [`InMemoryProductStore`]
//! - [`PageRequest`] / [`Page`]: pagination in and out
//!
//! # Example
//!
//! ```rust
//! use catalog_service::faults::HttpFaults;
//! use catalog_service::repository::{CatalogRepository, InMemoryProductStore, PageRequest};
//!
//! # async fn example() {
//! let catalog = CatalogRepository::new(InMemoryProductStore::new(), HttpFaults);
//!
//! let mut attributes = serde_json::Map::new();
//! attributes.insert("name".into(), "Chair".into());
//! let chair = catalog.create(attributes).await.unwrap();
//!
//! let page = catalog.find_all(PageRequest::default()).await.unwrap();
//! assert_eq!(page.data[0].id, chair.id);
//! # }
//! ```

mod catalog;
mod error;
mod memory;
mod pagination;
mod postgres;
mod traits;

pub use catalog::{not_found_message, CatalogRepository, INVALID_DATA_MESSAGE, NO_DATA_MESSAGE};
pub use error::CatalogOperation;
pub use memory::InMemoryProductStore;
pub use pagination::{Page, PageMeta, PageRequest, PageRequestError, Pagination};
pub use postgres::PgProductStore;
pub use traits::{ProductStore, StoreResult};
