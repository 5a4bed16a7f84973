//! Storage seam for the catalog
//!
//! [`ProductStore`] is the set of storage primitives the catalog core is
//! written against. It uses RPITIT (Return Position Impl Trait In Traits)
//! for async methods without `async_trait`.
//!
//! Conditional writes that match no row report a
//! [`DatabaseErrorKind::NotFound`](crate::error::DatabaseErrorKind::NotFound)
//! error; every other failure keeps its own kind.

use std::future::Future;

use crate::error::DatabaseError;
use crate::models::{Attributes, Product, ProductId};

use super::pagination::Pagination;

/// Result type for storage primitives
pub type StoreResult<T> = std::result::Result<T, DatabaseError>;

/// Storage client for products
///
/// Implementations are cheap handles (`Clone`) shared by every surface.
pub trait ProductStore: Clone + Send + Sync + 'static {
    /// Insert a new available product
    fn insert(&self, attributes: Attributes) -> impl Future<Output = StoreResult<Product>> + Send;

    /// Number of available products
    fn count_available(&self) -> impl Future<Output = StoreResult<u64>> + Send;

    /// A window of available products in storage order
    fn find_available_page(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = StoreResult<Vec<Product>>> + Send;

    /// An available product by id
    fn find_available(
        &self,
        id: ProductId,
    ) -> impl Future<Output = StoreResult<Option<Product>>> + Send;

    /// Merge attributes into the product with `id`, available or not
    ///
    /// Fails with a not-found error when no row has this id.
    fn merge_attributes(
        &self,
        id: ProductId,
        patch: Attributes,
    ) -> impl Future<Output = StoreResult<Product>> + Send;

    /// Set `available = false` where `id` matches and the product is available
    ///
    /// Fails with a not-found error when no available row has this id.
    fn mark_unavailable(&self, id: ProductId) -> impl Future<Output = StoreResult<Product>> + Send;

    /// Check the storage connection
    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;

    /// Release storage resources
    fn close(&self) -> impl Future<Output = ()> + Send {
        async {}
    }
}
