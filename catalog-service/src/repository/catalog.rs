//! Catalog core shared by every surface

use crate::error::DatabaseError;
use crate::faults::FaultPresenter;
use crate::models::{strip_reserved, Attributes, Product, ProductId};

use super::error::CatalogOperation;
use super::pagination::{Page, PageMeta, PageRequest};
use super::traits::ProductStore;

/// Message for conditional writes that matched no row
pub const INVALID_DATA_MESSAGE: &str = "Invalid data provided";

/// Message for updates with nothing to write
pub const NO_DATA_MESSAGE: &str = "No data provided";

/// Product catalog operations
///
/// Storage goes through `S`; faults are built by `F`, so the same core
/// serves the HTTP and RPC surfaces with their own error shapes.
///
/// Only available products are visible to [`find_all`](Self::find_all) and
/// [`find_one`](Self::find_one). [`remove`](Self::remove) is a soft delete.
#[derive(Debug, Clone)]
pub struct CatalogRepository<S, F> {
    store: S,
    faults: F,
}

impl<S, F> CatalogRepository<S, F>
where
    S: ProductStore,
    F: FaultPresenter,
{
    pub fn new(store: S, faults: F) -> Self {
        Self { store, faults }
    }

    /// Underlying storage client
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert a product; reserved keys in `attributes` are ignored
    pub async fn create(&self, attributes: Attributes) -> Result<Product, F::Fault> {
        let product = self
            .store
            .insert(strip_reserved(attributes))
            .await
            .map_err(|e| self.normalize(CatalogOperation::Create, e))?;

        tracing::debug!(id = product.id, "Product created");
        Ok(product)
    }

    /// One page of available products
    ///
    /// The count and the page are two separate reads; a concurrent write
    /// between them can make `last_page` disagree with `data`.
    pub async fn find_all(&self, request: PageRequest) -> Result<Page<Product>, F::Fault> {
        let total = self
            .store
            .count_available()
            .await
            .map_err(|e| self.normalize(CatalogOperation::FindAll, e))?;

        let data = self
            .store
            .find_available_page(request.pagination())
            .await
            .map_err(|e| self.normalize(CatalogOperation::FindAll, e))?;

        Ok(Page {
            data,
            pagination: PageMeta::new(request, total),
        })
    }

    /// An available product by id
    pub async fn find_one(&self, id: ProductId) -> Result<Product, F::Fault> {
        self.store
            .find_available(id)
            .await
            .map_err(|e| self.normalize(CatalogOperation::FindOne, e))?
            .ok_or_else(|| self.faults.not_found(not_found_message(id)))
    }

    /// Merge `patch` into the product with `id`
    ///
    /// Soft-deleted products are updated too. A patch without any field
    /// besides reserved keys is rejected without touching storage.
    pub async fn update(&self, id: ProductId, patch: Attributes) -> Result<Product, F::Fault> {
        let patch = strip_reserved(patch);
        if patch.is_empty() {
            return Err(self.faults.invalid_input(NO_DATA_MESSAGE.to_string()));
        }

        let product = self
            .store
            .merge_attributes(id, patch)
            .await
            .map_err(|e| self.normalize(CatalogOperation::Update, e))?;

        tracing::debug!(id, "Product updated");
        Ok(product)
    }

    /// Soft delete: flip `available` to `false` on an available product
    pub async fn remove(&self, id: ProductId) -> Result<Product, F::Fault> {
        let product = self
            .store
            .mark_unavailable(id)
            .await
            .map_err(|e| self.normalize(CatalogOperation::Remove, e))?;

        tracing::debug!(id, "Product removed");
        Ok(product)
    }

    /// Map a storage error onto the fault taxonomy
    ///
    /// A conditional write that matched no row is invalid input. Anything
    /// else is logged in full and surfaces as an internal fault.
    fn normalize(&self, operation: CatalogOperation, err: DatabaseError) -> F::Fault {
        if err.is_not_found() {
            tracing::debug!(
                operation = %operation,
                context = ?err.context,
                "Conditional write matched no row: {}", err.message
            );
            return self.faults.invalid_input(INVALID_DATA_MESSAGE.to_string());
        }

        tracing::error!(
            operation = %operation,
            storage_operation = %err.operation,
            kind = %err.kind,
            context = ?err.context,
            retriable = err.is_retriable(),
            "Storage error: {}", err.message
        );
        self.faults.internal()
    }
}

/// Caller-facing message for an unknown or unavailable id
pub fn not_found_message(id: ProductId) -> String {
    format!("Product #{} not found", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DatabaseErrorKind, DatabaseOperation};
    use crate::faults::{CatalogFault, FaultKind, HttpFaults, RpcFaults, HTTP_INTERNAL_MESSAGE};
    use crate::repository::{InMemoryProductStore, Pagination, StoreResult};
    use serde_json::{json, Value};
    use std::num::NonZeroU64;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn page(page: u64, limit: u64) -> PageRequest {
        PageRequest::new(NonZeroU64::new(page).unwrap(), NonZeroU64::new(limit).unwrap())
    }

    fn catalog() -> CatalogRepository<InMemoryProductStore, HttpFaults> {
        CatalogRepository::new(InMemoryProductStore::new(), HttpFaults)
    }

    /// Store whose every primitive fails with the given kind, counting calls
    #[derive(Debug, Clone)]
    struct FailingStore {
        kind: DatabaseErrorKind,
        calls: Arc<AtomicUsize>,
    }

    impl FailingStore {
        fn new(kind: DatabaseErrorKind) -> Self {
            Self {
                kind,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn fail<T>(&self) -> StoreResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DatabaseError::new(
                DatabaseOperation::Query,
                self.kind,
                "relation \"products\" does not exist",
            ))
        }
    }

    impl ProductStore for FailingStore {
        async fn insert(&self, _attributes: Attributes) -> StoreResult<Product> {
            self.fail()
        }

        async fn count_available(&self) -> StoreResult<u64> {
            self.fail()
        }

        async fn find_available_page(&self, _pagination: Pagination) -> StoreResult<Vec<Product>> {
            self.fail()
        }

        async fn find_available(&self, _id: ProductId) -> StoreResult<Option<Product>> {
            self.fail()
        }

        async fn merge_attributes(&self, _id: ProductId, _patch: Attributes) -> StoreResult<Product> {
            self.fail()
        }

        async fn mark_unavailable(&self, _id: ProductId) -> StoreResult<Product> {
            self.fail()
        }

        async fn ping(&self) -> StoreResult<()> {
            self.fail()
        }
    }

    #[tokio::test]
    async fn test_chair_scenario() {
        let catalog = catalog();

        let chair = catalog
            .create(attrs(json!({"name": "Chair", "price": 10})))
            .await
            .unwrap();
        assert!(chair.available);
        assert_eq!(chair.attribute("name"), Some(&json!("Chair")));

        let listed = catalog.find_all(page(1, 10)).await.unwrap();
        assert_eq!(listed.data, vec![chair.clone()]);
        assert_eq!(listed.pagination.total_pages, 1);
        assert_eq!(listed.pagination.last_page, 1);

        let updated = catalog.update(chair.id, attrs(json!({"price": 12}))).await.unwrap();
        assert_eq!(updated.attribute("price"), Some(&json!(12)));
        assert_eq!(updated.attribute("name"), Some(&json!("Chair")));

        let removed = catalog.remove(chair.id).await.unwrap();
        assert!(!removed.available);

        let err = catalog.find_one(chair.id).await.unwrap_err();
        assert_eq!(err.kind(), FaultKind::NotFound);
        assert_eq!(err.message(), format!("Product #{} not found", chair.id));

        let listed = catalog.find_all(page(1, 10)).await.unwrap();
        assert!(listed.data.is_empty());
        assert_eq!(listed.pagination.total_pages, 0);
        assert_eq!(listed.pagination.last_page, 0);
    }

    #[tokio::test]
    async fn test_create_then_find_one() {
        let catalog = catalog();
        let created = catalog
            .create(attrs(json!({"name": "Lamp", "id": 999, "available": false})))
            .await
            .unwrap();

        assert_ne!(created.id, 999);
        assert!(created.available);
        assert_eq!(created.attributes.len(), 1);
        assert_eq!(catalog.find_one(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_find_all_pages() {
        let catalog = catalog();
        for n in 0..7 {
            catalog.create(attrs(json!({"n": n}))).await.unwrap();
        }
        let removed = catalog.find_all(page(1, 1)).await.unwrap().data[0].id;
        catalog.remove(removed).await.unwrap();

        let first = catalog.find_all(page(1, 4)).await.unwrap();
        assert_eq!(first.data.len(), 4);
        assert_eq!(first.pagination.total_pages, 6);
        assert_eq!(first.pagination.last_page, 2);

        let second = catalog.find_all(page(2, 4)).await.unwrap();
        assert_eq!(second.data.len(), 2);
        assert!(second.data.iter().all(|p| p.available && p.id != removed));

        let beyond = catalog.find_all(page(5, 4)).await.unwrap();
        assert!(beyond.data.is_empty());
        assert_eq!(beyond.pagination.last_page, 2);
    }

    #[tokio::test]
    async fn test_find_one_unknown_id() {
        let err = catalog().find_one(42).await.unwrap_err();
        assert_eq!(err.kind(), FaultKind::NotFound);
        assert_eq!(err.message(), "Product #42 not found");
    }

    #[tokio::test]
    async fn test_remove_twice() {
        let catalog = catalog();
        let product = catalog.create(attrs(json!({"name": "Desk"}))).await.unwrap();

        catalog.remove(product.id).await.unwrap();
        let err = catalog.remove(product.id).await.unwrap_err();
        assert_eq!(err.kind(), FaultKind::InvalidInput);
        assert_eq!(err.message(), INVALID_DATA_MESSAGE);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_invalid_input() {
        let err = catalog()
            .update(404, attrs(json!({"price": 1})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FaultKind::InvalidInput);
        assert_eq!(err.message(), INVALID_DATA_MESSAGE);
    }

    #[tokio::test]
    async fn test_update_removed_product_is_allowed() {
        let catalog = catalog();
        let product = catalog.create(attrs(json!({"name": "Desk"}))).await.unwrap();
        catalog.remove(product.id).await.unwrap();

        let updated = catalog
            .update(product.id, attrs(json!({"name": "Old desk"})))
            .await
            .unwrap();
        assert!(!updated.available);
        assert_eq!(updated.attribute("name"), Some(&json!("Old desk")));
    }

    #[tokio::test]
    async fn test_empty_update_skips_storage() {
        let store = FailingStore::new(DatabaseErrorKind::ConnectionFailed);
        let catalog = CatalogRepository::new(store.clone(), RpcFaults);

        for patch in [json!({}), json!({"id": 5}), json!({"id": 5, "available": true})] {
            let err = catalog.update(1, attrs(patch)).await.unwrap_err();
            assert_eq!(err.status, 400);
            assert_eq!(err.message, NO_DATA_MESSAGE);
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_storage_failures_are_internal() {
        let store = FailingStore::new(DatabaseErrorKind::QueryFailed);
        let catalog = CatalogRepository::new(store.clone(), HttpFaults);

        let faults = vec![
            catalog.create(attrs(json!({"name": "Chair"}))).await.unwrap_err(),
            catalog.find_all(PageRequest::default()).await.unwrap_err(),
            catalog.find_one(1).await.unwrap_err(),
            catalog.update(1, attrs(json!({"price": 3}))).await.unwrap_err(),
            catalog.remove(1).await.unwrap_err(),
        ];

        for fault in faults {
            assert_eq!(fault.kind(), FaultKind::Internal);
            assert_eq!(fault.message(), HTTP_INTERNAL_MESSAGE);
            assert!(!fault.message().contains("products"));
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_not_found_storage_error_is_invalid_input() {
        let catalog = CatalogRepository::new(FailingStore::new(DatabaseErrorKind::NotFound), RpcFaults);
        let fault = catalog.remove(1).await.unwrap_err();
        assert_eq!(fault.status, 400);
        assert_eq!(fault.message, INVALID_DATA_MESSAGE);
    }
}
