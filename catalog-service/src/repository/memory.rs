//! Process-local product store
//!
//! Used when no database is configured, and by tests. Products live in a
//! `BTreeMap` behind a `tokio::sync::RwLock`, so listing order is id order
//! and conditional writes are atomic with respect to each other.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{DatabaseError, DatabaseOperation};
use crate::models::{Attributes, Product, ProductId};

use super::pagination::Pagination;
use super::traits::{ProductStore, StoreResult};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<ProductId, Product>,
    last_id: ProductId,
}

/// In-memory [`ProductStore`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, available or not
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn missing_row(id: ProductId) -> DatabaseError {
    DatabaseError::not_found(DatabaseOperation::Update, "Record to update not found")
        .add_context(format!("products#{}", id))
}

impl ProductStore for InMemoryProductStore {
    async fn insert(&self, attributes: Attributes) -> StoreResult<Product> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let now = Utc::now();
        let product = Product {
            id: table.last_id,
            attributes,
            available: true,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn count_available(&self) -> StoreResult<u64> {
        let table = self.table.read().await;
        Ok(table.rows.values().filter(|p| p.available).count() as u64)
    }

    async fn find_available_page(&self, pagination: Pagination) -> StoreResult<Vec<Product>> {
        let table = self.table.read().await;
        let skip = usize::try_from(pagination.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(pagination.limit).unwrap_or(usize::MAX);

        Ok(table
            .rows
            .values()
            .filter(|p| p.available)
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn find_available(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).filter(|p| p.available).cloned())
    }

    async fn merge_attributes(&self, id: ProductId, patch: Attributes) -> StoreResult<Product> {
        let mut table = self.table.write().await;
        let product = table.rows.get_mut(&id).ok_or_else(|| missing_row(id))?;

        product.attributes.extend(patch);
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn mark_unavailable(&self, id: ProductId) -> StoreResult<Product> {
        let mut table = self.table.write().await;
        let product = table
            .rows
            .get_mut(&id)
            .filter(|p| p.available)
            .ok_or_else(|| missing_row(id))?;

        product.available = false;
        product.updated_at = Utc::now();
        Ok(product.clone())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(name: &str) -> Attributes {
        let mut map = Attributes::new();
        map.insert("name".to_string(), json!(name));
        map
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = InMemoryProductStore::new();
        let a = store.insert(attrs("a")).await.unwrap();
        let b = store.insert(attrs("b")).await.unwrap();
        assert_eq!(a.id + 1, b.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_mark_unavailable_is_conditional() {
        let store = InMemoryProductStore::new();
        let product = store.insert(attrs("a")).await.unwrap();

        let removed = store.mark_unavailable(product.id).await.unwrap();
        assert!(!removed.available);
        assert!(removed.updated_at >= product.updated_at);

        let err = store.mark_unavailable(product.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.count_available().await.unwrap(), 0);
        assert!(store.find_available(product.id).await.unwrap().is_none());
        assert!(!store.is_empty().await);
    }

    #[tokio::test]
    async fn test_merge_attributes_overwrites_keys() {
        let store = InMemoryProductStore::new();
        let product = store.insert(attrs("a")).await.unwrap();

        let mut patch = attrs("b");
        patch.insert("price".to_string(), json!(3));
        let merged = store.merge_attributes(product.id, patch).await.unwrap();
        assert_eq!(merged.attributes["name"], "b");
        assert_eq!(merged.attributes["price"], 3);

        let err = store.merge_attributes(99, attrs("c")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_removes_succeed_once() {
        let store = InMemoryProductStore::new();
        let product = store.insert(attrs("a")).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.mark_unavailable(product.id).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
    }
}
