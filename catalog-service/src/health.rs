//! Health check handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::repository::ProductStore;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response with dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Dependency statuses
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    /// Dependency is healthy
    pub healthy: bool,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// State for the probe routes
#[derive(Debug, Clone)]
pub struct HealthState<S> {
    service: Arc<str>,
    store: S,
}

impl<S: ProductStore> HealthState<S> {
    pub fn new(service: impl Into<Arc<str>>, store: S) -> Self {
        Self {
            service: service.into(),
            store,
        }
    }
}

/// `/health` and `/ready`
pub fn routes<S: ProductStore>(state: HealthState<S>) -> Router {
    Router::new()
        .route("/health", get(health::<S>))
        .route("/ready", get(readiness::<S>))
        .with_state(state)
}

/// Simple health check (liveness probe)
///
/// Always returns 200 OK if the service is running.
pub async fn health<S: ProductStore>(State(state): State<HealthState<S>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.service.to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check (readiness probe)
///
/// Returns 503 Service Unavailable when the product store does not answer a ping.
pub async fn readiness<S: ProductStore>(State(state): State<HealthState<S>>) -> impl IntoResponse {
    let store_status = match state.store.ping().await {
        Ok(()) => DependencyStatus {
            healthy: true,
            message: Some("Connected".to_string()),
        },
        Err(e) => {
            tracing::error!(kind = %e.kind, "Product store health check failed: {}", e.message);
            DependencyStatus {
                healthy: false,
                message: Some(format!("Ping failed: {}", e.kind)),
            }
        }
    };

    let ready = store_status.healthy;
    let mut dependencies = HashMap::new();
    dependencies.insert("product_store".to_string(), store_status);

    let response = ReadinessResponse {
        ready,
        service: state.service.to_string(),
        dependencies,
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatabaseError;
    use crate::models::{Attributes, Product, ProductId};
    use crate::repository::{InMemoryProductStore, Pagination, StoreResult};
    use axum::body::Body;
    use http::Request;
    use tower::ServiceExt;

    #[derive(Clone)]
    struct UnreachableStore;

    impl ProductStore for UnreachableStore {
        async fn insert(&self, _attributes: Attributes) -> StoreResult<Product> {
            unreachable!()
        }

        async fn count_available(&self) -> StoreResult<u64> {
            unreachable!()
        }

        async fn find_available_page(&self, _pagination: Pagination) -> StoreResult<Vec<Product>> {
            unreachable!()
        }

        async fn find_available(&self, _id: ProductId) -> StoreResult<Option<Product>> {
            unreachable!()
        }

        async fn merge_attributes(&self, _id: ProductId, _patch: Attributes) -> StoreResult<Product> {
            unreachable!()
        }

        async fn mark_unavailable(&self, _id: ProductId) -> StoreResult<Product> {
            unreachable!()
        }

        async fn ping(&self) -> StoreResult<()> {
            Err(DatabaseError::pool_exhausted("Connection pool timed out"))
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_health_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            service: "catalog-service".to_string(),
            version: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("version").is_none());
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = routes(HealthState::new("catalog-service", InMemoryProductStore::new()));
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "catalog-service");
    }

    #[tokio::test]
    async fn test_ready_when_store_answers() {
        let app = routes(HealthState::new("catalog-service", InMemoryProductStore::new()));
        let (status, body) = get_json(app, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], true);
        assert_eq!(body["dependencies"]["product_store"]["healthy"], true);
    }

    #[tokio::test]
    async fn test_not_ready_when_store_is_down() {
        let app = routes(HealthState::new("catalog-service", UnreachableStore));
        let (status, body) = get_json(app, "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["ready"], false);
        assert_eq!(
            body["dependencies"]["product_store"]["message"],
            "Ping failed: pool_exhausted"
        );
    }
}
