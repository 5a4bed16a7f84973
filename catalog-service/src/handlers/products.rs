//! REST handlers for products
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | `POST` | `/products` | 201 + product |
//! | `GET` | `/products?page=&limit=` | 200 + page |
//! | `GET` | `/products/{id}` | 200 + product |
//! | `PATCH` | `/products/{id}` | 200 + product |
//! | `DELETE` | `/products/{id}` | 200 + removed product |
//!
//! Failures are [`HttpFault`]s rendered as JSON error bodies.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::query::ListQuery;
use crate::faults::{FaultPresenter, HttpFault, HttpFaults};
use crate::models::{attributes_from_value, Attributes, Product, ProductId};
use crate::repository::{CatalogRepository, Page, ProductStore, INVALID_DATA_MESSAGE};

/// Catalog as seen by the HTTP surface
pub type HttpCatalog<S> = CatalogRepository<S, HttpFaults>;

/// Message for non-numeric ids in the path
pub const INVALID_ID_MESSAGE: &str = "Validation failed (numeric string is expected)";

/// Product routes, relative to the API prefix
pub fn routes<S: ProductStore>(catalog: HttpCatalog<S>) -> Router {
    Router::new()
        .route("/products", get(find_all::<S>).post(create::<S>))
        .route(
            "/products/{id}",
            get(find_one::<S>).patch(update::<S>).delete(remove::<S>),
        )
        .with_state(catalog)
}

fn product_id(path: Result<Path<ProductId>, PathRejection>) -> Result<ProductId, HttpFault> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("Rejected product id: {}", rejection.body_text());
        HttpFaults.invalid_input(INVALID_ID_MESSAGE.to_string())
    })
}

fn attributes(payload: Result<Json<Value>, JsonRejection>) -> Result<Attributes, HttpFault> {
    payload
        .ok()
        .and_then(|Json(value)| attributes_from_value(value))
        .ok_or_else(|| HttpFaults.invalid_input(INVALID_DATA_MESSAGE.to_string()))
}

/// `POST /products`
pub async fn create<S: ProductStore>(
    State(catalog): State<HttpCatalog<S>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), HttpFault> {
    let product = catalog.create(attributes(payload)?).await?;
    tracing::info!(id = product.id, "Created product");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /products?page=&limit=`
pub async fn find_all<S: ProductStore>(
    State(catalog): State<HttpCatalog<S>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Page<Product>>, HttpFault> {
    let Query(query) =
        query.map_err(|rejection| HttpFaults.invalid_input(rejection.body_text()))?;
    let request = query
        .page_request()
        .map_err(|e| HttpFaults.invalid_input(e.to_string()))?;

    Ok(Json(catalog.find_all(request).await?))
}

/// `GET /products/{id}`
pub async fn find_one<S: ProductStore>(
    State(catalog): State<HttpCatalog<S>>,
    id: Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Product>, HttpFault> {
    Ok(Json(catalog.find_one(product_id(id)?).await?))
}

/// `PATCH /products/{id}`
pub async fn update<S: ProductStore>(
    State(catalog): State<HttpCatalog<S>>,
    id: Result<Path<ProductId>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, HttpFault> {
    let id = product_id(id)?;
    let product = catalog.update(id, attributes(payload)?).await?;
    tracing::info!(id, "Updated product");
    Ok(Json(product))
}

/// `DELETE /products/{id}`
pub async fn remove<S: ProductStore>(
    State(catalog): State<HttpCatalog<S>>,
    id: Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Product>, HttpFault> {
    let id = product_id(id)?;
    let product = catalog.remove(id).await?;
    tracing::info!(id, "Removed product");
    Ok(Json(product))
}
