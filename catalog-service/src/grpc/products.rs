//! `catalog.ProductService` implementation

use std::num::NonZeroU64;

use serde_json::Value;
use tonic::{Request, Response, Status};

use super::proto::{
    self, product_service_server::ProductService, CreateProductRequest, FindAllProductsRequest,
    PaginationMeta, ProductIdRequest, ProductPage, UpdateProductRequest,
};
use crate::faults::{FaultPresenter, RpcFault, RpcFaults};
use crate::models::{attributes_from_value, Attributes, Product};
use crate::repository::{
    CatalogRepository, Page, PageMeta, PageRequest, ProductStore, INVALID_DATA_MESSAGE,
};

/// Catalog as seen by the RPC surface
pub type RpcCatalog<S> = CatalogRepository<S, RpcFaults>;

/// gRPC product service
#[derive(Debug, Clone)]
pub struct ProductRpcService<S> {
    catalog: RpcCatalog<S>,
}

impl<S: ProductStore> ProductRpcService<S> {
    pub fn new(catalog: RpcCatalog<S>) -> Self {
        Self { catalog }
    }
}

/// Parse `attributes_json`; an empty string is an empty mapping
fn parse_attributes(json: &str) -> Result<Attributes, RpcFault> {
    if json.trim().is_empty() {
        return Ok(Attributes::new());
    }

    serde_json::from_str::<Value>(json)
        .ok()
        .and_then(attributes_from_value)
        .ok_or_else(|| RpcFaults.invalid_input(INVALID_DATA_MESSAGE.to_string()))
}

impl From<Product> for proto::Product {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            available: product.available,
            attributes_json: Value::Object(product.attributes).to_string(),
            created_at: product.created_at.to_rfc3339(),
            updated_at: product.updated_at.to_rfc3339(),
        }
    }
}

impl From<PageMeta> for PaginationMeta {
    fn from(meta: PageMeta) -> Self {
        Self {
            page: meta.page,
            limit: meta.limit,
            total_pages: meta.total_pages,
            last_page: meta.last_page,
        }
    }
}

impl From<Page<Product>> for ProductPage {
    fn from(page: Page<Product>) -> Self {
        Self {
            data: page.data.into_iter().map(proto::Product::from).collect(),
            pagination: Some(page.pagination.into()),
        }
    }
}

#[tonic::async_trait]
impl<S: ProductStore> ProductService for ProductRpcService<S> {
    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<proto::Product>, Status> {
        let req = request.into_inner();
        let attributes = parse_attributes(&req.attributes_json)?;

        let product = self.catalog.create(attributes).await?;
        tracing::info!(id = product.id, "gRPC: Created product");

        Ok(Response::new(product.into()))
    }

    async fn find_all_products(
        &self,
        request: Request<FindAllProductsRequest>,
    ) -> Result<Response<ProductPage>, Status> {
        let req = request.into_inner();
        // proto3 zero means the field was not set
        let page_request =
            PageRequest::with_defaults(NonZeroU64::new(req.page), NonZeroU64::new(req.limit));

        tracing::debug!(
            page = page_request.page.get(),
            limit = page_request.limit.get(),
            "gRPC: Listing products"
        );

        let page = self.catalog.find_all(page_request).await?;
        Ok(Response::new(page.into()))
    }

    async fn find_one_product(
        &self,
        request: Request<ProductIdRequest>,
    ) -> Result<Response<proto::Product>, Status> {
        let id = request.into_inner().id;
        let product = self.catalog.find_one(id).await?;
        Ok(Response::new(product.into()))
    }

    async fn update_product(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<proto::Product>, Status> {
        let req = request.into_inner();
        let patch = parse_attributes(&req.attributes_json)?;

        let product = self.catalog.update(req.id, patch).await?;
        tracing::info!(id = product.id, "gRPC: Updated product");

        Ok(Response::new(product.into()))
    }

    async fn remove_product(
        &self,
        request: Request<ProductIdRequest>,
    ) -> Result<Response<proto::Product>, Status> {
        let id = request.into_inner().id;
        let product = self.catalog.remove(id).await?;
        tracing::info!(id, "gRPC: Removed product");

        Ok(Response::new(product.into()))
    }
}
