//! # catalog-service
//!
//! Product catalog with soft delete, served over HTTP (axum) and gRPC (tonic).
//!
//! ## Features
//!
//! - **One core, two surfaces**: [`repository::CatalogRepository`] owns pagination,
//!   soft delete and error normalization; HTTP and gRPC plug in their own
//!   fault presentation ([`faults`])
//! - **Storage**: PostgreSQL through sqlx, or an in-memory table when no
//!   database is configured
//! - **Middleware stack**: request tracking, panic recovery, body size limits,
//!   compression, CORS, timeouts
//! - **Health checks**: liveness and readiness probes
//! - **Graceful shutdown**: SIGTERM and SIGINT stop both servers
//!
//! ## Example
//!
//! ```rust,no_run
//! use catalog_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     run(config, InMemoryProductStore::new()).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod faults;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod server;

#[cfg(feature = "grpc")]
pub mod grpc;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, GrpcConfig};
    pub use crate::error::{DatabaseError, Error, ErrorResponse, Result};
    pub use crate::faults::{
        CatalogFault, FaultKind, FaultPresenter, HttpFault, HttpFaults, RpcFault, RpcFaults,
    };
    pub use crate::models::{Attributes, Product, ProductId};
    pub use crate::observability::{init_tracing, shutdown_tracing};
    pub use crate::repository::{
        CatalogRepository, InMemoryProductStore, Page, PageMeta, PageRequest, PgProductStore,
        ProductStore,
    };
    pub use crate::server::{run, Server};

    #[cfg(feature = "grpc")]
    pub use crate::grpc::{GrpcServer, ProductRpcService};
}
