//! RPC surface
//!
//! The `catalog.ProductService` gRPC service over a
//! [`CatalogRepository`](crate::repository::CatalogRepository) presenting
//! faults with [`RpcFaults`](crate::faults::RpcFaults). Faults leave as a
//! [`tonic::Status`] carrying the `{message, status}` envelope; clients
//! recover it with [`RpcFault::from_status`](crate::faults::RpcFault::from_status).

pub mod products;
pub mod server;

/// Generated protobuf types and service stubs
pub mod proto {
    tonic::include_proto!("catalog");
}

pub use products::{ProductRpcService, RpcCatalog};
pub use server::GrpcServer;
