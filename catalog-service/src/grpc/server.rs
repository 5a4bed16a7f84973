//! gRPC server

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tonic::transport::Server;

use super::products::ProductRpcService;
use super::proto::product_service_server::ProductServiceServer;
use crate::config::GrpcConfig;
use crate::error::Result;
use crate::repository::ProductStore;

/// gRPC server builder
///
/// Applies the configured frame size, request timeout and TCP keepalive.
#[derive(Debug)]
pub struct GrpcServer {
    config: GrpcConfig,
}

impl GrpcServer {
    pub fn new(config: GrpcConfig) -> Self {
        Self { config }
    }

    /// Build the tonic server
    pub fn build(&self) -> Server {
        let frame_size = u32::try_from(self.config.max_message_size_bytes()).unwrap_or(u32::MAX);

        Server::builder()
            .max_frame_size(Some(frame_size))
            .timeout(self.config.timeout())
            .tcp_keepalive(Some(Duration::from_secs(60)))
    }

    /// Get the socket address for the gRPC server
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.config.port))
    }

    /// Serve the product service until `shutdown` resolves
    pub async fn serve<S, F>(self, service: ProductRpcService<S>, shutdown: F) -> Result<()>
    where
        S: ProductStore,
        F: Future<Output = ()> + Send,
    {
        let addr = self.socket_addr();
        let max_message_size = self.config.max_message_size_bytes();

        let service = ProductServiceServer::new(service)
            .max_decoding_message_size(max_message_size)
            .max_encoding_message_size(max_message_size);

        tracing::info!("gRPC server listening on {}", addr);

        self.build()
            .add_service(service)
            .serve_with_shutdown(addr, shutdown)
            .await?;

        tracing::info!("gRPC server shutdown complete");
        Ok(())
    }
}
