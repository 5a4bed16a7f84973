//! Faults for the RPC surface
//!
//! An [`RpcFault`] is the `{message, status}` envelope RPC callers receive.
//! On the wire it travels as a [`tonic::Status`] whose message is the fault
//! message, with the status code in the [`RPC_STATUS_METADATA`] entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CatalogFault, FaultKind, FaultPresenter};

/// Message returned for storage failures over RPC
pub const RPC_INTERNAL_MESSAGE: &str = "Internal server error";

/// Metadata key carrying the envelope status
pub const RPC_STATUS_METADATA: &str = "x-rpc-status";

/// Presenter for the RPC surface
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcFaults;

/// RPC fault envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcFault {
    pub message: String,
    pub status: u16,
}

impl RpcFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: kind.status_code().as_u16(),
        }
    }

    /// Recover the envelope from a status produced by this service
    ///
    /// Falls back to the gRPC code when the metadata entry is missing.
    #[cfg(feature = "grpc")]
    pub fn from_status(status: &tonic::Status) -> Self {
        let kind = status
            .metadata()
            .get(RPC_STATUS_METADATA)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u16>().ok())
            .map(FaultKind::from_status)
            .unwrap_or(match status.code() {
                tonic::Code::NotFound => FaultKind::NotFound,
                tonic::Code::InvalidArgument => FaultKind::InvalidInput,
                _ => FaultKind::Internal,
            });

        Self::new(kind, status.message())
    }
}

impl CatalogFault for RpcFault {
    fn kind(&self) -> FaultKind {
        FaultKind::from_status(self.status)
    }

    fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RpcFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl std::error::Error for RpcFault {}

#[cfg(feature = "grpc")]
impl From<RpcFault> for tonic::Status {
    fn from(fault: RpcFault) -> Self {
        let code = match fault.kind() {
            FaultKind::NotFound => tonic::Code::NotFound,
            FaultKind::InvalidInput => tonic::Code::InvalidArgument,
            FaultKind::Internal => tonic::Code::Internal,
        };

        let mut status = tonic::Status::new(code, fault.message);
        status
            .metadata_mut()
            .insert(RPC_STATUS_METADATA, tonic::metadata::MetadataValue::from(fault.status));
        status
    }
}

impl FaultPresenter for RpcFaults {
    type Fault = RpcFault;

    fn not_found(&self, message: String) -> RpcFault {
        RpcFault::new(FaultKind::NotFound, message)
    }

    fn invalid_input(&self, message: String) -> RpcFault {
        RpcFault::new(FaultKind::InvalidInput, message)
    }

    fn internal(&self) -> RpcFault {
        RpcFault::new(FaultKind::Internal, RPC_INTERNAL_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_statuses() {
        assert_eq!(RpcFaults.not_found("Product #1 not found".into()).status, 404);
        assert_eq!(RpcFaults.invalid_input("Invalid data provided".into()).status, 400);

        let internal = RpcFaults.internal();
        assert_eq!(internal.status, 500);
        assert_eq!(internal.message, RPC_INTERNAL_MESSAGE);
    }

    #[test]
    fn test_envelope_json_shape() {
        let json = serde_json::to_value(RpcFaults.not_found("Product #1 not found".into())).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Product #1 not found", "status": 404}));
    }

    #[cfg(feature = "grpc")]
    #[test]
    fn test_status_conversion_keeps_envelope() {
        let fault = RpcFaults.not_found("Product #7 not found".into());
        let status = tonic::Status::from(fault.clone());

        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "Product #7 not found");
        assert_eq!(
            status.metadata().get(RPC_STATUS_METADATA).unwrap().to_str().unwrap(),
            "404"
        );
        assert_eq!(RpcFault::from_status(&status), fault);
    }

    #[cfg(feature = "grpc")]
    #[test]
    fn test_from_status_without_metadata() {
        let status = tonic::Status::invalid_argument("No data provided");
        let fault = RpcFault::from_status(&status);
        assert_eq!(fault.status, 400);
        assert_eq!(fault.kind(), FaultKind::InvalidInput);
    }
}
