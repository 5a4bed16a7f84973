//! Fault presentation
//!
//! Catalog operations fail with one of three [`FaultKind`]s. How a fault
//! looks to the caller depends on the surface it crossed, so the catalog
//! core builds faults through a [`FaultPresenter`] instead of returning a
//! fixed error type:
//!
//! - [`HttpFaults`] produces [`HttpFault`], rendered as a JSON error response
//! - [`RpcFaults`] produces [`RpcFault`], an `{message, status}` envelope

mod http;
mod rpc;

use std::fmt;

use axum::http::StatusCode;

pub use self::http::{HttpFault, HttpFaults, HTTP_INTERNAL_MESSAGE};
pub use self::rpc::{RpcFault, RpcFaults, RPC_INTERNAL_MESSAGE, RPC_STATUS_METADATA};

/// Category of a catalog fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The addressed product does not exist or is unavailable
    NotFound,
    /// The request was rejected before or by storage
    InvalidInput,
    /// Storage failed; details are only in the logs
    Internal,
}

impl FaultKind {
    /// HTTP status code for this kind
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code carried in HTTP error bodies
    pub fn code(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::InvalidInput => "BAD_REQUEST",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Inverse of [`FaultKind::status_code`]; unknown codes are internal
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            400 => Self::InvalidInput,
            _ => Self::Internal,
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::InvalidInput => write!(f, "invalid_input"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// A fault as seen by callers of a surface
pub trait CatalogFault: fmt::Debug + Send + 'static {
    /// Category of the fault
    fn kind(&self) -> FaultKind;

    /// Caller-facing message
    fn message(&self) -> &str;
}

/// Strategy turning fault kinds into surface-specific values
///
/// `internal` takes no message: each presenter owns the sanitized text for
/// storage failures.
pub trait FaultPresenter: Clone + Send + Sync + 'static {
    /// Fault type produced for this surface
    type Fault: CatalogFault;

    fn not_found(&self, message: String) -> Self::Fault;

    fn invalid_input(&self, message: String) -> Self::Fault;

    fn internal(&self) -> Self::Fault;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_status_round_trip() {
        for kind in [FaultKind::NotFound, FaultKind::InvalidInput, FaultKind::Internal] {
            assert_eq!(FaultKind::from_status(kind.status_code().as_u16()), kind);
        }
        assert_eq!(FaultKind::from_status(503), FaultKind::Internal);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FaultKind::InvalidInput.to_string(), "invalid_input");
        assert_eq!(FaultKind::NotFound.code(), "NOT_FOUND");
    }
}
