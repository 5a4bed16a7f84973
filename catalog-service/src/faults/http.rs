//! Faults for the HTTP surface

use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use super::{CatalogFault, FaultKind, FaultPresenter};
use crate::error::ErrorResponse;

/// Message returned for storage failures over HTTP
pub const HTTP_INTERNAL_MESSAGE: &str = "Check server logs for more info";

/// Presenter for the HTTP surface
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFaults;

/// HTTP fault, rendered as an [`ErrorResponse`] body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFault {
    kind: FaultKind,
    message: String,
}

impl HttpFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Body sent to the caller
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::with_code(self.kind.status_code(), self.kind.code(), &self.message)
    }
}

impl CatalogFault for HttpFault {
    fn kind(&self) -> FaultKind {
        self.kind
    }

    fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HttpFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.status_code().as_u16(), self.message)
    }
}

impl std::error::Error for HttpFault {}

impl IntoResponse for HttpFault {
    fn into_response(self) -> Response {
        (self.kind.status_code(), Json(self.to_error_response())).into_response()
    }
}

impl FaultPresenter for HttpFaults {
    type Fault = HttpFault;

    fn not_found(&self, message: String) -> HttpFault {
        HttpFault::new(FaultKind::NotFound, message)
    }

    fn invalid_input(&self, message: String) -> HttpFault {
        HttpFault::new(FaultKind::InvalidInput, message)
    }

    fn internal(&self) -> HttpFault {
        HttpFault::new(FaultKind::Internal, HTTP_INTERNAL_MESSAGE)
    }
}
