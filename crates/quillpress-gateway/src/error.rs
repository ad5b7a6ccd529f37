use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tonic::Status;

/// A failed backend call. Every RPC failure, NotFound included, renders as
/// HTTP 500 with a flat `{"error": message}` body; the NotFound/internal
/// distinction exists only in the gRPC status codes.
#[derive(Debug)]
pub struct GatewayError(Status);

impl From<Status> for GatewayError {
    fn from(status: Status) -> Self {
        Self(status)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!(code = ?self.0.code(), message = %self.0.message(), "backend rpc failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.message() })),
        )
            .into_response()
    }
}
