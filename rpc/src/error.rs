//! RPC error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tessera_node::NodeError;
use tessera_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("invalid request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: Option<ErrorKind>,
}

impl RpcError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Node(e) => match e.kind() {
                Some(ErrorKind::Validation) => StatusCode::BAD_REQUEST,
                Some(ErrorKind::Authorization) => StatusCode::FORBIDDEN,
                Some(ErrorKind::State) => StatusCode::CONFLICT,
                Some(ErrorKind::ExternalDependency) => StatusCode::BAD_GATEWAY,
                None => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let kind = match &self {
            Self::Node(e) => e.kind(),
            Self::BadRequest(_) => Some(ErrorKind::Validation),
        };
        let body = ErrorBody {
            error: self.to_string(),
            kind,
        };
        (self.status(), Json(body)).into_response()
    }
}
