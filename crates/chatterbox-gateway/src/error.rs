//! Gateway-level errors (HTTP surface and process startup).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use chatterbox_core::error::{ChatterboxError, ClientCode};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Core(#[from] ChatterboxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn client_code(&self) -> ClientCode {
        match self {
            GatewayError::Core(e) => e.client_code(),
            GatewayError::Io(_) => ClientCode::Internal,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let code = self.client_code();
        let status = match code {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::NotConnected => StatusCode::GONE,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
