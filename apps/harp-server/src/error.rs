//! Error-to-HTTP mapping.
//!
//! Authentication failure and cross-tenant access produce the same generic
//! 403; ownership-scoped misses are 404 regardless of whether the resource
//! exists for someone else. Internal errors are logged here and leave the
//! process as an opaque 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use harp_crypto::CryptoError;
use harp_store::StoreError;

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: "Forbidden".into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Forbidden => Self::forbidden(),
            StoreError::Conflict(what) => Self {
                status: StatusCode::CONFLICT,
                message: format!("{what} already exists"),
            },
            StoreError::NotFound(what) => Self {
                status: StatusCode::NOT_FOUND,
                message: format!("{what} not found"),
            },
            StoreError::Database(_) | StoreError::Migration(_) => {
                tracing::error!(error = %e, "store failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal error".into(),
                }
            }
        }
    }
}

impl From<CryptoError> for ApiError {
    fn from(e: CryptoError) -> Self {
        tracing::error!(error = %e, "crypto failure");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal error".into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
