//! HTTP transport.
//!
//! - `push`: the push/dump endpoint pushers talk to.
//! - `api`: read routes shaped like the custom/external metrics APIs.

pub mod api;
pub mod push;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use pushmetrics_core::error::MetricsError;

/// Error wrapper so handlers can return `Result<_, ApiError>` and use `?`.
#[derive(Debug)]
pub struct ApiError(pub MetricsError);

impl From<MetricsError> for ApiError {
    fn from(e: MetricsError) -> Self {
        Self(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status =
            StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            code: code.as_str(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
