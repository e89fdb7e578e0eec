//! Push/dump endpoint.
//!
//! - `POST`: JSON batch for one object; 200 empty on success, 400 plain-text
//!   decoder message otherwise.
//! - `GET`: full JSON dump of the store.
//! - anything else: 404.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;

use pushmetrics_core::error::MetricsError;

use crate::app_state::AppState;

pub async fn push(State(state): State<AppState>, body: Bytes) -> Response {
    match state.ingest().ingest(body) {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "rejected push body");
            let msg = match e {
                MetricsError::BadRequest(msg) => msg,
                other => other.to_string(),
            };
            (StatusCode::BAD_REQUEST, msg).into_response()
        }
    }
}

pub async fn dump(State(state): State<AppState>) -> Response {
    Json(state.store().snapshot()).into_response()
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
