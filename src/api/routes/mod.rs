//! Route handlers, grouped by resource.

pub mod cache;
pub mod catalog;
pub mod generate;
pub mod health;

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::error::FissionError;

/// Map an orchestrator error to a status code and `{error}` body.
pub(crate) fn error_response(err: &FissionError) -> (StatusCode, Json<Value>) {
    let status = if err.is_client_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(json!({ "error": err.to_string() })))
}
