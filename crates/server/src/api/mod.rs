//! HTTP endpoint modules.
//!
//! Shared response types live here in mod.rs.

mod contact;
mod health;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn error_response(
    status: StatusCode,
    error: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

pub(crate) fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

// ── Re-exports ───────────────────────────────────────────────────

pub use contact::{contact_preflight, method_not_allowed, panic_response, submit_contact, ContactResponse};
pub use health::{health, HealthResponse};
