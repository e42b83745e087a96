//! Contact-form endpoint.
//!
//! Validates the submission, then relays it through the notification
//! chain configured for this request.

use std::any::Any;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use coderx_notify::{ContactSubmission, DispatchError, Dispatcher, FailureReason, Inquiry};

use crate::state::AppState;

use super::{error_response, internal_error, ErrorResponse};

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

/// `POST /api/contact`
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ContactResponse>, (StatusCode, Json<ErrorResponse>)> {
    let submission: ContactSubmission = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "Error processing contact form");
        internal_error()
    })?;

    let inquiry = Inquiry::parse(submission).map_err(|e| {
        tracing::debug!(error = ?e, "Contact form rejected");
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let channels = state.channels.load();
    let dispatcher = Dispatcher::from_config(&channels, state.http.clone());

    match dispatcher.dispatch(&inquiry).await {
        Ok(delivery) => {
            tracing::info!(channel = %delivery.channel, "Contact form submitted");
            Ok(Json(ContactResponse {
                success: true,
                message: "Contact form submitted successfully",
            }))
        }
        Err(DispatchError::NotDelivered { reason, .. }) => {
            if reason == FailureReason::NotConfigured {
                tracing::error!(
                    has_resend_key = channels.resend.api_key.is_some(),
                    has_sendgrid_key = channels.sendgrid.api_key.is_some(),
                    has_webhook = channels.webhook.is_configured(),
                    "No email service configured"
                );
            }
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                reason.to_string(),
            ))
        }
    }
}

/// `OPTIONS /api/contact` when no CORS layer answers it first.
pub async fn contact_preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST, OPTIONS")],
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
        }),
    )
}

/// Response for a panic caught anywhere below the panic layer.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Error processing contact form");
    internal_error().into_response()
}
