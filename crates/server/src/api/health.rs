//! Health endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ChannelStatus {
    pub resend: bool,
    pub sendgrid: bool,
    pub webhook: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub channels: ChannelStatus,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let channels = state.channels.load();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        channels: ChannelStatus {
            resend: channels.resend.is_configured(),
            sendgrid: channels.sendgrid.is_configured(),
            webhook: channels.webhook.is_configured(),
        },
    })
}
