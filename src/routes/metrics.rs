use axum::{http::header, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};

use crate::error::AppResult;

/// GET /metrics — Prometheus text exposition of the login, registration and
/// auth-gate counters plus the catalog gauges.
pub async fn metrics_handler() -> AppResult<impl IntoResponse> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| anyhow::anyhow!("metrics encoding failed: {e}"))?;

    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], buffer))
}
