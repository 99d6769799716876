use axum::{http::header, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};
use crate::error::GatewayError;

// GET /metrics
pub async fn metrics_handler() -> Result<impl IntoResponse, GatewayError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| GatewayError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], buffer))
}
