use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{Uri, header},
    response::IntoResponse,
};
use percent_encoding::percent_decode_str;
use std::sync::Arc;
use crate::error::GatewayError;
use crate::gateway;
use crate::models::ElapsedTimeResponse;
use crate::state::AppState;

// GET /user/{name}/url/{*address}
pub async fn fetch_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let (name, address) = match path {
        Ok(Path(params)) => params,
        // e.g. an escaped address that decodes to invalid utf-8
        Err(rejection) => {
            let (name, address) = split_fetch_path(uri.path());
            return Err(gateway::reject_target(&state, &name, &address, rejection.body_text()));
        }
    };

    // a panic inside the fetch only fails this request
    let task = tokio::spawn(async move { gateway::fetch(&state, &name, &address).await });
    let elapsed = task.await.map_err(|e| {
        tracing::error!(error = %e, "fetch task failed");
        GatewayError::Internal(e.to_string())
    })??;

    let body = serde_json::to_vec(&ElapsedTimeResponse { elapsed_time: elapsed })?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

// Splits "/user/{name}/url/{address}" without decoding the address
fn split_fetch_path(path: &str) -> (String, String) {
    let rest = path.strip_prefix("/user/").unwrap_or(path);
    let (name, address) = rest.split_once("/url/").unwrap_or((rest, ""));
    (
        percent_decode_str(name).decode_utf8_lossy().into_owned(),
        address.to_string(),
    )
}
