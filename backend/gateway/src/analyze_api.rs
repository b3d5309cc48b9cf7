//! Analyze endpoint (`POST /api/analyze-image`).
//!
//! Decode the upload, make exactly one vision API call, normalize whatever
//! comes back. A request that reached the upstream always answers 200 with a
//! renderable result, even when the model output could not be parsed.

use axum::Json;
use axum::extract::{Multipart, State};
use ppeguard_core::{AnalysisResult, AnalyzeError};
use ppeguard_vision::normalize;
use tracing::info;

use crate::error::ApiError;
use crate::server::GatewayState;
use crate::upload;

/// Handler for `POST /api/analyze-image`.
pub async fn analyze_image(
    State(state): State<GatewayState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, ApiError> {
    // Startup validation already refuses a keyless config, but a handler
    // must never let a misconfigured deployment reach the network either.
    if !state.config.has_api_key() {
        return Err(AnalyzeError::Config(format!(
            "no API key configured; set {}",
            state.config.provider.api_key_var()
        ))
        .into());
    }

    let form = upload::decode_form(multipart).await?;
    let image = form.image()?;
    info!(
        bytes = image.bytes.len(),
        mime = %image.mime_type,
        "forwarding uploaded image to vision provider"
    );

    let raw = state.backend.analyze(&image.bytes, &image.mime_type).await?;
    Ok(Json(normalize(&raw)))
}

/// Fallback for unsupported methods on the analyze route.
pub async fn method_not_allowed() -> ApiError {
    AnalyzeError::MethodNotAllowed.into()
}
