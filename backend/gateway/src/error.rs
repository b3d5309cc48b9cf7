//! Mapping from [`AnalyzeError`] to HTTP responses.
//!
//! Every error leaves the server as a JSON `{error}` body. Parse failures of
//! model output never reach this module; the normalizer converts those into
//! a 200 with the fallback result.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ppeguard_core::AnalyzeError;

/// Wrapper giving [`AnalyzeError`] an HTTP status and JSON body.
#[derive(Debug)]
pub struct ApiError(pub AnalyzeError);

impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AnalyzeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AnalyzeError::Config(_)
            | AnalyzeError::Upstream { .. }
            | AnalyzeError::Transport(_)
            | AnalyzeError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        let cases = [
            (AnalyzeError::InvalidRequest("no image".into()), StatusCode::BAD_REQUEST),
            (AnalyzeError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED),
            (AnalyzeError::Config("no key".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AnalyzeError::Upstream { provider: "gemini".into(), message: "quota".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AnalyzeError::Transport("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }
}
