use thiserror::Error;

/// Top-level error type for the PPE gateway runtime.
///
/// Model-output parse failures deliberately have no variant here: the
/// normalizer absorbs them into a fallback [`crate::AnalysisResult`] so the
/// client always receives a renderable shape.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("vision provider error ({provider}): {message}")]
    Upstream { provider: String, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
