//! `ppeguard-vision` — vision model invocation and output normalization.
//!
//! One outbound call per analysis request, no retries, no caching. The
//! normalizer is the trust boundary: whatever text the model returns, the
//! caller gets a well-formed [`ppeguard_core::AnalysisResult`].

pub mod normalize;
pub mod prompt;
pub mod provider;

pub use normalize::normalize;
pub use prompt::{inspection_prompt, response_schema};
pub use provider::{HttpVisionClient, VisionBackend};
