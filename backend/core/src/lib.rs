pub mod error;
pub mod types;

pub use error::AnalyzeError;
pub use types::{AnalysisResult, BoundingBox, PpeFinding, PpeItem};
